//! Narrative features for instances and parties.

use eg_core::{
    FeatureList, FeaturePick, FixedFeature, GeneratedInstance, Party, Template, TemplateSource,
};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::debug;

use super::Pipeline;
use crate::error::MechResult;
use crate::sampler;

impl<S: TemplateSource + ?Sized> Pipeline<'_, S> {
    /// Roll each bound list against its percentage formula, then append the
    /// fixed features. The result is ordered by list name.
    pub(super) fn roll_features(
        &mut self,
        template: &Template,
        inst: &mut GeneratedInstance,
    ) -> MechResult<()> {
        for binding in &template.feature_lists {
            let chance = self.roll(
                template,
                || format!("probability of {}", binding.list.name),
                &binding.probability,
                &inst.stats,
            )?;
            if let Some(pick) = draw(&binding.list, chance, self.rng) {
                inst.features.push(pick);
            }
        }
        inst.features.extend(template.fixed_features.iter().map(fixed));
        inst.features.sort_by(|a, b| a.list.cmp(&b.list));
        debug!(count = inst.features.len(), "rolled features");
        Ok(())
    }
}

/// Party-level features: a flat percentage per list, then the fixed ones.
pub(super) fn party_features(party: &Party, rng: &mut StdRng) -> Vec<FeaturePick> {
    let mut picks: Vec<FeaturePick> = party
        .feature_lists
        .iter()
        .filter_map(|binding| {
            let chance = i32::try_from(binding.probability).unwrap_or(i32::MAX);
            draw(&binding.list, chance, rng)
        })
        .collect();
    picks.extend(party.fixed_features.iter().map(fixed));
    picks
}

/// Roll 1..=100 against `chance`; on success pick one item uniformly.
fn draw(list: &FeatureList, chance: i32, rng: &mut StdRng) -> Option<FeaturePick> {
    let roll: i32 = rng.random_range(1..=100);
    if roll > chance {
        return None;
    }
    let index = sampler::select_uniform(list.items.len(), rng)?;
    Some(FeaturePick {
        list: list.name.clone(),
        name: list.items[index].clone(),
        fixed: false,
    })
}

fn fixed(feature: &FixedFeature) -> FeaturePick {
    FeaturePick {
        list: feature.list.clone(),
        name: feature.name.clone(),
        fixed: true,
    }
}
