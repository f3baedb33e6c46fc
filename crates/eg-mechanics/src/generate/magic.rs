//! Spells, bound spirits and cults.

use std::collections::HashSet;

use eg_core::{
    GeneratedInstance, LinkedTemplate, MagicType, SpellPick, Template, TemplateKind,
    TemplateSource,
};
use tracing::{debug, warn};

use super::Pipeline;
use crate::error::MechResult;
use crate::sampler::{self, Weighted};

/// A bound spirit keeps being re-rolled while its POW exceeds the binder's
/// cap, at most this many times. The last attempt is kept.
pub const SPIRIT_ATTEMPTS: u32 = 5;

/// A resolved link to another template, sampled by its probability.
struct Link<'t> {
    template: &'t Template,
    probability: u32,
}

impl Weighted for Link<'_> {
    fn weight(&self) -> u32 {
        self.probability
    }

    fn name(&self) -> &str {
        &self.template.name
    }
}

impl<'a, S: TemplateSource + ?Sized> Pipeline<'a, S> {
    /// Per magic type, draw distinct spells and keep them sorted by name.
    pub(super) fn roll_spells(
        &mut self,
        template: &Template,
        inst: &mut GeneratedInstance,
    ) -> MechResult<()> {
        for magic in MagicType::ALL {
            let options = template.spell_options(magic);
            let amount = self.roll_amount(
                template,
                || format!("{magic} amount"),
                template.spell_amounts.for_type(magic),
                options.len(),
            )?;
            let picked = sampler::select_many(&options, amount, self.rng);
            *inst.spells.get_mut(magic) = picked
                .into_iter()
                .map(|s| SpellPick {
                    name: s.name.clone(),
                    detail: s.detail.clone(),
                })
                .collect();
        }
        debug!(count = inst.spells.len(), "drew spells");
        Ok(())
    }

    /// Draw and generate bound spirits, re-rolling each while its POW
    /// exceeds the binder's cap.
    pub(super) fn spawn_bound_spirits(
        &mut self,
        template: &Template,
        inst: &mut GeneratedInstance,
        depth: u32,
    ) -> MechResult<()> {
        let max_pow = inst.attributes.max_pow.unwrap_or(0);
        let links = self.resolve(&template.spirits, |t| t.kind() != TemplateKind::Cult)?;
        let amount = self.roll_amount(
            template,
            || "spirit amount".to_string(),
            &template.spirit_amount,
            links.len(),
        )?;

        for link in sampler::select_many(&links, amount, self.rng) {
            let mut attempt = 1;
            let spirit = loop {
                let spirit = self.run(link.template, None, depth + 1)?;
                let pow = spirit.stat("POW");
                debug!(spirit = %spirit.name, attempt, pow, max_pow, "spawned spirit");
                if pow <= max_pow {
                    break spirit;
                }
                if attempt == SPIRIT_ATTEMPTS {
                    warn!(
                        binder = %template.name,
                        spirit = %spirit.name,
                        pow,
                        max_pow,
                        "spirit exceeds POW cap after {SPIRIT_ATTEMPTS} attempts, keeping it"
                    );
                    break spirit;
                }
                attempt += 1;
            };
            inst.spirits.push(spirit);
        }
        inst.spirits.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(())
    }

    /// Spirits of a cult: no POW cap, one attempt each.
    pub(super) fn spawn_cult_spirits(
        &mut self,
        template: &Template,
        inst: &mut GeneratedInstance,
        depth: u32,
    ) -> MechResult<()> {
        let links = self.resolve(&template.spirits, |_| true)?;
        let amount = self.roll_amount(
            template,
            || "spirit amount".to_string(),
            &template.spirit_amount,
            links.len(),
        )?;
        for link in sampler::select_many(&links, amount, self.rng) {
            let spirit = self.run(link.template, None, depth + 1)?;
            inst.spirits.push(spirit);
        }
        inst.spirits.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(())
    }

    /// Draw and generate cults, folding their spells and spirits into the
    /// parent. The first spell of a given name wins.
    pub(super) fn spawn_cults(
        &mut self,
        template: &Template,
        inst: &mut GeneratedInstance,
        depth: u32,
    ) -> MechResult<()> {
        let links = self.resolve(&template.cults, |_| true)?;
        let amount = self.roll_amount(
            template,
            || "cult amount".to_string(),
            &template.cult_amount,
            links.len(),
        )?;
        if amount == 0 {
            return Ok(());
        }

        for link in sampler::select_many(&links, amount, self.rng) {
            let cult = self.run(link.template, None, depth + 1)?;
            debug!(cult = %cult.name, "joined cult");
            for magic in MagicType::ALL {
                inst.spells
                    .get_mut(magic)
                    .extend(cult.spells.get(magic).iter().cloned());
            }
            inst.spirits.extend(cult.spirits.iter().cloned());
            inst.cults.push(cult);
        }

        for magic in MagicType::ALL {
            let spells = inst.spells.get_mut(magic);
            let mut seen = HashSet::new();
            spells.retain(|s| seen.insert(s.name.clone()));
            spells.sort_by(|a, b| a.name.cmp(&b.name));
        }
        inst.spirits.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(())
    }

    /// Resolve linked templates with a positive probability that pass
    /// `keep`, in stored order.
    fn resolve(
        &self,
        links: &[LinkedTemplate],
        keep: impl Fn(&Template) -> bool,
    ) -> MechResult<Vec<Link<'a>>> {
        let mut resolved = Vec::new();
        for link in links.iter().filter(|l| l.probability > 0) {
            let template = self.linked(link.template)?;
            if keep(template) {
                resolved.push(Link {
                    template,
                    probability: link.probability,
                });
            }
        }
        Ok(resolved)
    }
}
