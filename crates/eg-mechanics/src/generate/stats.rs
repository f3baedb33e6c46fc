//! Name, stat and skill steps.

use eg_core::{GeneratedInstance, Template, TemplateSource};
use tracing::debug;

use super::{Pipeline, Variant};
use crate::dice::NoSymbols;
use crate::error::MechResult;
use crate::sampler;

impl<S: TemplateSource + ?Sized> Pipeline<'_, S> {
    /// `"Orc"`, `"Orc 3"`, or with a name list `"Grishnak (Orc 3)"`.
    pub(super) fn roll_name(&mut self, template: &Template, suffix: Option<u32>) -> String {
        let mut name = match suffix {
            Some(n) => format!("{} {n}", template.name),
            None => template.name.clone(),
        };
        if let Some(list) = &template.name_list {
            if let Some(index) = sampler::select_uniform(list.items.len(), self.rng) {
                name = format!("{} ({name})", list.items[index]);
            }
        }
        name
    }

    pub(super) fn roll_stats(
        &mut self,
        template: &Template,
        variant: Variant,
        inst: &mut GeneratedInstance,
    ) -> MechResult<()> {
        for stat in &template.stats {
            let value = self.roll(
                template,
                || format!("stat {}", stat.name),
                &stat.formula,
                &NoSymbols,
            )?;
            inst.stats.insert(stat.name.clone(), value);
        }
        variant.adjust_stats(&mut inst.stats);
        debug!(stats = ?inst.stats, "rolled stats");
        Ok(())
    }

    /// Included skills in template order (standard before custom), each
    /// rolled against the stats.
    pub(super) fn roll_skills(
        &mut self,
        template: &Template,
        inst: &mut GeneratedInstance,
    ) -> MechResult<()> {
        for skill in template.included_skills() {
            let value = self.roll(
                template,
                || format!("skill {}", skill.name),
                &skill.formula,
                &inst.stats,
            )?;
            inst.skills.insert(skill.name.clone(), value);
        }
        debug!(count = inst.skills.len(), "rolled skills");
        Ok(())
    }
}
