//! Hit locations and combat styles.

use eg_core::{
    GeneratedInstance, RolledCombatStyle, RolledHitLocation, Template, TemplateSource,
    WeaponOption, WeaponSlot,
};
use rand::Rng;
use tracing::debug;

use super::{Pipeline, Variant};
use crate::error::MechResult;
use crate::{sampler, tables};

impl<S: TemplateSource + ?Sized> Pipeline<'_, S> {
    pub(super) fn roll_hit_locations(
        &mut self,
        template: &Template,
        variant: Variant,
        inst: &mut GeneratedInstance,
    ) -> MechResult<()> {
        let base = tables::base_hit_points(inst.stat("CON"), inst.stat("SIZ"));
        for location in &template.hit_locations {
            let hp = match variant {
                Variant::Elemental { hp_bonus } => {
                    self.rng.random_range(1..=6_i32).saturating_add(hp_bonus)
                }
                _ => {
                    let modifier = self.roll(
                        template,
                        || format!("hit points of {}", location.name),
                        &location.hp_modifier,
                        &inst.stats,
                    )?;
                    base.saturating_add(modifier)
                }
            };
            let armor = self.roll(
                template,
                || format!("armor of {}", location.name),
                &location.armor,
                &inst.stats,
            )?;
            inst.hit_locations.push(RolledHitLocation {
                name: location.name.clone(),
                range: location.range_label(),
                hp: hp.max(1),
                armor,
            });
        }
        debug!(count = inst.hit_locations.len(), base, "rolled hit locations");
        Ok(())
    }

    /// Roll each combat style and draw its weapons slot by slot.
    pub(super) fn roll_combat_styles(
        &mut self,
        template: &Template,
        inst: &mut GeneratedInstance,
    ) -> MechResult<()> {
        let siz = inst.stat("SIZ");
        for style in &template.combat_styles {
            let value = self.roll(
                template,
                || format!("combat style {}", style.name),
                &style.formula,
                &inst.stats,
            )?;

            let mut weapons = Vec::new();
            for slot in WeaponSlot::ALL {
                let options = slot_options(style.options(slot));
                let amount = self.roll_amount(
                    template,
                    || format!("{slot} amount of {}", style.name),
                    style.amounts.for_slot(slot),
                    options.len(),
                )?;
                for option in sampler::select_many(&options, amount, self.rng) {
                    let mut weapon = option.weapon.clone();
                    if !option.custom {
                        (weapon.size, weapon.reach) =
                            tables::scale_weapon(weapon.size, weapon.reach, siz);
                    }
                    weapons.push(weapon);
                }
            }
            debug!(style = %style.name, value, weapons = weapons.len(), "rolled combat style");
            inst.combat_styles.push(RolledCombatStyle {
                name: style.name.clone(),
                value,
                weapons,
            });
        }
        Ok(())
    }
}

/// Positive-probability options, standard before custom.
fn slot_options<'t>(options: impl Iterator<Item = &'t WeaponOption>) -> Vec<&'t WeaponOption> {
    let (custom, standard): (Vec<_>, Vec<_>) = options
        .filter(|o| o.probability > 0)
        .partition(|o| o.custom);
    standard.into_iter().chain(custom).collect()
}
