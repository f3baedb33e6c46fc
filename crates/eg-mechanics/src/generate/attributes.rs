//! Derived attributes.

use eg_core::{Attributes, GeneratedInstance, StrikeRank, Template, TemplateSource};
use tracing::debug;

use super::{Pipeline, Variant};
use crate::tables;

impl<S: TemplateSource + ?Sized> Pipeline<'_, S> {
    pub(super) fn derive_attributes(
        &mut self,
        template: &Template,
        variant: Variant,
        inst: &mut GeneratedInstance,
    ) {
        let attrs = match variant {
            Variant::Spirit => spirit_attributes(template, inst),
            _ => body_attributes(template, inst),
        };
        debug!(?attrs, "derived attributes");
        inst.attributes = attrs;
    }
}

/// Returns true if the instance has a non-zero Binding skill.
pub(super) fn is_binder(inst: &GeneratedInstance) -> bool {
    gate(inst, "Binding").is_some()
}

/// A skill value, if the skill is present and non-zero.
fn gate(inst: &GeneratedInstance, skill: &str) -> Option<i32> {
    inst.skills
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(skill))
        .map(|(_, value)| *value)
        .filter(|value| *value != 0)
}

fn body_attributes(template: &Template, inst: &GeneratedInstance) -> Attributes {
    let natural = tables::natural_strike_rank(inst.stat("INT"), inst.stat("DEX"));
    let penalty = if template.natural_armor {
        0
    } else {
        let worn = inst
            .hit_locations
            .iter()
            .zip(&template.hit_locations)
            .map(|(rolled, def)| rolled.armor.saturating_sub(def.natural_armor));
        tables::encumbrance_penalty(worn)
    };

    let mut attrs = Attributes {
        action_points: tables::action_points(inst.stat("DEX").saturating_add(inst.stat("INT"))),
        magic_points: inst.stat("POW"),
        strike_rank: Some(StrikeRank {
            value: natural.saturating_sub(penalty),
            natural,
            penalty: Some(penalty),
        }),
        movement: template.movement.clone(),
        damage_modifier: Some(
            tables::damage_modifier(inst.stat("STR"), inst.stat("SIZ")).to_string(),
        ),
        ..Attributes::default()
    };
    add_pools(template, inst, &mut attrs);
    attrs
}

fn spirit_attributes(template: &Template, inst: &GeneratedInstance) -> Attributes {
    let strike_rank = tables::spirit_strike_rank(inst.stat("INT"), inst.stat("CHA"));
    let mut attrs = Attributes {
        action_points: tables::spirit_action_points(inst.stat("POW").saturating_add(inst.stat("INT"))),
        magic_points: inst.stat("POW"),
        strike_rank: Some(StrikeRank {
            value: strike_rank,
            natural: strike_rank,
            penalty: None,
        }),
        movement: template.movement.clone(),
        spirit_damage: Some(
            tables::spirit_damage(gate(inst, "Spectral Combat").unwrap_or(0)).to_string(),
        ),
        spirit_intensity: Some(tables::spirit_intensity(inst.stat("POW"))),
        ..Attributes::default()
    };
    add_pools(template, inst, &mut attrs);
    attrs
}

/// Pools and caps unlocked by magic skills.
fn add_pools(template: &Template, inst: &GeneratedInstance, attrs: &mut Attributes) {
    if let Some(devotion) = gate(inst, "Devotion") {
        attrs.devotional_pool = Some(tables::devotional_pool(inst.stat("POW"), template.cult_rank));
        attrs.max_intensity = Some(tables::skill_cap(devotion, 10));
    }
    if let Some(shaping) = gate(inst, "Shaping") {
        attrs.max_shaping = Some(tables::skill_cap(shaping, 10));
    }
    if let Some(invocation) = gate(inst, "Invocation") {
        attrs.intensity = Some(tables::skill_cap(invocation, 10));
    }
    if let (Some(mysticism), Some(meditation)) = (gate(inst, "Mysticism"), gate(inst, "Meditation"))
    {
        attrs.max_mysticism_intensity = Some(tables::skill_cap(mysticism, 20));
        attrs.max_total_intensity = Some(tables::skill_cap(meditation, 10));
    }
    if let Some(binding) = gate(inst, "Binding") {
        attrs.max_pow = Some(tables::max_bound_pow(binding));
        attrs.max_spirits = Some(tables::max_spirits(inst.stat("CHA"), template.cult_rank));
    }
}
