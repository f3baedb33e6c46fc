//! Text rendering of generated instances.

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use eg_core::{Attributes, FeaturePick, GeneratedInstance, MagicType, TemplateKind};

/// Print one instance with its bound spirits indented below it.
pub fn print_instance(inst: &GeneratedInstance, indent: usize) {
    let pad = " ".repeat(indent + 2);
    let mut header = format!("{pad}{} [{}", inst.name.bold(), inst.kind.to_string().dimmed());
    if !inst.cult_rank.is_empty() && inst.cult_rank != "None" {
        header.push_str(&format!(", {}", inst.cult_rank.dimmed()));
    }
    header.push(']');
    println!("{header}");

    if !inst.stats.is_empty() {
        println!("{pad}{}", pairs(inst.stats.iter()));
    }
    if inst.kind != TemplateKind::Cult {
        println!("{pad}{}", attributes(&inst.attributes));
    }
    if !inst.skills.is_empty() {
        println!("{pad}skills: {}", pairs(inst.skills.iter()));
    }

    if !inst.hit_locations.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["d20", "Location", "AP", "HP"]);
        for location in &inst.hit_locations {
            table.add_row(vec![
                location.range.clone(),
                location.name.clone(),
                location.armor.to_string(),
                location.hp.to_string(),
            ]);
        }
        for line in table.to_string().lines() {
            println!("{pad}{line}");
        }
    }

    for style in &inst.combat_styles {
        let weapons: Vec<String> = style
            .weapons
            .iter()
            .map(|w| format!("{} ({}, {}/{})", w.name, w.damage, w.size, w.reach))
            .collect();
        println!("{pad}{} {}%: {}", style.name, style.value, weapons.join(", "));
    }

    for magic in MagicType::ALL {
        let spells = inst.spells.get(magic);
        if spells.is_empty() {
            continue;
        }
        let names: Vec<String> = spells
            .iter()
            .map(|s| match &s.detail {
                Some(detail) => format!("{} ({detail})", s.name),
                None => s.name.clone(),
            })
            .collect();
        println!("{pad}{magic}: {}", names.join(", "));
    }

    print_features(&inst.features, indent);
    if !inst.notes.is_empty() {
        println!("{pad}{}", inst.notes.dimmed());
    }

    if !inst.cults.is_empty() {
        let cults: Vec<&str> = inst.cults.iter().map(|c| c.name.as_str()).collect();
        println!("{pad}cults: {}", cults.join(", "));
    }
    for spirit in &inst.spirits {
        println!();
        print_instance(spirit, indent + 4);
    }
}

pub fn print_features(features: &[FeaturePick], indent: usize) {
    let pad = " ".repeat(indent + 2);
    for feature in features {
        println!("{pad}{feature}");
    }
}

fn pairs<'a>(values: impl Iterator<Item = (&'a String, &'a i32)>) -> String {
    values
        .map(|(name, value)| format!("{name} {value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn attributes(attrs: &Attributes) -> String {
    let mut parts = vec![
        format!("AP {}", attrs.action_points),
        format!("MP {}", attrs.magic_points),
    ];
    if let Some(sr) = attrs.strike_rank {
        parts.push(format!("SR {sr}"));
    }
    parts.push(format!("move {}", attrs.movement));
    if let Some(dm) = &attrs.damage_modifier {
        parts.push(format!("DM {dm}"));
    }
    if let Some(damage) = &attrs.spirit_damage {
        parts.push(format!("spirit damage {damage}"));
    }
    let optional = [
        ("intensity", attrs.spirit_intensity),
        ("devotional pool", attrs.devotional_pool),
        ("max intensity", attrs.max_intensity),
        ("max shaping", attrs.max_shaping),
        ("invocation intensity", attrs.intensity),
        ("max mysticism intensity", attrs.max_mysticism_intensity),
        ("max total intensity", attrs.max_total_intensity),
        ("max spirits", attrs.max_spirits),
        ("max spirit POW", attrs.max_pow),
    ];
    parts.extend(
        optional
            .into_iter()
            .filter_map(|(label, value)| value.map(|v| format!("{label} {v}"))),
    );
    parts.join(", ")
}
