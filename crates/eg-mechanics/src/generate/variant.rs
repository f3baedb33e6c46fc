use std::fmt;

use eg_core::{Template, TemplateKind};

use crate::tables;

/// The generation variant of a template, with the data its hooks need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// A corporeal creature.
    Standard,
    /// A discorporate spirit: stats collapse onto POW and INT, no body.
    Spirit,
    /// An elemental: one pooled hit location, no spirit binding.
    Elemental {
        /// Constant added to the 1d6 pooled hit points.
        hp_bonus: i32,
    },
    /// A cult: only spells and spirits, folded into a parent.
    Cult,
}

impl Variant {
    /// Select the variant from the template flags.
    pub fn of(template: &Template) -> Self {
        match template.kind() {
            TemplateKind::Standard => Self::Standard,
            TemplateKind::Spirit => Self::Spirit,
            TemplateKind::Elemental => Self::Elemental {
                hp_bonus: tables::elemental_hp_bonus(template.stat_formula("POW").unwrap_or("")),
            },
            TemplateKind::Cult => Self::Cult,
        }
    }

    /// Whether stats and skills are rolled.
    pub fn rolls_body(self) -> bool {
        !matches!(self, Self::Cult)
    }

    /// Whether the instance gets hit locations and combat styles.
    pub fn has_hit_locations(self) -> bool {
        matches!(self, Self::Standard | Self::Elemental { .. })
    }

    /// Whether a Binding skill lets the instance spawn bound spirits.
    pub fn binds_spirits(self) -> bool {
        matches!(self, Self::Standard | Self::Spirit)
    }

    /// Overwrite stats the variant derives from others.
    pub fn adjust_stats(self, stats: &mut indexmap::IndexMap<String, i32>) {
        let get = |stats: &indexmap::IndexMap<String, i32>, name: &str| {
            stats.get(name).copied().unwrap_or(0)
        };
        match self {
            Self::Spirit => {
                let pow = get(stats, "POW");
                let int = get(stats, "INT");
                stats.insert("CON".to_string(), pow);
                stats.insert("STR".to_string(), pow);
                stats.insert("SIZ".to_string(), pow);
                stats.insert("DEX".to_string(), int);
            }
            Self::Elemental { .. } => {
                let str = get(stats, "STR");
                let pow = get(stats, "POW");
                stats.insert("SIZ".to_string(), str);
                stats.insert("CON".to_string(), str);
                stats.insert("CHA".to_string(), pow);
            }
            Self::Standard | Self::Cult => {}
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Spirit => write!(f, "spirit"),
            Self::Elemental { .. } => write!(f, "elemental"),
            Self::Cult => write!(f, "cult"),
        }
    }
}
