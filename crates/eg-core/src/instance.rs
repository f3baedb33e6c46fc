//! The rolled output of the generation pipeline.
//!
//! A [`GeneratedInstance`] is created fresh on every generation call and is
//! never mutated afterwards. Presentation layers only need this shape.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::template::{MagicType, TemplateKind, Weapon};

/// A spell drawn for an instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellPick {
    /// Spell name.
    pub name: String,
    /// Detail carried over from the spell option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Drawn spells per magic type, each list sorted by name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpellBook {
    /// Folk magic spells.
    pub folk: Vec<SpellPick>,
    /// Theist miracles.
    pub theism: Vec<SpellPick>,
    /// Sorcery spells.
    pub sorcery: Vec<SpellPick>,
    /// Mystic talents.
    pub mysticism: Vec<SpellPick>,
}

impl SpellBook {
    /// Spells of one magic type.
    pub fn get(&self, magic: MagicType) -> &[SpellPick] {
        match magic {
            MagicType::Folk => &self.folk,
            MagicType::Theism => &self.theism,
            MagicType::Sorcery => &self.sorcery,
            MagicType::Mysticism => &self.mysticism,
        }
    }

    /// Mutable access to the spells of one magic type.
    pub fn get_mut(&mut self, magic: MagicType) -> &mut Vec<SpellPick> {
        match magic {
            MagicType::Folk => &mut self.folk,
            MagicType::Theism => &mut self.theism,
            MagicType::Sorcery => &mut self.sorcery,
            MagicType::Mysticism => &mut self.mysticism,
        }
    }

    /// Total number of spells across all types.
    pub fn len(&self) -> usize {
        MagicType::ALL.iter().map(|m| self.get(*m).len()).sum()
    }

    /// Returns true if no spell of any type was drawn.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A rolled hit location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolledHitLocation {
    /// Location name.
    pub name: String,
    /// d20 range label, e.g. `"1-3"`.
    pub range: String,
    /// Hit points, at least 1.
    pub hp: i32,
    /// Rolled armor points.
    pub armor: i32,
}

/// A rolled combat style with its drawn weapons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolledCombatStyle {
    /// Style name.
    pub name: String,
    /// Rolled skill value.
    pub value: i32,
    /// Drawn weapons, scaled for the wielder's SIZ.
    pub weapons: Vec<Weapon>,
}

/// A narrative feature attached to an instance or a party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturePick {
    /// Name of the list the feature was drawn from.
    pub list: String,
    /// The feature itself.
    pub name: String,
    /// Always-present features; renderers show them once per group.
    #[serde(default)]
    pub fixed: bool,
}

impl fmt::Display for FeaturePick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.list, self.name)
    }
}

/// Strike rank with its encumbrance breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrikeRank {
    /// Effective strike rank.
    pub value: i32,
    /// Strike rank before armor penalty.
    pub natural: i32,
    /// Armor penalty; `None` for creatures that wear no armor at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty: Option<i32>,
}

impl fmt::Display for StrikeRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.penalty {
            Some(penalty) => write!(f, "{}({}-{})", self.value, self.natural, penalty),
            None => write!(f, "{}", self.value),
        }
    }
}

/// Derived attributes. Optional fields appear only when the gating skill
/// or variant applies.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Attributes {
    /// Action points per round.
    pub action_points: i32,
    /// Magic points, equal to POW.
    pub magic_points: i32,
    /// Strike rank; absent for cults.
    pub strike_rank: Option<StrikeRank>,
    /// Movement rate in metres.
    pub movement: String,
    /// Damage modifier of a corporeal creature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_modifier: Option<String>,
    /// Devotional pool, with a Devotion skill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devotional_pool: Option<i32>,
    /// Highest miracle intensity, with a Devotion skill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_intensity: Option<i32>,
    /// Highest sorcery shaping, with a Shaping skill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_shaping: Option<i32>,
    /// Sorcery intensity, with an Invocation skill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<i32>,
    /// Highest intensity of a single talent, with Mysticism and Meditation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_mysticism_intensity: Option<i32>,
    /// Highest total talent intensity, with Mysticism and Meditation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_total_intensity: Option<i32>,
    /// Highest POW of a spirit the binder can hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pow: Option<i32>,
    /// Number of spirits the binder can hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_spirits: Option<i32>,
    /// Intensity of a spirit, from its POW.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spirit_intensity: Option<i32>,
    /// Damage a spirit deals in spectral combat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spirit_damage: Option<String>,
}

/// One concrete, fully rolled creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedInstance {
    /// Display name, including batch suffix and drawn name.
    pub name: String,
    /// Name of the source template.
    pub template: String,
    /// Which generation variant produced the instance.
    pub kind: TemplateKind,
    /// Rank copied from the template.
    pub rank: u8,
    /// Cult rank title, e.g. `"Initiate"`.
    pub cult_rank: String,
    /// Rolled stats, in template order.
    pub stats: IndexMap<String, i32>,
    /// Rolled skills, in template order.
    pub skills: IndexMap<String, i32>,
    /// Drawn spells.
    pub spells: SpellBook,
    /// Rolled hit locations.
    pub hit_locations: Vec<RolledHitLocation>,
    /// Rolled combat styles.
    pub combat_styles: Vec<RolledCombatStyle>,
    /// Derived attributes.
    pub attributes: Attributes,
    /// Bound spirits, sorted by name.
    pub spirits: Vec<GeneratedInstance>,
    /// Cults the instance belongs to.
    pub cults: Vec<GeneratedInstance>,
    /// Rolled and fixed features.
    pub features: Vec<FeaturePick>,
    /// Movement rate in metres.
    pub movement: String,
    /// Free-text notes from the template.
    pub notes: String,
    /// Whether armor is part of the body and never encumbers.
    pub natural_armor: bool,
}

impl GeneratedInstance {
    /// Create an empty instance for a template; the pipeline fills it in.
    pub fn new(template: impl Into<String>, kind: TemplateKind) -> Self {
        let template = template.into();
        Self {
            name: template.clone(),
            template,
            kind,
            rank: 0,
            cult_rank: String::new(),
            stats: IndexMap::new(),
            skills: IndexMap::new(),
            spells: SpellBook::default(),
            hit_locations: Vec::new(),
            combat_styles: Vec::new(),
            attributes: Attributes::default(),
            spirits: Vec::new(),
            cults: Vec::new(),
            features: Vec::new(),
            movement: String::new(),
            notes: String::new(),
            natural_armor: false,
        }
    }

    /// A rolled stat, 0 if the instance has no such stat.
    pub fn stat(&self, name: &str) -> i32 {
        self.stats.get(name).copied().unwrap_or(0)
    }

    /// A rolled skill value, if the skill was included.
    pub fn skill(&self, name: &str) -> Option<i32> {
        self.skills.get(name).copied()
    }
}

/// A rolled party: its members plus party-level features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedParty {
    /// Party name.
    pub name: String,
    /// Free-text notes from the party.
    pub notes: String,
    /// Generated members, highest rank first.
    pub members: Vec<GeneratedInstance>,
    /// Rolled and fixed party features.
    pub features: Vec<FeaturePick>,
    /// Members that could not be generated, one message each. The other
    /// members are still rolled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<String>,
}
