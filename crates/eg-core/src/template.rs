use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier of a stored template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub u32);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which generation variant a template produces.
///
/// Derived from the template's flags; see [`Template::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// A corporeal creature with hit locations and combat styles.
    #[default]
    Standard,
    /// A discorporate spirit.
    Spirit,
    /// An elemental with a single pooled hit location.
    Elemental,
    /// A cult: only spells and spirits, folded into a parent.
    Cult,
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Spirit => write!(f, "spirit"),
            Self::Elemental => write!(f, "elemental"),
            Self::Cult => write!(f, "cult"),
        }
    }
}

/// The four magic traditions a spell can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagicType {
    /// Folk magic.
    Folk,
    /// Theism (divine magic).
    Theism,
    /// Sorcery.
    Sorcery,
    /// Mysticism.
    Mysticism,
}

impl MagicType {
    /// All magic types in display order.
    pub const ALL: [MagicType; 4] = [Self::Folk, Self::Theism, Self::Sorcery, Self::Mysticism];
}

impl fmt::Display for MagicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Folk => write!(f, "folk magic"),
            Self::Theism => write!(f, "theism"),
            Self::Sorcery => write!(f, "sorcery"),
            Self::Mysticism => write!(f, "mysticism"),
        }
    }
}

/// Slot class of a weapon option within a combat style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponSlot {
    /// One-handed melee weapon.
    #[serde(rename = "1h-melee")]
    OneHanded,
    /// Two-handed melee weapon.
    #[serde(rename = "2h-melee")]
    TwoHanded,
    /// Ranged weapon.
    #[serde(rename = "ranged")]
    Ranged,
    /// Shield.
    #[serde(rename = "shield")]
    Shield,
}

impl WeaponSlot {
    /// All slot classes in the order weapons are drawn.
    pub const ALL: [WeaponSlot; 4] = [Self::OneHanded, Self::TwoHanded, Self::Ranged, Self::Shield];
}

impl fmt::Display for WeaponSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneHanded => write!(f, "1-h melee"),
            Self::TwoHanded => write!(f, "2-h melee"),
            Self::Ranged => write!(f, "ranged"),
            Self::Shield => write!(f, "shield"),
        }
    }
}

/// Weapon size category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeaponSize {
    /// No size (natural or improvised weapons).
    #[serde(rename = "-")]
    None,
    /// Small.
    #[serde(rename = "S")]
    Small,
    /// Medium.
    #[serde(rename = "M")]
    #[default]
    Medium,
    /// Large.
    #[serde(rename = "L")]
    Large,
    /// Huge.
    #[serde(rename = "H")]
    Huge,
    /// Enormous.
    #[serde(rename = "E")]
    Enormous,
    /// Colossal.
    #[serde(rename = "C")]
    Colossal,
}

impl WeaponSize {
    /// The ordered size scale used when scaling weapons for big creatures.
    pub const SCALE: [WeaponSize; 6] = [
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::Huge,
        Self::Enormous,
        Self::Colossal,
    ];

    /// Move `steps` positions along [`Self::SCALE`], clamping at both ends.
    /// `None` has no position on the scale and is returned unchanged.
    pub fn shifted(self, steps: i32) -> Self {
        shift_on_scale(&Self::SCALE, self, steps, 0)
    }

    /// Short label as printed on a stat block.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "-",
            Self::Small => "S",
            Self::Medium => "M",
            Self::Large => "L",
            Self::Huge => "H",
            Self::Enormous => "E",
            Self::Colossal => "C",
        }
    }
}

impl fmt::Display for WeaponSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weapon reach category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeaponReach {
    /// No reach (ranged weapons, shields used as cover).
    #[serde(rename = "-")]
    None,
    /// Touch.
    #[serde(rename = "T")]
    Touch,
    /// Short.
    #[serde(rename = "S")]
    Short,
    /// Medium.
    #[serde(rename = "M")]
    #[default]
    Medium,
    /// Long.
    #[serde(rename = "L")]
    Long,
    /// Very long.
    #[serde(rename = "VL")]
    VeryLong,
    /// Unlimited.
    #[serde(rename = "U")]
    Unlimited,
}

impl WeaponReach {
    /// The ordered reach scale used when scaling weapons for big creatures.
    pub const SCALE: [WeaponReach; 7] = [
        Self::None,
        Self::Touch,
        Self::Short,
        Self::Medium,
        Self::Long,
        Self::VeryLong,
        Self::Unlimited,
    ];

    /// Move `steps` positions along [`Self::SCALE`]. The result is clamped
    /// between Touch and Unlimited, so `None` grows into Touch.
    pub fn shifted(self, steps: i32) -> Self {
        shift_on_scale(&Self::SCALE, self, steps, 1)
    }

    /// Short label as printed on a stat block.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "-",
            Self::Touch => "T",
            Self::Short => "S",
            Self::Medium => "M",
            Self::Long => "L",
            Self::VeryLong => "VL",
            Self::Unlimited => "U",
        }
    }
}

impl fmt::Display for WeaponReach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shift along `scale`, clamping the index between `floor` and the last entry.
fn shift_on_scale<T: Copy + PartialEq>(scale: &[T], value: T, steps: i32, floor: i64) -> T {
    let Some(index) = scale.iter().position(|v| *v == value) else {
        return value;
    };
    let last = scale.len() as i64 - 1;
    let target = (index as i64 + i64::from(steps)).clamp(floor, last);
    scale[target as usize]
}

/// A weapon record as printed on a generated stat block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    /// Weapon name.
    pub name: String,
    /// Damage dice, e.g. `1d8`.
    #[serde(default)]
    pub damage: String,
    /// Slot class the weapon is drawn for.
    #[serde(rename = "type")]
    pub slot: WeaponSlot,
    /// Size category.
    #[serde(default)]
    pub size: WeaponSize,
    /// Reach category.
    #[serde(default)]
    pub reach: WeaponReach,
    /// Armor points of the weapon.
    #[serde(default)]
    pub ap: i32,
    /// Hit points of the weapon.
    #[serde(default)]
    pub hp: i32,
    /// Whether the wielder's damage modifier applies.
    #[serde(default = "default_true")]
    pub damage_modifier: bool,
    /// Free-text special effects.
    #[serde(default)]
    pub special_effects: String,
    /// Range, for ranged weapons.
    #[serde(default)]
    pub range: String,
}

/// A weighted weapon choice inside a combat style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponOption {
    /// The weapon record.
    #[serde(flatten)]
    pub weapon: Weapon,
    /// Relative weight for the draw.
    pub probability: u32,
    /// Custom weapons are user-made and never rescaled for creature size.
    #[serde(default)]
    pub custom: bool,
}

/// Per-slot draw amounts of a combat style, as dice formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponAmounts {
    /// One-handed melee weapons to draw.
    #[serde(default = "default_zero")]
    pub one_handed: String,
    /// Two-handed melee weapons to draw.
    #[serde(default = "default_zero")]
    pub two_handed: String,
    /// Ranged weapons to draw.
    #[serde(default = "default_zero")]
    pub ranged: String,
    /// Shields to draw.
    #[serde(default = "default_zero")]
    pub shield: String,
}

impl Default for WeaponAmounts {
    fn default() -> Self {
        Self {
            one_handed: default_zero(),
            two_handed: default_zero(),
            ranged: default_zero(),
            shield: default_zero(),
        }
    }
}

impl WeaponAmounts {
    /// The amount formula for a slot class.
    pub fn for_slot(&self, slot: WeaponSlot) -> &str {
        match slot {
            WeaponSlot::OneHanded => &self.one_handed,
            WeaponSlot::TwoHanded => &self.two_handed,
            WeaponSlot::Ranged => &self.ranged,
            WeaponSlot::Shield => &self.shield,
        }
    }
}

/// A combat style with its weighted weapon options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatStyleDef {
    /// Style name.
    pub name: String,
    /// Skill formula, rolled against the instance's stats.
    #[serde(default = "default_style_formula")]
    pub formula: String,
    /// How many weapons of each slot class to draw.
    #[serde(default)]
    pub amounts: WeaponAmounts,
    /// Weighted weapon options.
    #[serde(default)]
    pub weapons: Vec<WeaponOption>,
}

impl CombatStyleDef {
    /// Weapon options of one slot class, in stored order.
    pub fn options(&self, slot: WeaponSlot) -> impl Iterator<Item = &WeaponOption> {
        self.weapons.iter().filter(move |w| w.weapon.slot == slot)
    }
}

/// A stat and the formula it is rolled with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatDef {
    /// Stat name, e.g. `STR`.
    pub name: String,
    /// Dice formula, e.g. `3d6`.
    pub formula: String,
}

/// A skill definition, standard or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDef {
    /// Skill name.
    pub name: String,
    /// Formula referencing stats, e.g. `STR+DEX+10`.
    #[serde(default)]
    pub formula: String,
    /// Only included skills are rolled.
    #[serde(default = "default_true")]
    pub include: bool,
    /// User-made skills are rolled after the standard ones.
    #[serde(default)]
    pub custom: bool,
}

/// A weighted spell choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellOption {
    /// Spell name.
    pub name: String,
    /// Magic type the spell belongs to.
    pub magic: MagicType,
    /// Relative weight for the draw.
    pub probability: u32,
    /// User-made spells are drawn after the standard ones.
    #[serde(default)]
    pub custom: bool,
    /// Free-text detail such as the element of a summoning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Spell draw amounts per magic type, as dice formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellAmounts {
    /// Folk magic spells to draw.
    #[serde(default = "default_zero")]
    pub folk: String,
    /// Theist miracles to draw.
    #[serde(default = "default_zero")]
    pub theism: String,
    /// Sorcery spells to draw.
    #[serde(default = "default_zero")]
    pub sorcery: String,
    /// Mystic talents to draw.
    #[serde(default = "default_zero")]
    pub mysticism: String,
}

impl Default for SpellAmounts {
    fn default() -> Self {
        Self {
            folk: default_zero(),
            theism: default_zero(),
            sorcery: default_zero(),
            mysticism: default_zero(),
        }
    }
}

impl SpellAmounts {
    /// The amount formula for a magic type.
    pub fn for_type(&self, magic: MagicType) -> &str {
        match magic {
            MagicType::Folk => &self.folk,
            MagicType::Theism => &self.theism,
            MagicType::Sorcery => &self.sorcery,
            MagicType::Mysticism => &self.mysticism,
        }
    }
}

/// A hit location on the template's body plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitLocationDef {
    /// Location name.
    pub name: String,
    /// First d20 result that hits this location.
    pub range_start: u32,
    /// Last d20 result that hits this location.
    pub range_end: u32,
    /// Formula added to the base hit points.
    #[serde(default = "default_zero")]
    pub hp_modifier: String,
    /// Armor formula.
    #[serde(default = "default_zero")]
    pub armor: String,
    /// Armor the race has intrinsically (hide, scales). Not counted as
    /// encumbrance.
    #[serde(default)]
    pub natural_armor: i32,
}

impl HitLocationDef {
    /// Range label as printed: `"1-3"`, or `"19"` for a single value.
    pub fn range_label(&self) -> String {
        if self.range_start == self.range_end {
            self.range_start.to_string()
        } else {
            format!("{}-{}", self.range_start, self.range_end)
        }
    }
}

/// A named list of narrative features, drawn uniformly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureList {
    /// List name.
    pub name: String,
    /// Feature texts.
    #[serde(default)]
    pub items: Vec<String>,
}

/// A feature list bound to a template with a probability formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureBinding {
    /// The list to draw from.
    pub list: FeatureList,
    /// Percentage chance, as a formula over stats (e.g. `POW+POW`).
    #[serde(default = "default_feature_probability")]
    pub probability: String,
}

/// A feature that is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedFeature {
    /// Name of the list the feature belongs to.
    pub list: String,
    /// The feature text.
    pub name: String,
}

/// A weighted link to another template (a bound spirit or a cult).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkedTemplate {
    /// The linked template.
    pub template: TemplateId,
    /// Relative weight for the draw.
    pub probability: u32,
}

/// A stored creature archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Unique identifier.
    pub id: TemplateId,
    /// Unique name.
    pub name: String,
    /// Discorporate race.
    #[serde(default)]
    pub spirit: bool,
    /// Elemental with a pooled hit location.
    #[serde(default)]
    pub elemental: bool,
    /// Cult aggregator.
    #[serde(default)]
    pub cult: bool,
    /// 1 (Rabble) to 5 (Master).
    #[serde(default = "default_rank")]
    pub rank: u8,
    /// 0 (None) to 5 (Leader / High priest).
    #[serde(default)]
    pub cult_rank: u8,
    /// Movement rate in metres.
    #[serde(default = "default_movement")]
    pub movement: String,
    /// Armor is part of the body and never encumbers.
    #[serde(default)]
    pub natural_armor: bool,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// Stats in roll order.
    #[serde(default)]
    pub stats: Vec<StatDef>,
    /// Standard and custom skills.
    #[serde(default)]
    pub skills: Vec<SkillDef>,
    /// Weighted spell options.
    #[serde(default)]
    pub spells: Vec<SpellOption>,
    /// Spell draw amounts per magic type.
    #[serde(default)]
    pub spell_amounts: SpellAmounts,
    /// Hit locations of the body plan.
    #[serde(default)]
    pub hit_locations: Vec<HitLocationDef>,
    /// Combat styles with their weapon options.
    #[serde(default)]
    pub combat_styles: Vec<CombatStyleDef>,
    /// Feature lists rolled on every generation.
    #[serde(default)]
    pub feature_lists: Vec<FeatureBinding>,
    /// Features always present.
    #[serde(default)]
    pub fixed_features: Vec<FixedFeature>,
    /// Names prefixed to generated instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_list: Option<FeatureList>,
    /// Spirits the template can bind, or a cult grants.
    #[serde(default)]
    pub spirits: Vec<LinkedTemplate>,
    /// Cults the template can belong to.
    #[serde(default)]
    pub cults: Vec<LinkedTemplate>,
    /// Dice formula for how many spirits to draw.
    #[serde(default = "default_zero")]
    pub spirit_amount: String,
    /// Dice formula for how many cults to draw.
    #[serde(default = "default_zero")]
    pub cult_amount: String,
}

impl Template {
    /// Create an empty standard template.
    pub fn new(id: TemplateId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            spirit: false,
            elemental: false,
            cult: false,
            rank: default_rank(),
            cult_rank: 0,
            movement: default_movement(),
            natural_armor: false,
            notes: String::new(),
            stats: Vec::new(),
            skills: Vec::new(),
            spells: Vec::new(),
            spell_amounts: SpellAmounts::default(),
            hit_locations: Vec::new(),
            combat_styles: Vec::new(),
            feature_lists: Vec::new(),
            fixed_features: Vec::new(),
            name_list: None,
            spirits: Vec::new(),
            cults: Vec::new(),
            spirit_amount: default_zero(),
            cult_amount: default_zero(),
        }
    }

    /// The generation variant, decided by the flags in priority order
    /// spirit, elemental, cult.
    pub fn kind(&self) -> TemplateKind {
        if self.spirit {
            TemplateKind::Spirit
        } else if self.elemental {
            TemplateKind::Elemental
        } else if self.cult {
            TemplateKind::Cult
        } else {
            TemplateKind::Standard
        }
    }

    /// The formula of a stat, if the template defines it.
    pub fn stat_formula(&self, name: &str) -> Option<&str> {
        self.stats
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .map(|s| s.formula.as_str())
    }

    /// Included skills: standard skills first, then custom ones, each in
    /// stored order.
    pub fn included_skills(&self) -> impl Iterator<Item = &SkillDef> {
        let standard = self.skills.iter().filter(|s| s.include && !s.custom);
        let custom = self.skills.iter().filter(|s| s.include && s.custom);
        standard.chain(custom)
    }

    /// Returns true if the skill is defined and included.
    pub fn has_skill(&self, name: &str) -> bool {
        self.skills
            .iter()
            .any(|s| s.include && s.name.eq_ignore_ascii_case(name))
    }

    /// Cults are always theist; other templates are when they include
    /// Devotion.
    pub fn is_theist(&self) -> bool {
        self.cult || self.has_skill("Devotion")
    }

    /// Spell options of a magic type with a positive probability, standard
    /// ones before custom ones.
    pub fn spell_options(&self, magic: MagicType) -> Vec<&SpellOption> {
        let eligible = |custom: bool| {
            self.spells
                .iter()
                .filter(move |s| s.magic == magic && s.probability > 0 && s.custom == custom)
        };
        eligible(false).chain(eligible(true)).collect()
    }

    /// Title of the template's rank.
    pub fn rank_title(&self) -> &'static str {
        match self.rank {
            0 | 1 => "Rabble",
            2 => "Novice",
            3 => "Skilled",
            4 => "Veteran",
            _ => "Master",
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_zero() -> String {
    "0".to_string()
}

fn default_rank() -> u8 {
    2
}

fn default_movement() -> String {
    "6".to_string()
}

fn default_style_formula() -> String {
    "STR+DEX".to_string()
}

fn default_feature_probability() -> String {
    "POW+POW".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_priority() {
        let mut t = Template::new(TemplateId(1), "Thing");
        assert_eq!(t.kind(), TemplateKind::Standard);
        t.cult = true;
        assert_eq!(t.kind(), TemplateKind::Cult);
        t.elemental = true;
        assert_eq!(t.kind(), TemplateKind::Elemental);
        t.spirit = true;
        assert_eq!(t.kind(), TemplateKind::Spirit);
    }

    #[test]
    fn size_shift_clamps() {
        assert_eq!(WeaponSize::Medium.shifted(1), WeaponSize::Large);
        assert_eq!(WeaponSize::Medium.shifted(10), WeaponSize::Colossal);
        assert_eq!(WeaponSize::Medium.shifted(-5), WeaponSize::Small);
        assert_eq!(WeaponSize::None.shifted(3), WeaponSize::None);
    }

    #[test]
    fn reach_shift_clamps() {
        assert_eq!(WeaponReach::Long.shifted(1), WeaponReach::VeryLong);
        assert_eq!(WeaponReach::Long.shifted(4), WeaponReach::Unlimited);
        assert_eq!(WeaponReach::Short.shifted(-3), WeaponReach::Touch);
        assert_eq!(WeaponReach::None.shifted(1), WeaponReach::Touch);
        assert_eq!(WeaponReach::None.shifted(2), WeaponReach::Short);
        assert_eq!(WeaponReach::Touch.shifted(-4), WeaponReach::Touch);
    }

    #[test]
    fn range_label() {
        let mut hl = HitLocationDef {
            name: "Head".to_string(),
            range_start: 19,
            range_end: 20,
            hp_modifier: "0".to_string(),
            armor: "0".to_string(),
            natural_armor: 0,
        };
        assert_eq!(hl.range_label(), "19-20");
        hl.range_start = 20;
        assert_eq!(hl.range_label(), "20");
    }

    #[test]
    fn included_skills_order_standard_before_custom() {
        let mut t = Template::new(TemplateId(1), "Thing");
        let skill = |name: &str, include: bool, custom: bool| SkillDef {
            name: name.to_string(),
            formula: "10".to_string(),
            include,
            custom,
        };
        t.skills = vec![
            skill("Lore (Orcs)", true, true),
            skill("Athletics", true, false),
            skill("Boating", false, false),
            skill("Evade", true, false),
        ];
        let names: Vec<&str> = t.included_skills().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Athletics", "Evade", "Lore (Orcs)"]);
        assert!(t.has_skill("evade"));
        assert!(!t.has_skill("Boating"));
        assert!(!t.is_theist());
        t.cult = true;
        assert!(t.is_theist());
    }

    #[test]
    fn spell_options_skip_zero_probability() {
        let mut t = Template::new(TemplateId(1), "Thing");
        let spell = |name: &str, probability: u32, custom: bool| SpellOption {
            name: name.to_string(),
            magic: MagicType::Folk,
            probability,
            custom,
            detail: None,
        };
        t.spells = vec![
            spell("Mend", 0, false),
            spell("Homemade Hex", 2, true),
            spell("Bladesharp", 3, false),
        ];
        let names: Vec<&str> = t
            .spell_options(MagicType::Folk)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Bladesharp", "Homemade Hex"]);
        assert!(t.spell_options(MagicType::Theism).is_empty());
    }

    #[test]
    fn deserialize_with_defaults() {
        let json = r#"{
            "id": 7,
            "name": "Goblin",
            "stats": [{"name": "STR", "formula": "2d6"}],
            "combat_styles": [{
                "name": "Skirmisher",
                "weapons": [{"name": "Spear", "type": "1h-melee", "probability": 2, "reach": "L"}]
            }]
        }"#;
        let t: Template = serde_json::from_str(json).unwrap();
        assert_eq!(t.id, TemplateId(7));
        assert_eq!(t.kind(), TemplateKind::Standard);
        assert_eq!(t.rank, 2);
        assert_eq!(t.movement, "6");
        assert_eq!(t.spirit_amount, "0");
        let style = &t.combat_styles[0];
        assert_eq!(style.formula, "STR+DEX");
        assert_eq!(style.amounts.for_slot(WeaponSlot::Shield), "0");
        let spear = &style.weapons[0];
        assert_eq!(spear.weapon.slot, WeaponSlot::OneHanded);
        assert_eq!(spear.weapon.size, WeaponSize::Medium);
        assert_eq!(spear.weapon.reach, WeaponReach::Long);
        assert!(spear.weapon.damage_modifier);
        assert!(!spear.custom);
    }
}
