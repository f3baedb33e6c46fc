//! Core types for the encounter generator: templates, parties, and the
//! generated instances rolled from them.
//!
//! This crate is the data model the generation pipeline reads from and
//! writes into. It knows nothing about dice or randomness; you can build a
//! [`TemplateLibrary`] programmatically or deserialize one from JSON.

/// Error types used throughout the crate.
pub mod error;
/// Generated instances: the rolled output of the pipeline.
pub mod instance;
/// The in-memory template library and the [`TemplateSource`] seam.
pub mod library;
/// Parties: stored groups of templates generated together.
pub mod party;
/// Template definitions, weapons, spells, and their enumerations.
pub mod template;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export generated instance types.
pub use instance::{
    Attributes, FeaturePick, GeneratedInstance, GeneratedParty, RolledCombatStyle,
    RolledHitLocation, SpellBook, SpellPick, StrikeRank,
};
/// Re-export library types.
pub use library::{TemplateLibrary, TemplateSource, UsageSnapshot};
/// Re-export party types.
pub use party::{Party, PartyFeatureBinding, PartyMember};
/// Re-export template types.
pub use template::{
    CombatStyleDef, FeatureBinding, FeatureList, FixedFeature, HitLocationDef, LinkedTemplate,
    MagicType, SkillDef, SpellAmounts, SpellOption, StatDef, Template, TemplateId, TemplateKind,
    Weapon, WeaponAmounts, WeaponOption, WeaponReach, WeaponSize, WeaponSlot,
};
