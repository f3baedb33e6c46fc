//! Encounter generation mechanics.
//!
//! Provides the dice-expression language used by every stored formula, a
//! weighted sampler, the attribute derivation tables, and the generation
//! pipeline that turns templates into rolled instances, encounters and
//! parties.

pub mod config;
pub mod dice;
pub mod error;
pub mod generate;
pub mod sampler;
pub mod tables;
pub mod validate;

pub use config::GenerateConfig;
pub use dice::{DiceError, DiceExpr, DieResult, NoSymbols, RollResult, SymbolTable, canonicalize};
pub use error::{MechError, MechResult};
pub use generate::{Generator, Variant, generate};
pub use sampler::{Weighted, select_many, select_one, select_uniform};
pub use validate::{
    ValidationIssue, check_formula, validate_expression, validate_library, validate_template,
};
