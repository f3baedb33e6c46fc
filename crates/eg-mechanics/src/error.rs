//! Error types for the generation pipeline.

use eg_core::TemplateId;

use crate::dice::DiceError;

/// Errors that can occur while generating from stored templates.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A stored formula on a template does not parse.
    #[error("template \"{template}\": invalid {field}: {source}")]
    InvalidDiceExpression {
        /// Name of the template holding the formula.
        template: String,
        /// Which formula failed, e.g. `stat STR`.
        field: String,
        /// The parse failure.
        #[source]
        source: DiceError,
    },

    /// A template or link refers to an id the source does not know.
    #[error("unknown template: {0}")]
    UnknownTemplate(TemplateId),

    /// Spirits and cults are nested deeper than the configured limit,
    /// usually because of a cyclic link.
    #[error("template \"{template}\" nested deeper than {depth} levels")]
    RecursionLimit {
        /// The template that would have exceeded the limit.
        template: String,
        /// The configured limit.
        depth: u32,
    },
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
