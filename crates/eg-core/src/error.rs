use crate::template::TemplateId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when loading or querying a template library.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Two templates share the same identifier.
    #[error("duplicate template id: {0}")]
    DuplicateId(TemplateId),

    /// A template with the same name already exists.
    #[error("template already exists: \"{0}\"")]
    DuplicateName(String),

    /// No template matches the given name or id.
    #[error("template not found: \"{0}\"")]
    TemplateNotFound(String),

    /// No party matches the given name.
    #[error("party not found: \"{0}\"")]
    PartyNotFound(String),

    /// The library file is not valid JSON for the expected schema.
    #[error("invalid library JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The library file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The path that failed to load.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
