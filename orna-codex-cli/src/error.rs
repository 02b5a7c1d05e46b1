use orna_codex_catalog::DatasetError;
use orna_codex_lib::CodexError;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Dataset loading failed
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Engine error (missing language, bad key, settings)
    #[error(transparent)]
    Codex(#[from] CodexError),

    /// Datasets loaded but no catalog could be built from them
    #[error("Could not build catalog: {0}")]
    Load(String),

    /// No entry with the requested key
    #[error("No codex entry: {0}")]
    NotFound(String),

    /// Unknown option set name
    #[error("Unknown option set: {0}")]
    UnknownFacet(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    pub(crate) fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub(crate) fn unknown_facet(msg: impl Into<String>) -> Self {
        Self::UnknownFacet(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
