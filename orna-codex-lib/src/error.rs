use orna_codex_catalog::{CompositeKey, DatasetError, KeyParseError, Relation};
use thiserror::Error;

/// Errors produced by the codex engine.
#[derive(Debug, Error)]
pub enum CodexError {
    /// The active language has no loaded document; nothing can be shown.
    #[error("No dataset loaded for active language '{0}'")]
    MissingActiveLanguageData(String),

    /// A relation entry points at a key that isn't in the catalog.
    #[error("Dangling {} reference to {key}", .relation.field_name())]
    DanglingReference { relation: Relation, key: CompositeKey },

    /// A filter clause names a facet the engine doesn't know.
    #[error("Unknown filter clause type: {0}")]
    UnknownFilterClauseType(String),

    /// A navigation key couldn't be parsed.
    #[error(transparent)]
    InvalidCompositeKey(#[from] KeyParseError),

    /// Dataset loading failed
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Settings could not be read or written
    #[error("Settings error: {0}")]
    Settings(String),
}

impl CodexError {
    pub fn missing_active_language(language: impl Into<String>) -> Self {
        Self::MissingActiveLanguageData(language.into())
    }

    pub fn unknown_clause(name: impl Into<String>) -> Self {
        Self::UnknownFilterClauseType(name.into())
    }

    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    /// Whether the error should stop the UI from showing a catalog at all.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingActiveLanguageData(_) | Self::Dataset(_))
    }
}
