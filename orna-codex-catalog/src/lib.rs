//! Codex data model types and per-language JSON dataset loading.
//!
//! This crate defines what an exported codex looks like on disk and what a
//! normalized entry looks like in memory. It has no knowledge of filtering
//! or presentation; `orna-codex-lib` builds those on top.

pub mod dataset;
pub mod languages;
pub mod types;

pub use dataset::{
    DatasetError, Datasets, available_languages, dataset_path, load_datasets,
    load_datasets_async, load_document,
};
pub use languages::{DEFAULT_LANGUAGE, LANGUAGES, language_label};
pub use types::*;
