//! JSON loading for per-language codex datasets.
//!
//! Each language lives in its own `<lang>.json` file inside the data
//! directory. The active language must load; secondary languages only feed
//! cross-language search, so a missing or broken secondary file is logged and
//! skipped.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use futures::future::join_all;
use thiserror::Error;

use crate::types::LanguageDocument;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("Directory not found: {0}")]
    DirNotFound(String),
    #[error("No dataset for active language '{0}'")]
    MissingActiveLanguage(String),
}

impl DatasetError {
    /// True when the error means the file simply isn't there.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// All loaded language documents, keyed by language code.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    documents: BTreeMap<String, LanguageDocument>,
}

impl Datasets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, language: impl Into<String>, document: LanguageDocument) {
        self.documents.insert(language.into(), document);
    }

    pub fn with(mut self, language: impl Into<String>, document: LanguageDocument) -> Self {
        self.insert(language, document);
        self
    }

    pub fn get(&self, language: &str) -> Option<&LanguageDocument> {
        self.documents.get(language)
    }

    pub fn contains(&self, language: &str) -> bool {
        self.documents.contains_key(language)
    }

    /// Loaded language codes in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageDocument)> {
        self.documents.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Path of the dataset file for `language` inside `dir`.
pub fn dataset_path(dir: &Path, language: &str) -> PathBuf {
    dir.join(format!("{language}.json"))
}

/// Parse a single language document from a file.
pub fn load_document(path: &Path) -> Result<LanguageDocument, DatasetError> {
    let contents = std::fs::read_to_string(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_document(path, &contents)
}

fn parse_document(path: &Path, contents: &str) -> Result<LanguageDocument, DatasetError> {
    serde_json::from_str(contents).map_err(|e| DatasetError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load the active language plus any secondary languages from `dir`.
///
/// Fails if the directory is missing or the active language can't be loaded.
/// Secondary languages that fail are logged and left out.
pub fn load_datasets(
    dir: &Path,
    active: &str,
    secondary: &[String],
) -> Result<Datasets, DatasetError> {
    check_dir(dir)?;

    let mut datasets = Datasets::new();
    for language in languages_to_load(active, secondary) {
        let result = load_document(&dataset_path(dir, language));
        accept(&mut datasets, active, language, result)?;
    }
    Ok(datasets)
}

/// Async variant of [`load_datasets`]: all files are read concurrently and
/// every read completes before anything is returned.
pub async fn load_datasets_async(
    dir: &Path,
    active: &str,
    secondary: &[String],
) -> Result<Datasets, DatasetError> {
    check_dir(dir)?;

    let languages = languages_to_load(active, secondary);
    let reads = languages.iter().map(|language| async move {
        let path = dataset_path(dir, language);
        let result = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => parse_document(&path, &contents),
            Err(e) => Err(DatasetError::Io {
                path: path.display().to_string(),
                source: e,
            }),
        };
        (*language, result)
    });

    let mut datasets = Datasets::new();
    for (language, result) in join_all(reads).await {
        accept(&mut datasets, active, language, result)?;
    }
    Ok(datasets)
}

/// List the language codes that have a dataset file in `dir`.
pub fn available_languages(dir: &Path) -> Result<Vec<String>, DatasetError> {
    check_dir(dir)?;
    let mut languages: Vec<String> = std::fs::read_dir(dir)
        .map_err(|e| DatasetError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(str::to_string))
        .collect();
    languages.sort();
    Ok(languages)
}

fn check_dir(dir: &Path) -> Result<(), DatasetError> {
    if !dir.is_dir() {
        return Err(DatasetError::DirNotFound(dir.display().to_string()));
    }
    Ok(())
}

/// Active language first, then secondaries in order, without duplicates.
fn languages_to_load<'a>(active: &'a str, secondary: &'a [String]) -> Vec<&'a str> {
    let mut languages = vec![active];
    for language in secondary {
        if !languages.contains(&language.as_str()) {
            languages.push(language);
        }
    }
    languages
}

fn accept(
    datasets: &mut Datasets,
    active: &str,
    language: &str,
    result: Result<LanguageDocument, DatasetError>,
) -> Result<(), DatasetError> {
    match result {
        Ok(document) => {
            log::debug!(
                "Loaded dataset {} ({} items)",
                language,
                document.item_count()
            );
            datasets.insert(language, document);
            Ok(())
        }
        Err(e) if language == active => {
            if e.is_not_found() {
                Err(DatasetError::MissingActiveLanguage(active.to_string()))
            } else {
                Err(e)
            }
        }
        Err(e) => {
            log::warn!("Skipping secondary language {language}: {e}");
            Ok(())
        }
    }
}
