//! Catalog normalization.
//!
//! Flattens the active language's document into a sorted list of
//! [`CatalogItem`]s and builds the cross-language search text for each entry.
//! The result is rebuilt wholesale on every language switch.

use std::collections::{BTreeMap, HashMap};

use orna_codex_catalog::{CatalogItem, CompositeKey, Datasets, LanguageDocument};

use crate::error::CodexError;

/// Separator between per-language names in [`CatalogItem::search_text`].
pub const SEARCH_DELIMITER: &str = "|";

/// UI labels taken from the active language's document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Localization {
    pub text: BTreeMap<String, String>,
    pub category: BTreeMap<String, String>,
}

impl Localization {
    fn from_document(document: &LanguageDocument) -> Self {
        Self {
            text: document.text.clone(),
            category: document.category.clone(),
        }
    }

    /// Label for a text key, falling back to the key itself.
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.text.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Localized category label, falling back to the category key.
    pub fn category_label<'a>(&'a self, category: &'a str) -> &'a str {
        self.category
            .get(category)
            .map(String::as_str)
            .unwrap_or(category)
    }
}

/// The normalized, searchable item collection for one active language.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    language: String,
    languages: Vec<String>,
    items: Vec<CatalogItem>,
    by_key: HashMap<CompositeKey, usize>,
    i18n: Localization,
    source_options: BTreeMap<String, Vec<String>>,
    missing_translations: usize,
}

impl Catalog {
    /// Active display language.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Languages whose names were folded into the search text.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Items in canonical order (sorted by composite key).
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by composite key.
    pub fn get(&self, key: &CompositeKey) -> Option<&CatalogItem> {
        self.index_of(key).map(|i| &self.items[i])
    }

    /// Look up an item by category and id.
    pub fn get_by(&self, category: &str, id: &str) -> Option<&CatalogItem> {
        self.get(&CompositeKey::new(category, id))
    }

    /// Position of an item in canonical order.
    pub fn index_of(&self, key: &CompositeKey) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    pub fn i18n(&self) -> &Localization {
        &self.i18n
    }

    /// Precomputed facet lists shipped with the active document.
    pub fn source_options(&self) -> &BTreeMap<String, Vec<String>> {
        &self.source_options
    }

    /// How many (item, secondary language) pairs had no name to search by.
    pub fn missing_translations(&self) -> usize {
        self.missing_translations
    }
}

/// Build the catalog for `language` from all loaded documents.
///
/// Fails if `language` has no document. Secondary languages that lack an
/// entry only shrink that entry's search text.
pub fn normalize(datasets: &Datasets, language: &str) -> Result<Catalog, CodexError> {
    let active = datasets
        .get(language)
        .ok_or_else(|| CodexError::missing_active_language(language))?;

    let mut items = Vec::with_capacity(active.item_count());
    let mut missing_translations = 0usize;

    for (category, entries) in &active.codex {
        for (id, raw) in entries {
            let mut names = Vec::with_capacity(datasets.len());
            for (other_language, document) in datasets.iter() {
                match document.item(category, id).and_then(|i| i.name.as_deref()) {
                    Some(name) => names.push(name.to_lowercase()),
                    None => {
                        if other_language != language {
                            missing_translations += 1;
                            log::debug!("{category}:{id} has no name in {other_language}");
                        }
                    }
                }
            }

            let name = raw.name.clone().unwrap_or_else(|| {
                log::debug!("{category}:{id} has no name in {language}");
                String::new()
            });

            items.push(CatalogItem {
                key: CompositeKey::new(category.as_str(), id.as_str()),
                name,
                search_text: names.join(SEARCH_DELIMITER),
                fields: raw.clone(),
            });
        }
    }

    items.sort_by(|a, b| a.key.cmp(&b.key));

    let by_key = items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.key.clone(), i))
        .collect();

    if missing_translations > 0 {
        log::warn!(
            "{} entries are missing from secondary languages; search falls back to {} for them",
            missing_translations,
            language
        );
    }
    log::info!(
        "Normalized {} codex entries for {} ({} languages searchable)",
        items.len(),
        language,
        datasets.len()
    );

    Ok(Catalog {
        language: language.to_string(),
        languages: datasets.languages().map(str::to_string).collect(),
        items,
        by_key,
        i18n: Localization::from_document(active),
        source_options: active
            .options
            .iter()
            .map(|(k, v)| (k.clone(), v.0.clone()))
            .collect(),
        missing_translations,
    })
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
