//! Application state and its transitions.
//!
//! Frontends hold one [`AppState`] and feed it [`Action`]s. Every transition
//! is a pure function of the old state and the action: the catalog and facet
//! options are rebuilt wholesale when the data or language changes, and the
//! row list is re-evaluated in full whenever the catalog or filters change.

use std::sync::Arc;

use orna_codex_catalog::{CatalogItem, Datasets};

use crate::facets::{FacetOptions, build_facet_options};
use crate::filter::{FilterClause, FilterState, matching_indices};
use crate::normalize::{Catalog, normalize};
use crate::settings::UserSettings;

/// A discrete event that changes [`AppState`].
#[derive(Debug, Clone)]
pub enum Action {
    /// All requested language documents finished loading.
    Initialized(Arc<Datasets>),
    /// Loading failed before any catalog could be built.
    LoadFailed(String),
    LanguageChanged {
        language: String,
        secondary_languages: Vec<String>,
    },
    /// Raw search box text (normalized on entry).
    SearchUpdated(String),
    FilterInserted(FilterClause),
    FilterUpdated { index: usize, clause: FilterClause },
    FilterDeleted(usize),
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Waiting for datasets (initially, or after switching to a language
    /// that isn't loaded yet).
    pub loading: bool,
    pub load_error: Option<String>,
    pub language: String,
    pub secondary_languages: Vec<String>,
    pub datasets: Option<Arc<Datasets>>,
    pub catalog: Option<Arc<Catalog>>,
    pub options: Option<Arc<FacetOptions>>,
    pub filters: FilterState,
    rows: Vec<usize>,
}

impl AppState {
    /// Fresh state waiting for the languages named in `settings`.
    pub fn new(settings: &UserSettings) -> Self {
        Self {
            loading: true,
            language: settings.language.clone(),
            secondary_languages: settings.secondary_languages.clone(),
            ..Self::default()
        }
    }

    /// Every language this state wants loaded, active first.
    pub fn wanted_languages(&self) -> Vec<String> {
        let mut out = vec![self.language.clone()];
        for code in &self.secondary_languages {
            if !out.contains(code) {
                out.push(code.clone());
            }
        }
        out
    }

    pub fn apply(mut self, action: Action) -> Self {
        match action {
            Action::Initialized(datasets) => {
                log::debug!("store: initialized with {} languages", datasets.len());
                self.loading = false;
                self.datasets = Some(datasets);
                self.rebuild();
            }
            Action::LoadFailed(message) => {
                self.loading = false;
                self.load_error = Some(message);
                self.catalog = None;
                self.options = None;
                self.rows.clear();
            }
            Action::LanguageChanged {
                language,
                secondary_languages,
            } => {
                self.language = language;
                self.secondary_languages = secondary_languages;
                let loaded = self.datasets.as_ref().is_some_and(|d| {
                    self.wanted_languages().iter().all(|l| d.contains(l))
                });
                if loaded {
                    self.rebuild();
                } else {
                    log::debug!("store: {} not loaded, waiting for data", self.language);
                    self.loading = true;
                }
            }
            Action::SearchUpdated(raw) => {
                self.filters.query = FilterState::normalize_query(&raw);
                self.refilter();
            }
            Action::FilterInserted(clause) => {
                self.filters.clauses.push(clause);
                self.refilter();
            }
            Action::FilterUpdated { index, clause } => {
                match self.filters.clauses.get_mut(index) {
                    Some(slot) => *slot = clause,
                    None => log::warn!("store: no filter clause at index {}", index),
                }
                self.refilter();
            }
            Action::FilterDeleted(index) => {
                if index < self.filters.clauses.len() {
                    self.filters.clauses.remove(index);
                } else {
                    log::warn!("store: no filter clause at index {}", index);
                }
                self.refilter();
            }
        }
        self
    }

    fn rebuild(&mut self) {
        let Some(datasets) = self.datasets.as_deref() else {
            return;
        };
        match normalize(datasets, &self.language) {
            Ok(catalog) => {
                self.options = Some(Arc::new(build_facet_options(&catalog)));
                self.catalog = Some(Arc::new(catalog));
                self.load_error = None;
            }
            Err(e) => {
                log::error!("{}", e);
                self.catalog = None;
                self.options = None;
                self.load_error = Some(e.to_string());
            }
        }
        self.refilter();
    }

    fn refilter(&mut self) {
        self.rows = match &self.catalog {
            Some(catalog) => matching_indices(catalog.items(), &self.filters),
            None => Vec::new(),
        };
    }

    /// Matching items in canonical order.
    pub fn rows(&self) -> Vec<&CatalogItem> {
        match &self.catalog {
            Some(catalog) => self.rows.iter().map(|&i| &catalog.items()[i]).collect(),
            None => Vec::new(),
        }
    }

    pub fn total_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_ready(&self) -> bool {
        !self.loading && self.catalog.is_some()
    }
}
