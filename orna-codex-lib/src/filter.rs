//! Filter evaluation over a normalized catalog.
//!
//! A [`FilterState`] is a search query plus an ordered list of independent
//! clauses. Every active predicate must hold for an item to be kept; two
//! clauses of the same kind both apply. Clauses are plain data (kind name and
//! value) and are compiled into [`Matcher`]s on each evaluation, so a clause
//! naming an unknown kind is dropped without affecting the rest.

use std::fmt;
use std::str::FromStr;

use orna_codex_catalog::{CatalogItem, ScalarField, StatusRelation};
use serde::{Deserialize, Serialize};

use crate::error::CodexError;
use crate::facets::Facet;

// ── Clause kinds ────────────────────────────────────────────────────────────

/// The closed set of filter clause kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClauseKind {
    Category,
    Tag,
    Tier,
    Family,
    Rarity,
    Event,
    Place,
    Useable,
    Cause,
    Cure,
    Give,
    Immunity,
}

impl ClauseKind {
    pub fn all() -> &'static [ClauseKind] {
        &[
            ClauseKind::Category,
            ClauseKind::Tag,
            ClauseKind::Tier,
            ClauseKind::Family,
            ClauseKind::Rarity,
            ClauseKind::Event,
            ClauseKind::Place,
            ClauseKind::Useable,
            ClauseKind::Cause,
            ClauseKind::Cure,
            ClauseKind::Give,
            ClauseKind::Immunity,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Tag => "tag",
            Self::Tier => "tier",
            Self::Family => "family",
            Self::Rarity => "rarity",
            Self::Event => "event",
            Self::Place => "place",
            Self::Useable => "useable",
            Self::Cause => "cause",
            Self::Cure => "cure",
            Self::Give => "give",
            Self::Immunity => "immunity",
        }
    }

    /// Key into the localized `text` map for this kind's label.
    pub fn text_key(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Tag => "tags",
            Self::Tier => "tier",
            Self::Family => "family",
            Self::Rarity => "rarity",
            Self::Event => "event",
            Self::Place => "place",
            Self::Useable => "useableBy",
            Self::Cause => "causes",
            Self::Cure => "cures",
            Self::Give => "gives",
            Self::Immunity => "immunities",
        }
    }

    /// Facet whose option set supplies values for this kind.
    pub fn facet(&self) -> Facet {
        match self {
            Self::Category => Facet::Category,
            Self::Tag => Facet::Tags,
            Self::Tier => Facet::Tiers,
            Self::Family => Facet::Families,
            Self::Rarity => Facet::Rarities,
            Self::Event => Facet::Events,
            Self::Place => Facet::Places,
            Self::Useable => Facet::Useables,
            Self::Cause | Self::Cure | Self::Give | Self::Immunity => Facet::Statuses,
        }
    }

    /// Build the matcher for `value` under this kind.
    pub fn matcher(&self, value: impl Into<String>) -> Matcher {
        let value = value.into();
        let scalar = |field| Matcher::Scalar { field, value: value.clone() };
        let status = |relation| Matcher::StatusRelation {
            relation,
            value: value.clone(),
        };
        match self {
            Self::Category => scalar(ScalarField::Category),
            Self::Tier => scalar(ScalarField::Tier),
            Self::Family => scalar(ScalarField::Family),
            Self::Rarity => scalar(ScalarField::Rarity),
            Self::Event => scalar(ScalarField::Event),
            Self::Place => scalar(ScalarField::Place),
            Self::Useable => scalar(ScalarField::UseableBy),
            Self::Tag => Matcher::MultiValued {
                value: value.clone(),
            },
            Self::Cause => status(StatusRelation::Causes),
            Self::Cure => status(StatusRelation::Cures),
            Self::Give => status(StatusRelation::Gives),
            Self::Immunity => status(StatusRelation::Immunities),
        }
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClauseKind {
    type Err = CodexError;

    /// Accepts the clause name, its plural facet name, or its text key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|k| {
                k.name() == lower
                    || k.facet().name() == lower && k.facet() != Facet::Statuses
                    || k.text_key().to_lowercase() == lower
            })
            .ok_or_else(|| CodexError::unknown_clause(s))
    }
}

// ── Matchers ────────────────────────────────────────────────────────────────

/// A compiled predicate over one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Exact equality on a single-valued field.
    Scalar { field: ScalarField, value: String },
    /// Membership in the item's tags.
    MultiValued { value: String },
    /// Any entry of the given status relation has this name.
    StatusRelation {
        relation: StatusRelation,
        value: String,
    },
}

impl Matcher {
    pub fn matches(&self, item: &CatalogItem) -> bool {
        match self {
            Self::Scalar { field, value } => item.scalar(*field) == Some(value.as_str()),
            Self::MultiValued { value } => item.tags().iter().any(|t| t == value),
            Self::StatusRelation { relation, value } => {
                item.statuses(*relation).iter().any(|s| &s.name == value)
            }
        }
    }
}

// ── Filter state ────────────────────────────────────────────────────────────

/// One filter row: a clause kind name and the selected value.
///
/// A clause without a value (or with an empty one) is inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterClause {
    pub facet: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl FilterClause {
    pub fn new(facet: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            facet: facet.into(),
            value: Some(value.into()),
        }
    }

    /// A clause with a kind picked but no value yet.
    pub fn unset(facet: impl Into<String>) -> Self {
        Self {
            facet: facet.into(),
            value: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.is_empty())
    }

    pub fn kind(&self) -> Result<ClauseKind, CodexError> {
        self.facet.parse()
    }

    /// Compile into a matcher. `Ok(None)` for inactive clauses.
    pub fn matcher(&self) -> Result<Option<Matcher>, CodexError> {
        if !self.is_active() {
            return Ok(None);
        }
        let kind = self.kind()?;
        Ok(self.value.as_deref().map(|v| kind.matcher(v)))
    }
}

impl FromStr for FilterClause {
    type Err = CodexError;

    /// Parses `kind=value` (as given on a command line).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (facet, value) = s
            .split_once('=')
            .ok_or_else(|| CodexError::unknown_clause(s))?;
        let clause = FilterClause::new(facet.trim(), value.trim());
        clause.kind()?;
        Ok(clause)
    }
}

/// The active query: search text plus independent clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Trimmed, lowercased search text.
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub clauses: Vec<FilterClause>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize raw search box input.
    pub fn normalize_query(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    pub fn with_query(mut self, raw: &str) -> Self {
        self.query = Self::normalize_query(raw);
        self
    }

    pub fn with_clause(mut self, clause: FilterClause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Number of predicates that currently constrain the result.
    pub fn active_count(&self) -> usize {
        let query = usize::from(!Self::normalize_query(&self.query).is_empty());
        query + self.clauses.iter().filter(|c| c.is_active()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

// ── Evaluation ──────────────────────────────────────────────────────────────

/// Filtered rows in canonical order with the untruncated match count.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResult<'a> {
    pub rows: Vec<&'a CatalogItem>,
    pub total_count: usize,
}

struct CompiledFilter {
    query: Option<String>,
    matchers: Vec<Matcher>,
}

impl CompiledFilter {
    fn compile(state: &FilterState) -> Self {
        let query = FilterState::normalize_query(&state.query);
        let matchers = state
            .clauses
            .iter()
            .filter_map(|clause| match clause.matcher() {
                Ok(m) => m,
                Err(e) => {
                    log::warn!("Ignoring filter clause {:?}: {}", clause, e);
                    None
                }
            })
            .collect();
        Self {
            query: (!query.is_empty()).then_some(query),
            matchers,
        }
    }

    fn matches(&self, item: &CatalogItem) -> bool {
        if let Some(q) = &self.query
            && !item.search_text.contains(q.as_str())
        {
            return false;
        }
        self.matchers.iter().all(|m| m.matches(item))
    }
}

/// Positions (in `items`) of every item matching `state`.
pub fn matching_indices(items: &[CatalogItem], state: &FilterState) -> Vec<usize> {
    let compiled = CompiledFilter::compile(state);
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| compiled.matches(item))
        .map(|(i, _)| i)
        .collect()
}

/// Evaluate `state` against `items`, keeping canonical order.
pub fn evaluate<'a>(items: &'a [CatalogItem], state: &FilterState) -> FilterResult<'a> {
    let rows: Vec<&CatalogItem> = matching_indices(items, state)
        .into_iter()
        .map(|i| &items[i])
        .collect();
    let total_count = rows.len();
    FilterResult { rows, total_count }
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
