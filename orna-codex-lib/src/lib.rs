//! Codex engine: normalization, facets, filtering, and cross-references.
//!
//! Frontends load datasets with `orna_codex_catalog`, then drive an
//! [`AppState`] with [`Action`]s or call the stages directly:
//! [`normalize`] → [`build_facet_options`] → [`evaluate`] → [`resolve_detail`].

pub mod debounce;
pub mod display;
pub mod error;
pub mod facets;
pub mod filter;
pub mod normalize;
pub mod resolve;
pub mod settings;
pub mod store;

pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use display::RowWindow;
pub use error::CodexError;
pub use facets::{Facet, FacetOption, FacetOptionSet, FacetOptions, build_facet_options};
pub use filter::{ClauseKind, FilterClause, FilterResult, FilterState, Matcher, evaluate};
pub use normalize::{Catalog, Localization, normalize};
pub use resolve::{ExternalLinks, RelationEntry, ResolvedDetailView, SpellStatus, resolve_detail};
pub use settings::UserSettings;
pub use store::{Action, AppState};

#[cfg(test)]
#[path = "tests/fixtures.rs"]
pub(crate) mod test_fixtures;
