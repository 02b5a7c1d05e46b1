pub(crate) mod browse;
pub(crate) mod config;
pub(crate) mod facets;
pub(crate) mod languages;
pub(crate) mod search;
pub(crate) mod show;

use std::path::PathBuf;
use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use orna_codex_catalog::{CatalogItem, ScalarField, load_datasets_async};
use orna_codex_lib::settings::{self, UserSettings};
use orna_codex_lib::{Action, AppState, Catalog, FilterClause, RowWindow};

use crate::cli_types::FilterArgs;
use crate::error::CliError;

/// Settings plus the resolved data directory for one invocation.
pub(crate) struct Session {
    pub settings: UserSettings,
    pub data_dir: PathBuf,
}

impl Session {
    /// Saved settings with command-line overrides applied (not persisted).
    pub(crate) fn new(data_dir: Option<PathBuf>, language: Option<String>) -> Self {
        let mut settings = settings::load_settings();
        if let Some(code) = language {
            settings.set_language(&code);
        }
        let data_dir = settings::resolve_data_dir(data_dir, &settings);
        Self { settings, data_dir }
    }

    /// Load every wanted language and build a ready [`AppState`].
    pub(crate) async fn load_state(&self) -> Result<AppState, CliError> {
        let state = AppState::new(&self.settings);
        log::debug!(
            "Loading {:?} from {}",
            state.wanted_languages(),
            self.data_dir.display()
        );
        let datasets = load_datasets_async(
            &self.data_dir,
            &state.language,
            &state.secondary_languages,
        )
        .await?;
        let state = state.apply(Action::Initialized(Arc::new(datasets)));
        if let Some(message) = &state.load_error {
            return Err(CliError::load(message.clone()));
        }
        Ok(state)
    }
}

/// Build a current-thread runtime for one command.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::runtime(e.to_string()))
}

/// Apply the command-line filter clauses to `state`.
pub(crate) fn apply_filters(mut state: AppState, filters: &[FilterClause]) -> AppState {
    for clause in filters {
        state = state.apply(Action::FilterInserted(clause.clone()));
    }
    state
}

/// Row window for the requested view mode.
pub(crate) fn window_for(args: &FilterArgs, total: usize) -> RowWindow {
    if !args.list {
        return RowWindow::table();
    }
    let mut window = RowWindow::list();
    for _ in 0..args.more {
        if !window.load_more(total) {
            break;
        }
    }
    window
}

/// Print the visible slice of the current rows with an "N / M" footer.
pub(crate) fn print_rows(state: &AppState, window: &RowWindow) {
    let Some(catalog) = state.catalog.as_deref() else {
        return;
    };
    let rows = state.rows();
    for item in window.slice(&rows) {
        print_row(catalog, item);
    }
    log::info!(
        "{}",
        window
            .label(rows.len())
            .if_supports_color(Stdout, |t| t.dimmed())
    );
    if window.has_more(rows.len()) {
        log::info!(
            "{}",
            "(use --more to load more)".if_supports_color(Stdout, |t| t.dimmed())
        );
    }
}

fn print_row(catalog: &Catalog, item: &CatalogItem) {
    let tier = item
        .scalar(ScalarField::Tier)
        .map(|t| format!("★{t}"))
        .unwrap_or_default();
    log::info!(
        "  {:<4} {} {} {}",
        tier,
        item.name.if_supports_color(Stdout, |t| t.bold()),
        catalog
            .i18n()
            .category_label(item.category())
            .if_supports_color(Stdout, |t| t.cyan()),
        item.key.if_supports_color(Stdout, |t| t.dimmed()),
    );
}
