use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use orna_codex_lib::Action;

use super::{Session, apply_filters, print_rows, runtime, window_for};
use crate::cli_types::FilterArgs;
use crate::error::CliError;

/// Run a single search and print the matching rows.
pub(crate) fn run_search(
    session: &Session,
    query: Option<String>,
    args: &FilterArgs,
) -> Result<(), CliError> {
    let state = runtime()?.block_on(session.load_state())?;
    let mut state = apply_filters(state, &args.filters);
    if let Some(query) = query {
        state = state.apply(Action::SearchUpdated(query));
    }

    let total = state.total_count();
    if total == 0 {
        log::info!(
            "{}",
            "No matching entries".if_supports_color(Stdout, |t| t.yellow())
        );
        return Ok(());
    }

    let window = window_for(args, total);
    print_rows(&state, &window);
    Ok(())
}
