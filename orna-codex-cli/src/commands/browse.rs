//! Line-driven search: each stdin line replaces the query, and only the
//! last line of a quick burst is evaluated.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use orna_codex_lib::{Action, AppState, Debouncer, SEARCH_DEBOUNCE};

use super::{Session, apply_filters, print_rows, runtime, window_for};
use crate::cli_types::FilterArgs;
use crate::error::CliError;

pub(crate) fn run_browse(session: &Session, args: &FilterArgs) -> Result<(), CliError> {
    runtime()?.block_on(browse(session, args))
}

async fn browse(session: &Session, args: &FilterArgs) -> Result<(), CliError> {
    let mut state = apply_filters(session.load_state().await?, &args.filters);
    log::info!(
        "{} entries loaded; type to search, Ctrl-D to quit",
        state.total_count()
    );

    let (settled_tx, mut settled_rx) = mpsc::unbounded_channel::<String>();
    let debouncer = Debouncer::spawn(SEARCH_DEBOUNCE, move |query: String| {
        forward_settled(&settled_tx, query);
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    debouncer.push(line);
                }
                None => break,
            },
            Some(query) = settled_rx.recv() => {
                state = show(state, query, args);
            }
        }
    }

    // Flush the last query typed before EOF.
    debouncer.finish().await;
    while let Some(query) = settled_rx.recv().await {
        state = show(state, query, args);
    }
    Ok(())
}

/// Hand a settled query back to the browse loop.
///
/// Returns false if the loop has already stopped listening.
fn forward_settled(tx: &mpsc::UnboundedSender<String>, query: String) -> bool {
    match tx.send(query) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("browse loop gone, dropping settled query '{}'", e.0);
            false
        }
    }
}

fn show(state: AppState, query: String, args: &FilterArgs) -> AppState {
    let state = state.apply(Action::SearchUpdated(query));
    log::info!(
        "{} {}",
        "search:".if_supports_color(Stdout, |t| t.bold()),
        state.filters.query
    );
    let window = window_for(args, state.total_count());
    print_rows(&state, &window);
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_queries_reach_the_loop() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        assert!(forward_settled(&tx, "drag".to_string()));
        assert_eq!(rx.try_recv().unwrap(), "drag");
    }

    #[test]
    fn settled_query_after_loop_exit_is_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        assert!(!forward_settled(&tx, "drag".to_string()));
    }
}
