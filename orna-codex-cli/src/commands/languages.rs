use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use orna_codex_catalog::{available_languages, language_label};

use super::Session;
use crate::error::CliError;

/// List the dataset files found in the data directory.
pub(crate) fn run_languages(session: &Session) -> Result<(), CliError> {
    let languages = available_languages(&session.data_dir)?;
    log::info!(
        "Languages in {}:",
        session
            .data_dir
            .display()
            .if_supports_color(Stdout, |t| t.cyan())
    );
    if languages.is_empty() {
        log::info!("  (none)");
        return Ok(());
    }

    let wanted = session.settings.languages();
    for code in &languages {
        let marker = if *code == session.settings.language {
            "active".if_supports_color(Stdout, |t| t.green()).to_string()
        } else if wanted.contains(code) {
            "search".if_supports_color(Stdout, |t| t.dimmed()).to_string()
        } else {
            String::new()
        };
        log::info!(
            "  {:<8} {:<10} {}",
            code.if_supports_color(Stdout, |t| t.bold()),
            language_label(code).unwrap_or(""),
            marker,
        );
    }

    for code in &wanted {
        if !languages.contains(code) {
            log::warn!("{} is configured but has no dataset file", code);
        }
    }
    Ok(())
}
