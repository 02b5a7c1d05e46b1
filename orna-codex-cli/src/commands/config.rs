use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use orna_codex_catalog::language_label;
use orna_codex_lib::settings::{self, load_settings, save_settings, settings_path};

use crate::error::CliError;

/// Show the saved settings and where they live.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = settings_path();
    log::info!(
        "{}",
        "Codex Settings".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    let current = load_settings();
    for line in settings::settings_string(&current)?.lines() {
        log::info!("  {}", line);
    }
    log::info!(
        "  {} {}",
        "data directory in use:".if_supports_color(Stdout, |t| t.dimmed()),
        settings::resolve_data_dir(None, &current).display()
    );
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

/// Save a new display language.
pub(crate) fn run_config_set_language(code: &str) -> Result<(), CliError> {
    if language_label(code).is_none() {
        log::warn!(
            "{} is not a known language; it will only work if {}.json exists",
            code,
            code
        );
    }
    let mut current = load_settings();
    current.set_language(code);
    save_settings(&current)?;
    log::info!(
        "Display language set to {} (searching {})",
        code.if_supports_color(Stdout, |t| t.bold()),
        current.languages().join(", ")
    );
    Ok(())
}

/// Save the dataset directory.
pub(crate) fn run_config_set_data_dir(path: PathBuf) -> Result<(), CliError> {
    if !path.is_dir() {
        log::warn!("{} is not a directory (yet)", path.display());
    }
    let mut current = load_settings();
    current.data_dir = Some(path);
    save_settings(&current)?;
    log::info!(
        "{} {}",
        "Saved to".if_supports_color(Stdout, |t| t.green()),
        settings_path().display()
    );
    Ok(())
}
