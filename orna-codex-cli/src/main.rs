//! orna-codex CLI
//!
//! Command-line interface for searching and browsing the Orna codex.

mod cli_types;
mod commands;
mod error;

use std::io::Write;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::Session;
use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logger(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let session = || Session::new(cli.data_dir.clone(), cli.language.clone());

    match &cli.command {
        Commands::Search { query, filter } => {
            commands::search::run_search(&session(), query.clone(), filter)
        }
        Commands::Browse { filter } => commands::browse::run_browse(&session(), filter),
        Commands::Show { key } => commands::show::run_show(&session(), key),
        Commands::Facets { facet } => commands::facets::run_facets(&session(), facet.as_deref()),
        Commands::Languages => commands::languages::run_languages(&session()),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::SetLanguage { code } => commands::config::run_config_set_language(code),
            ConfigAction::SetDataDir { path } => {
                commands::config::run_config_set_data_dir(path.clone())
            }
        },
    }
}

/// Route `log` output to stdout.
///
/// Normal runs print bare info lines (the CLI's human output); `--verbose`
/// adds timestamps and debug messages, `--quiet` keeps warnings and errors.
/// `RUST_LOG` overrides the level.
fn init_logger(quiet: bool, verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else if quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .target(env_logger::Target::Stdout);
    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(
                buf,
                "{}: {}",
                level.as_str().to_lowercase(),
                record.args()
            ),
        });
    }
    builder.parse_default_env();
    builder.init();
}
