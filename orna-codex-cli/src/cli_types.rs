//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use orna_codex_lib::FilterClause;

#[derive(Parser)]
#[command(name = "orna-codex")]
#[command(about = "Search and browse the Orna codex", long_about = None)]
pub(crate) struct Cli {
    /// Directory holding <language>.json dataset files (defaults to saved setting, then ./data)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Display language for this run (e.g., en, zh-hans)
    #[arg(short = 'L', long, global = true)]
    pub language: Option<String>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Query arguments shared by `search` and `browse`.
#[derive(Args, Clone)]
pub(crate) struct FilterArgs {
    /// Filter clause as kind=value (e.g., tag=Weapon, tier=7, cause=Poison); repeatable
    #[arg(short, long = "filter", value_name = "KIND=VALUE")]
    pub filters: Vec<FilterClause>,

    /// Show results as a growing list instead of a table
    #[arg(long)]
    pub list: bool,

    /// Number of "load more" steps to apply in list mode
    #[arg(long, default_value_t = 0, requires = "list")]
    pub more: usize,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Search the codex by name (any loaded language) and filter clauses
    Search {
        /// Search text (case-insensitive substring)
        query: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Read search queries from stdin, one per line, debounced
    Browse {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show the detail view for an entry (e.g., items:dragon-sword)
    Show {
        /// Composite key as category:id or category/id
        key: String,
    },

    /// List filter options
    Facets {
        /// Only this option set (category, tags, statuses, tiers, ..., type, language)
        facet: Option<String>,
    },

    /// List languages with a dataset in the data directory
    Languages,

    /// Manage saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the current settings
    Show,

    /// Print the settings file path
    Path,

    /// Save the display language (the previous one stays searchable)
    SetLanguage {
        /// Language code (e.g., en, zh-hans)
        code: String,
    },

    /// Save the dataset directory
    SetDataDir {
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_collects_repeated_filters() {
        let cli = Cli::try_parse_from([
            "orna-codex", "search", "drag", "-f", "tag=Weapon", "--filter", "cause=Poison",
        ])
        .unwrap();
        let Commands::Search { query, filter } = cli.command else {
            panic!("expected search");
        };
        assert_eq!(query.as_deref(), Some("drag"));
        assert_eq!(
            filter.filters,
            vec![
                FilterClause::new("tag", "Weapon"),
                FilterClause::new("cause", "Poison")
            ]
        );
        assert!(!filter.list);
    }

    #[test]
    fn unknown_filter_kind_is_rejected() {
        assert!(Cli::try_parse_from(["orna-codex", "search", "-f", "colour=red"]).is_err());
    }

    #[test]
    fn more_requires_list_mode() {
        assert!(Cli::try_parse_from(["orna-codex", "search", "--more", "2"]).is_err());
        assert!(Cli::try_parse_from(["orna-codex", "search", "--list", "--more", "2"]).is_ok());
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from(["orna-codex", "languages", "-L", "en", "--quiet"]).unwrap();
        assert_eq!(cli.language.as_deref(), Some("en"));
        assert!(cli.quiet);
    }
}
