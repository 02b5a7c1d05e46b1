use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use orna_codex_lib::{Facet, FacetOption};

use super::{Session, runtime};
use crate::error::CliError;

/// Print filter option sets: all of them, or only the named one.
pub(crate) fn run_facets(session: &Session, only: Option<&str>) -> Result<(), CliError> {
    let state = runtime()?.block_on(session.load_state())?;
    let Some(options) = state.options.as_deref() else {
        return Err(CliError::load("no facet options"));
    };

    let mut sections: Vec<(&str, &[FacetOption])> = options
        .iter()
        .map(|set| (set.facet.name(), set.options.as_slice()))
        .collect();
    sections.push(("type", options.clause_types.as_slice()));
    sections.push(("language", options.languages.as_slice()));

    if let Some(name) = only {
        if Facet::from_name(name).is_none() && name != "type" && name != "language" {
            return Err(CliError::unknown_facet(name));
        }
        sections.retain(|(section, _)| *section == name);
    }

    for (name, entries) in sections {
        log::info!(
            "{} {}",
            name.if_supports_color(Stdout, |t| t.bold()),
            format!("({})", entries.len()).if_supports_color(Stdout, |t| t.dimmed()),
        );
        for option in entries {
            if option.label == option.value {
                log::info!("  {}", option.value);
            } else {
                log::info!(
                    "  {} {}",
                    option.value,
                    option.label.if_supports_color(Stdout, |t| t.cyan())
                );
            }
        }
    }
    Ok(())
}
