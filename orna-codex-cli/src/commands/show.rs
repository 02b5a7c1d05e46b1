use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use orna_codex_catalog::{CompositeKey, Relation, ScalarField, StatusRelation};
use orna_codex_lib::display::with_probability;
use orna_codex_lib::{Catalog, CodexError, ResolvedDetailView, resolve_detail};

use super::{Session, runtime};
use crate::error::CliError;

/// Print the detail view for one entry.
pub(crate) fn run_show(session: &Session, key: &str) -> Result<(), CliError> {
    let key: CompositeKey = key.parse().map_err(CodexError::from)?;
    let state = runtime()?.block_on(session.load_state())?;
    let Some(catalog) = state.catalog.as_deref() else {
        return Err(CliError::load("no catalog"));
    };
    let item = catalog
        .get(&key)
        .ok_or_else(|| CliError::not_found(key.to_string()))?;

    let view = resolve_detail(item, catalog);
    print_header(catalog, &view);
    print_statuses(catalog, &view);
    print_relations(catalog, &view);
    print_links(&view);
    Ok(())
}

fn print_header(catalog: &Catalog, view: &ResolvedDetailView<'_>) {
    let item = view.item;
    log::info!(
        "{} {}",
        item.name.if_supports_color(Stdout, |t| t.bold()),
        format!("({})", item.key).if_supports_color(Stdout, |t| t.dimmed()),
    );
    let i18n = catalog.i18n();
    log::info!(
        "  {}: {}",
        i18n.text("category"),
        i18n.category_label(item.category())
    );
    for &field in ScalarField::all() {
        if field == ScalarField::Category {
            continue;
        }
        if let Some(value) = item.scalar(field) {
            log::info!("  {}: {}", i18n.text(field.field_name()), value);
        }
    }
    if !item.tags().is_empty() {
        log::info!("  {}: {}", i18n.text("tags"), item.tags().join(", "));
    }
    if let Some(description) = &item.fields.description {
        log::info!("");
        log::info!("  {}", description);
    }
    if !item.fields.stats.is_empty() {
        log::info!("");
        for stat in &item.fields.stats {
            log::info!("  {}", stat);
        }
    }
}

fn print_statuses(catalog: &Catalog, view: &ResolvedDetailView<'_>) {
    let i18n = catalog.i18n();
    for &relation in StatusRelation::all() {
        let entries = view.statuses(relation);
        if entries.is_empty() {
            continue;
        }
        let list: Vec<String> = entries
            .iter()
            .map(|s| with_probability(&s.name, s.probability))
            .collect();
        log::info!(
            "  {}: {}",
            i18n.text(relation.field_name()).if_supports_color(Stdout, |t| t.cyan()),
            list.join(", ")
        );
    }

    if !view.causes_by_spells.is_empty() {
        log::info!(
            "  {}:",
            format!("{} ({})", i18n.text("causes"), i18n.text("skills"))
                .if_supports_color(Stdout, |t| t.cyan())
        );
        for status in &view.causes_by_spells {
            log::info!(
                "    {} {}",
                with_probability(&status.status, status.probability),
                format!("<- {}", status.by.join(", ")).if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
}

fn print_relations(catalog: &Catalog, view: &ResolvedDetailView<'_>) {
    let i18n = catalog.i18n();
    for &relation in Relation::all() {
        let entries = view.relation(relation);
        if entries.is_empty() {
            continue;
        }
        log::info!(
            "  {}:",
            i18n.text(relation.field_name()).if_supports_color(Stdout, |t| t.cyan())
        );
        for entry in entries {
            match &entry.target {
                Ok(target) => log::info!(
                    "    {} {}",
                    target.name,
                    target.key.if_supports_color(Stdout, |t| t.dimmed())
                ),
                Err(_) => log::info!(
                    "    {} {}",
                    entry.key,
                    "(missing)".if_supports_color(Stdout, |t| t.red())
                ),
            }
        }
    }

    if !view.material_for.is_empty() {
        log::info!(
            "  {}:",
            i18n.text("material_for").if_supports_color(Stdout, |t| t.cyan())
        );
        for item in &view.material_for {
            log::info!(
                "    {} {}",
                item.name,
                item.key.if_supports_color(Stdout, |t| t.dimmed())
            );
        }
    }
}

fn print_links(view: &ResolvedDetailView<'_>) {
    let links = [
        ("codex", &view.links.codex),
        ("guide", &view.links.guide),
        ("assess", &view.links.assess),
    ];
    if links.iter().all(|(_, l)| l.is_none()) {
        return;
    }
    log::info!("");
    for (label, link) in links {
        if let Some(url) = link {
            log::info!(
                "  {:<7}{}",
                label,
                url.if_supports_color(Stdout, |t| t.underline())
            );
        }
    }
}
