//! Cross-reference resolution for detail views.
//!
//! Resolves an item's relation lists into catalog entries and derives the
//! status effects reachable through its skills. A dangling reference is
//! reported on its own entry; the rest of the view still resolves.

use orna_codex_catalog::{CatalogItem, CompositeKey, Reference, Relation, StatusEntry, StatusRelation};

use crate::display::with_probability;
use crate::error::CodexError;
use crate::normalize::Catalog;

/// One resolved (or unresolved) relation entry.
#[derive(Debug)]
pub struct RelationEntry<'a> {
    pub reference: &'a Reference,
    pub key: CompositeKey,
    pub target: Result<&'a CatalogItem, CodexError>,
}

impl RelationEntry<'_> {
    pub fn is_resolved(&self) -> bool {
        self.target.is_ok()
    }
}

/// A status effect some skill of the item can inflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellStatus {
    pub status: String,
    /// Best probability across contributing skills; `None` if none gave one.
    pub probability: Option<u32>,
    /// `"Skill (NN%)"` for each contributing skill, in skill order.
    pub by: Vec<String>,
}

/// Outbound links for an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalLinks {
    pub codex: Option<String>,
    pub guide: Option<String>,
    pub assess: Option<String>,
}

/// Everything a detail view shows for one item.
#[derive(Debug)]
pub struct ResolvedDetailView<'a> {
    pub item: &'a CatalogItem,
    pub spells: Vec<RelationEntry<'a>>,
    pub drops: Vec<RelationEntry<'a>>,
    pub dropped_by: Vec<RelationEntry<'a>>,
    pub materials: Vec<RelationEntry<'a>>,
    /// Items that list this one among their upgrade materials.
    pub material_for: Vec<&'a CatalogItem>,
    pub causes_by_spells: Vec<SpellStatus>,
    pub links: ExternalLinks,
}

impl<'a> ResolvedDetailView<'a> {
    pub fn relation(&self, relation: Relation) -> &[RelationEntry<'a>] {
        match relation {
            Relation::Spells => &self.spells,
            Relation::Drops => &self.drops,
            Relation::DroppedBy => &self.dropped_by,
            Relation::Materials => &self.materials,
        }
    }

    pub fn statuses(&self, relation: StatusRelation) -> &'a [StatusEntry] {
        self.item.statuses(relation)
    }

    /// Entries across all relations that didn't resolve.
    pub fn unresolved(&self) -> impl Iterator<Item = &RelationEntry<'a>> {
        Relation::all()
            .iter()
            .flat_map(|r| self.relation(*r).iter())
            .filter(|e| !e.is_resolved())
    }
}

/// Resolve one reference of `relation` against `catalog`.
pub fn resolve_reference<'a>(
    catalog: &'a Catalog,
    relation: Relation,
    reference: &Reference,
) -> Result<&'a CatalogItem, CodexError> {
    let key = reference.key(relation);
    catalog
        .get(&key)
        .ok_or(CodexError::DanglingReference { relation, key })
}

fn resolve_relation<'a>(
    item: &'a CatalogItem,
    catalog: &'a Catalog,
    relation: Relation,
) -> Vec<RelationEntry<'a>> {
    item.references(relation)
        .iter()
        .map(|reference| {
            let target = resolve_reference(catalog, relation, reference);
            if let Err(e) = &target {
                log::warn!("{}: {}", item.key, e);
            }
            RelationEntry {
                reference,
                key: reference.key(relation),
                target,
            }
        })
        .collect()
}

/// Status effects reachable through the item's skills.
///
/// For each status, keeps the highest probability seen (first one wins on a
/// tie) and one attribution string per contributing skill. Skills that don't
/// resolve are skipped.
pub fn causes_by_spells(item: &CatalogItem, catalog: &Catalog) -> Vec<SpellStatus> {
    let mut out: Vec<SpellStatus> = Vec::new();

    for reference in item.references(Relation::Spells) {
        let Ok(spell) = resolve_reference(catalog, Relation::Spells, reference) else {
            continue;
        };
        for cause in spell.statuses(StatusRelation::Causes) {
            let idx = match out.iter().position(|s| s.status == cause.name) {
                Some(i) => i,
                None => {
                    out.push(SpellStatus {
                        status: cause.name.clone(),
                        probability: None,
                        by: Vec::new(),
                    });
                    out.len() - 1
                }
            };
            let entry = &mut out[idx];
            entry.by.push(with_probability(&spell.name, cause.probability));
            if let Some(p) = cause.probability
                && entry.probability.is_none_or(|best| p > best)
            {
                entry.probability = Some(p);
            }
        }
    }

    out
}

/// Items whose `materials` list points at `item`.
pub fn material_for<'a>(item: &CatalogItem, catalog: &'a Catalog) -> Vec<&'a CatalogItem> {
    catalog
        .items()
        .iter()
        .filter(|other| {
            other
                .references(Relation::Materials)
                .iter()
                .any(|r| r.key(Relation::Materials) == item.key)
        })
        .collect()
}

/// Site and guide links for an item.
pub fn external_links(item: &CatalogItem) -> ExternalLinks {
    let fields = &item.fields;
    let guide_id = fields.ornaguide_id.as_deref();
    let guide_category = fields.ornaguide_category.as_deref();
    ExternalLinks {
        codex: fields
            .path
            .as_deref()
            .map(|p| format!("https://playorna.com{p}")),
        guide: match (guide_category, guide_id) {
            (Some(category), Some(id)) => Some(format!("https://orna.guide/{category}s?show={id}")),
            _ => None,
        },
        assess: match (guide_category, guide_id) {
            (Some("item"), Some(id)) => Some(format!("https://orna.guide/assess?item={id}")),
            _ => None,
        },
    }
}

/// Build the full detail view for `item`.
pub fn resolve_detail<'a>(item: &'a CatalogItem, catalog: &'a Catalog) -> ResolvedDetailView<'a> {
    ResolvedDetailView {
        item,
        spells: resolve_relation(item, catalog, Relation::Spells),
        drops: resolve_relation(item, catalog, Relation::Drops),
        dropped_by: resolve_relation(item, catalog, Relation::DroppedBy),
        materials: resolve_relation(item, catalog, Relation::Materials),
        material_for: material_for(item, catalog),
        causes_by_spells: causes_by_spells(item, catalog),
        links: external_links(item),
    }
}

#[cfg(test)]
#[path = "tests/resolve_tests.rs"]
mod tests;
