//! Facet option sets derived from a normalized catalog.
//!
//! Every filterable attribute gets a sorted, de-duplicated list of the values
//! observed across all items. The four status relations share one `statuses`
//! value space; the filter clause that consumes a status value decides which
//! relation it matches against.

use std::collections::{BTreeMap, BTreeSet};

use orna_codex_catalog::{CatalogItem, LANGUAGES, ScalarField, StatusRelation, language_label};

use crate::filter::ClauseKind;
use crate::normalize::Catalog;

/// A filterable attribute with a selectable option set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facet {
    Category,
    Tags,
    Statuses,
    Tiers,
    Families,
    Rarities,
    Events,
    Places,
    Useables,
}

impl Facet {
    pub fn all() -> &'static [Facet] {
        &[
            Facet::Category,
            Facet::Tags,
            Facet::Statuses,
            Facet::Tiers,
            Facet::Families,
            Facet::Rarities,
            Facet::Events,
            Facet::Places,
            Facet::Useables,
        ]
    }

    /// Option set name, also the key used for precomputed document options.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Tags => "tags",
            Self::Statuses => "statuses",
            Self::Tiers => "tiers",
            Self::Families => "families",
            Self::Rarities => "rarities",
            Self::Events => "events",
            Self::Places => "places",
            Self::Useables => "useables",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.name() == name)
    }

    /// The item field a single-valued facet reads, if any.
    fn scalar_field(&self) -> Option<ScalarField> {
        match self {
            Self::Category => Some(ScalarField::Category),
            Self::Tiers => Some(ScalarField::Tier),
            Self::Families => Some(ScalarField::Family),
            Self::Rarities => Some(ScalarField::Rarity),
            Self::Events => Some(ScalarField::Event),
            Self::Places => Some(ScalarField::Place),
            Self::Useables => Some(ScalarField::UseableBy),
            Self::Tags | Self::Statuses => None,
        }
    }

    fn collect_values<'a>(&self, item: &'a CatalogItem, out: &mut BTreeSet<&'a str>) {
        match self {
            Self::Tags => out.extend(item.tags().iter().map(String::as_str)),
            Self::Statuses => {
                for &relation in StatusRelation::all() {
                    out.extend(item.statuses(relation).iter().map(|s| s.name.as_str()));
                }
            }
            _ => {
                if let Some(value) = self.scalar_field().and_then(|f| item.scalar(f)) {
                    out.insert(value);
                }
            }
        }
    }
}

/// One selectable value with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
}

impl FacetOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Sorted, de-duplicated options for one facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOptionSet {
    pub facet: Facet,
    pub options: Vec<FacetOption>,
}

impl FacetOptionSet {
    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.value.as_str())
    }
}

/// All option sets the filter UI needs for one catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOptions {
    sets: BTreeMap<Facet, FacetOptionSet>,
    /// Language picker entries (code -> display name).
    pub languages: Vec<FacetOption>,
    /// Filter clause kinds with localized labels.
    pub clause_types: Vec<FacetOption>,
}

impl FacetOptions {
    pub fn get(&self, facet: Facet) -> Option<&FacetOptionSet> {
        self.sets.get(&facet)
    }

    /// Look up a set by name (`tags`, `statuses`, ...).
    pub fn by_name(&self, name: &str) -> Option<&FacetOptionSet> {
        Facet::from_name(name).and_then(|f| self.get(f))
    }

    /// Options offered for a filter clause kind.
    pub fn for_clause(&self, kind: ClauseKind) -> Option<&FacetOptionSet> {
        self.get(kind.facet())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FacetOptionSet> {
        self.sets.values()
    }
}

/// Build every facet option set for `catalog`.
pub fn build_facet_options(catalog: &Catalog) -> FacetOptions {
    let i18n = catalog.i18n();
    let mut sets = BTreeMap::new();

    for &facet in Facet::all() {
        let mut values: BTreeSet<&str> = BTreeSet::new();
        for item in catalog.items() {
            facet.collect_values(item, &mut values);
        }
        if let Some(precomputed) = catalog.source_options().get(facet.name()) {
            values.extend(precomputed.iter().map(String::as_str));
        }
        if facet == Facet::Category {
            values.extend(i18n.category.keys().map(String::as_str));
        }

        // BTreeSet iteration order is ascending string order.
        let options = values
            .into_iter()
            .map(|value| {
                let label = match facet {
                    Facet::Category => i18n.category_label(value),
                    _ => value,
                };
                FacetOption::new(value, label)
            })
            .collect();
        sets.insert(facet, FacetOptionSet { facet, options });
    }

    log::debug!(
        "Built facet options: {}",
        sets.values()
            .map(|s| format!("{}={}", s.facet.name(), s.len()))
            .collect::<Vec<_>>()
            .join(", ")
    );

    FacetOptions {
        sets,
        languages: language_options(catalog.languages()),
        clause_types: ClauseKind::all()
            .iter()
            .map(|kind| FacetOption::new(kind.name(), i18n.text(kind.text_key())))
            .collect(),
    }
}

/// Known languages in menu order, then any other loaded language.
pub fn language_options(loaded: &[String]) -> Vec<FacetOption> {
    let mut options: Vec<FacetOption> = LANGUAGES
        .iter()
        .map(|(code, label)| FacetOption::new(*code, *label))
        .collect();
    for code in loaded {
        if language_label(code).is_none() {
            options.push(FacetOption::new(code.as_str(), code.as_str()));
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::catalog;

    fn values(options: &FacetOptions, facet: Facet) -> Vec<String> {
        options
            .get(facet)
            .unwrap()
            .values()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn scalar_facets_collect_distinct_present_values() {
        let options = build_facet_options(&catalog("en"));
        assert_eq!(values(&options, Facet::Tiers), vec!["1", "10", "2", "4", "5", "7", "8"]);
        assert_eq!(values(&options, Facet::Families), vec!["Goblinoid"]);
        assert_eq!(values(&options, Facet::Rarities), vec!["Legendary"]);
        assert!(options.get(Facet::Places).unwrap().is_empty());
    }

    #[test]
    fn precomputed_options_are_merged() {
        let options = build_facet_options(&catalog("en"));
        assert_eq!(values(&options, Facet::Events), vec!["Dragon Week", "Harvest"]);
    }

    #[test]
    fn tags_are_unioned() {
        let options = build_facet_options(&catalog("en"));
        assert_eq!(
            values(&options, Facet::Tags),
            vec!["Consumable", "Material", "Two-handed", "Weapon"]
        );
    }

    #[test]
    fn statuses_share_one_value_space() {
        let options = build_facet_options(&catalog("en"));
        // Poison (causes/cures), Blind (immunities/causes), Burning (causes), Berserk (gives)
        assert_eq!(
            values(&options, Facet::Statuses),
            vec!["Berserk", "Blind", "Burning", "Poison"]
        );
    }

    #[test]
    fn category_labels_follow_active_language() {
        let en = build_facet_options(&catalog("en"));
        let zh = build_facet_options(&catalog("zh-hans"));
        let label = |o: &FacetOptions| {
            o.get(Facet::Category)
                .unwrap()
                .options
                .iter()
                .find(|opt| opt.value == "items")
                .unwrap()
                .label
                .clone()
        };
        assert_eq!(label(&en), "Items");
        assert_eq!(label(&zh), "物品");
        assert_eq!(
            values(&en, Facet::Category),
            vec!["bosses", "items", "monsters", "spells"]
        );
    }

    #[test]
    fn clause_types_and_languages_are_listed() {
        let options = build_facet_options(&catalog("en"));
        let tag = options
            .clause_types
            .iter()
            .find(|o| o.value == "tag")
            .unwrap();
        assert_eq!(tag.label, "Tags");
        assert_eq!(options.languages[0], FacetOption::new("en", "English"));
        assert_eq!(options.by_name("statuses").unwrap().facet, Facet::Statuses);
        assert_eq!(
            options.for_clause(ClauseKind::Cure).unwrap().facet,
            Facet::Statuses
        );
    }

    #[test]
    fn every_option_set_is_in_string_order() {
        let options = build_facet_options(&catalog("en"));
        for set in options.iter() {
            let got: Vec<&str> = set.values().collect();
            let mut sorted = got.clone();
            sorted.sort();
            assert_eq!(got, sorted, "{} options out of order", set.facet.name());
        }
    }
}
