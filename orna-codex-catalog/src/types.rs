//! Data model types for the codex.
//!
//! These types represent the per-language dataset documents as they are
//! exported (`RawItem`, `LanguageDocument`) and the normalized, language-tagged
//! entries built from them (`CatalogItem`).

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};

// ── Composite key ───────────────────────────────────────────────────────────

/// The `(category, id)` pair identifying a catalog item across the whole codex.
///
/// Displays as `category:id`. Equality, hashing and ordering all work on the
/// displayed form byte by byte, so two keys are the same key exactly when they
/// render the same, and sorting by key is sorting the rendered strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeKey {
    pub category: String,
    pub id: String,
}

impl CompositeKey {
    pub fn new(category: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            id: id.into(),
        }
    }

    fn rendered_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.category
            .bytes()
            .chain(std::iter::once(b':'))
            .chain(self.id.bytes())
    }
}

impl PartialEq for CompositeKey {
    fn eq(&self, other: &Self) -> bool {
        self.category.len() + self.id.len() == other.category.len() + other.id.len()
            && self.rendered_bytes().eq(other.rendered_bytes())
    }
}

impl Eq for CompositeKey {}

impl Hash for CompositeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.rendered_bytes() {
            state.write_u8(b);
        }
        state.write_u8(0xff);
    }
}

impl Ord for CompositeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rendered_bytes().cmp(other.rendered_bytes())
    }
}

impl PartialOrd for CompositeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category, self.id)
    }
}

/// Error returned when a string is not a `category:id` or `category/id` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParseError(pub String);

impl fmt::Display for KeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid codex key '{}' (expected category:id or category/id)",
            self.0
        )
    }
}

impl std::error::Error for KeyParseError {}

impl FromStr for CompositeKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_matches('/');
        let (category, id) = s
            .split_once(':')
            .or_else(|| s.split_once('/'))
            .ok_or_else(|| KeyParseError(s.to_string()))?;
        let id = id.trim_end_matches('/');
        if category.is_empty() || id.is_empty() {
            return Err(KeyParseError(s.to_string()));
        }
        Ok(Self::new(category, id))
    }
}

// ── Relations ───────────────────────────────────────────────────────────────

/// A relation from one item to other items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Spells,
    Drops,
    DroppedBy,
    Materials,
}

impl Relation {
    pub fn all() -> &'static [Relation] {
        &[
            Relation::Spells,
            Relation::Drops,
            Relation::DroppedBy,
            Relation::Materials,
        ]
    }

    /// Field name in the dataset documents.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Spells => "spells",
            Self::Drops => "drops",
            Self::DroppedBy => "dropped_by",
            Self::Materials => "materials",
        }
    }

    /// Category used to resolve bare-id references of this relation.
    pub fn home_category(&self) -> &'static str {
        match self {
            Self::Spells => "spells",
            Self::Drops | Self::Materials => "items",
            Self::DroppedBy => "monsters",
        }
    }
}

/// A reference from an item to another item.
///
/// Exported data uses `[category, id]` pairs or `"category/id"` strings.
/// A bare id without a category resolves inside the relation's
/// [`Relation::home_category`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    Bare(String),
    Qualified { category: String, id: String },
}

impl Reference {
    /// The composite key this reference points at.
    pub fn key(&self, relation: Relation) -> CompositeKey {
        match self {
            Self::Bare(id) => CompositeKey::new(relation.home_category(), id.as_str()),
            Self::Qualified { category, id } => CompositeKey::new(category.as_str(), id.as_str()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReference {
    Pair(String, String),
    Text(String),
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawReference::deserialize(deserializer)? {
            RawReference::Pair(category, id) => Reference::Qualified { category, id },
            RawReference::Text(text) => match text.split_once('/') {
                Some((category, id)) if !category.is_empty() && !id.is_empty() => {
                    Reference::Qualified {
                        category: category.to_string(),
                        id: id.to_string(),
                    }
                }
                _ => Reference::Bare(text),
            },
        })
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bare(id) => serializer.serialize_str(id),
            Self::Qualified { category, id } => (category, id).serialize(serializer),
        }
    }
}

// ── Status effects ──────────────────────────────────────────────────────────

/// Which status relation of an item a status entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusRelation {
    Causes,
    Cures,
    Gives,
    Immunities,
}

impl StatusRelation {
    pub fn all() -> &'static [StatusRelation] {
        &[
            StatusRelation::Causes,
            StatusRelation::Cures,
            StatusRelation::Gives,
            StatusRelation::Immunities,
        ]
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Causes => "causes",
            Self::Cures => "cures",
            Self::Gives => "gives",
            Self::Immunities => "immunities",
        }
    }
}

/// A named status effect with an optional probability in percent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub name: String,
    pub probability: Option<u32>,
}

impl StatusEntry {
    pub fn new(name: impl Into<String>, probability: Option<u32>) -> Self {
        Self {
            name: name.into(),
            probability,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatus {
    Pair(String, Option<u32>),
    Single((String,)),
    Name(String),
}

impl<'de> Deserialize<'de> for StatusEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawStatus::deserialize(deserializer)? {
            RawStatus::Pair(name, probability) => StatusEntry { name, probability },
            RawStatus::Single((name,)) | RawStatus::Name(name) => StatusEntry {
                name,
                probability: None,
            },
        })
    }
}

impl Serialize for StatusEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.name, &self.probability).serialize(serializer)
    }
}

// ── Scalar fields ───────────────────────────────────────────────────────────

/// Single-valued item attributes that can be filtered by exact equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarField {
    Category,
    Tier,
    Family,
    Rarity,
    Event,
    Place,
    UseableBy,
}

impl ScalarField {
    pub fn all() -> &'static [ScalarField] {
        &[
            ScalarField::Category,
            ScalarField::Tier,
            ScalarField::Family,
            ScalarField::Rarity,
            ScalarField::Event,
            ScalarField::Place,
            ScalarField::UseableBy,
        ]
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Tier => "tier",
            Self::Family => "family",
            Self::Rarity => "rarity",
            Self::Event => "event",
            Self::Place => "place",
            Self::UseableBy => "useableBy",
        }
    }
}

/// Accepts strings, numbers and booleans; exports store tiers as numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn scalar_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_string))
}

fn scalar_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<Scalar>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(Scalar::into_string)
        .collect())
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A list of facet values; numbers are kept in their string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetValues(pub Vec<String>);

impl<'de> Deserialize<'de> for FacetValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        scalar_list(deserializer).map(FacetValues)
    }
}

// ── Raw items and documents ─────────────────────────────────────────────────

/// One codex entry as it appears in a single language's document.
///
/// Every field is optional; fields this crate does not model are kept in
/// `extra` so they survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Site path of the entry, e.g. `/codex/items/dragon-sword/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, deserialize_with = "scalar_opt", skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(default, deserialize_with = "scalar_opt", skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, deserialize_with = "scalar_opt", skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(default, deserialize_with = "scalar_opt", skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(default, deserialize_with = "scalar_opt", skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(
        rename = "useableBy",
        default,
        deserialize_with = "scalar_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub useable_by: Option<String>,

    #[serde(default, deserialize_with = "scalar_list", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "scalar_list", skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<String>,

    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<StatusEntry>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub cures: Vec<StatusEntry>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub gives: Vec<StatusEntry>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub immunities: Vec<StatusEntry>,

    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub spells: Vec<Reference>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub drops: Vec<Reference>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub dropped_by: Vec<Reference>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<Reference>,

    #[serde(default, deserialize_with = "scalar_opt", skip_serializing_if = "Option::is_none")]
    pub ornaguide_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ornaguide_category: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl RawItem {
    pub fn statuses(&self, relation: StatusRelation) -> &[StatusEntry] {
        match relation {
            StatusRelation::Causes => &self.causes,
            StatusRelation::Cures => &self.cures,
            StatusRelation::Gives => &self.gives,
            StatusRelation::Immunities => &self.immunities,
        }
    }

    pub fn references(&self, relation: Relation) -> &[Reference] {
        match relation {
            Relation::Spells => &self.spells,
            Relation::Drops => &self.drops,
            Relation::DroppedBy => &self.dropped_by,
            Relation::Materials => &self.materials,
        }
    }
}

/// Items of one category, keyed by id.
pub type CategoryItems = BTreeMap<String, RawItem>;

/// A single language's dataset file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageDocument {
    /// UI labels keyed by text key (`causes`, `skills`, `droppedBy`, ...).
    #[serde(default)]
    pub text: BTreeMap<String, String>,
    /// Localized category labels keyed by category.
    #[serde(default)]
    pub category: BTreeMap<String, String>,
    /// Entries: category -> id -> item.
    #[serde(default)]
    pub codex: BTreeMap<String, CategoryItems>,
    /// Precomputed facet source lists keyed by facet name.
    #[serde(default)]
    pub options: BTreeMap<String, FacetValues>,
}

impl LanguageDocument {
    /// Look up an item by category and id.
    pub fn item(&self, category: &str, id: &str) -> Option<&RawItem> {
        self.codex.get(category)?.get(id)
    }

    /// Total number of items across all categories.
    pub fn item_count(&self) -> usize {
        self.codex.values().map(BTreeMap::len).sum()
    }
}

// ── Normalized item ─────────────────────────────────────────────────────────

/// One normalized codex entry for the active language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogItem {
    pub key: CompositeKey,
    /// Display name in the active language (empty if the export had none).
    pub name: String,
    /// Lowercased names from every loaded language, joined with `|`.
    pub search_text: String,
    pub fields: RawItem,
}

impl CatalogItem {
    pub fn category(&self) -> &str {
        &self.key.category
    }

    pub fn id(&self) -> &str {
        &self.key.id
    }

    /// Value of a single-valued field, `None` when absent.
    pub fn scalar(&self, field: ScalarField) -> Option<&str> {
        match field {
            ScalarField::Category => Some(self.category()),
            ScalarField::Tier => self.fields.tier.as_deref(),
            ScalarField::Family => self.fields.family.as_deref(),
            ScalarField::Rarity => self.fields.rarity.as_deref(),
            ScalarField::Event => self.fields.event.as_deref(),
            ScalarField::Place => self.fields.place.as_deref(),
            ScalarField::UseableBy => self.fields.useable_by.as_deref(),
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.fields.tags
    }

    pub fn statuses(&self, relation: StatusRelation) -> &[StatusEntry] {
        self.fields.statuses(relation)
    }

    pub fn references(&self, relation: Relation) -> &[Reference] {
        self.fields.references(relation)
    }
}
