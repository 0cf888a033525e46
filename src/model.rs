//! Content records
//!
//! The five record kinds held by the content store. Every kind is a flat
//! attribute bag keyed by a row identity; all but the hero singleton carry
//! an explicit `display_order`.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Flat attribute bag as exchanged with the content store
pub type Row = Map<String, Value>;

/// Stable row identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// The content store tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    HeroContent,
    StatsCards,
    ImpactMetrics,
    FocusAreas,
    Testimonials,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::HeroContent,
        Collection::StatsCards,
        Collection::ImpactMetrics,
        Collection::FocusAreas,
        Collection::Testimonials,
    ];

    /// Table name in the content store
    pub fn table(&self) -> &'static str {
        match self {
            Collection::HeroContent => "hero_content",
            Collection::StatsCards => "stats_cards",
            Collection::ImpactMetrics => "impact_metrics",
            Collection::FocusAreas => "focus_areas",
            Collection::Testimonials => "testimonials",
        }
    }

    /// Whether rows carry a `display_order` column
    pub fn is_ordered(&self) -> bool {
        !matches!(self, Collection::HeroContent)
    }

    /// Human label used in notifications
    pub fn label(&self) -> &'static str {
        match self {
            Collection::HeroContent => "Hero section",
            Collection::StatsCards => "Stats",
            Collection::ImpactMetrics => "Impact metrics",
            Collection::FocusAreas => "Focus areas",
            Collection::Testimonials => "Testimonials",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

impl FromStr for Collection {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.table() == s)
            .ok_or_else(|| EditError::UnknownCollection(s.to_string()))
    }
}

/// Errors raised while editing records in memory
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    #[error("{collection} has no editable field `{field}`")]
    UnknownField { collection: Collection, field: String },

    #[error("field `{field}` expects {expected}")]
    WrongKind { field: String, expected: &'static str },

    #[error("record {id} not found in {collection}")]
    RecordNotFound { collection: Collection, id: RecordId },

    #[error("invalid edit: {0}")]
    Invalid(String),
}

/// New value for an editable field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    fn into_text(self, field: &str) -> Result<String, EditError> {
        match self {
            FieldValue::Text(s) => Ok(s),
            FieldValue::List(_) => Err(EditError::WrongKind {
                field: field.to_string(),
                expected: "text",
            }),
        }
    }

    /// Empty text clears an optional field
    fn into_optional_text(self, field: &str) -> Result<Option<String>, EditError> {
        let text = self.into_text(field)?;
        Ok(if text.trim().is_empty() { None } else { Some(text) })
    }

    /// Lists accept either a list or comma-separated text
    fn into_list(self) -> Vec<String> {
        match self {
            FieldValue::List(items) => items,
            FieldValue::Text(s) => s
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

/// Editable columns that were null or absent when the row was read
///
/// Such a column decodes to its empty default but stays out of write-back
/// until it is edited, so saving an unchanged record never turns a null
/// into `""` or `[]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnsetColumns(BTreeSet<String>);

impl UnsetColumns {
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, field: &str) {
        self.0.insert(field.to_string());
    }

    fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }
}

/// A record kind stored in one content store table
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Table this kind lives in
    const COLLECTION: Collection;

    fn id(&self) -> RecordId;

    /// Render position; `None` for the singleton and for null orders
    fn display_order(&self) -> Option<i32> {
        None
    }

    /// Columns the dashboard may rewrite
    fn editable_fields() -> &'static [&'static str];

    fn unset(&self) -> &UnsetColumns;

    fn unset_mut(&mut self) -> &mut UnsetColumns;

    /// Store a new value in one editable column
    fn assign(&mut self, field: &str, value: FieldValue) -> Result<(), EditError>;

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), EditError> {
        self.assign(field, value)?;
        self.unset_mut().remove(field);
        Ok(())
    }

    /// Every editable column that was set on load or edited since
    fn editable_patch(&self) -> Result<Row, serde_json::Error> {
        let mut patch = Row::new();
        if let Value::Object(mut all) = serde_json::to_value(self)? {
            for field in Self::editable_fields() {
                if self.unset().contains(field) {
                    continue;
                }
                if let Some(value) = all.remove(*field) {
                    patch.insert((*field).to_string(), value);
                }
            }
        }
        Ok(patch)
    }

    /// Decode a store row, remembering which editable columns were unset
    fn from_row(row: Row) -> Result<Self, serde_json::Error> {
        let unset: Vec<&str> = Self::editable_fields()
            .iter()
            .copied()
            .filter(|field| row.get(*field).map_or(true, Value::is_null))
            .collect();

        let mut record: Self = serde_json::from_value(Value::Object(row))?;
        for field in unset {
            record.unset_mut().insert(field);
        }
        Ok(record)
    }

    /// The record as a store row, unset columns as null
    fn to_row(&self) -> Result<Row, serde_json::Error> {
        let mut row = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Row::new(),
        };
        for field in Self::editable_fields() {
            if self.unset().contains(field) {
                row.insert((*field).to_string(), Value::Null);
            }
        }
        Ok(row)
    }
}

fn unknown_field<R: Record>(field: &str) -> EditError {
    EditError::UnknownField {
        collection: R::COLLECTION,
        field: field.to_string(),
    }
}

/// Nullable text columns decode as their default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Singleton hero banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroContent {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtitle: String,
    #[serde(default)]
    pub hero_image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cta_primary_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cta_primary_link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cta_secondary_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cta_secondary_link: String,
    #[serde(skip)]
    pub unset: UnsetColumns,
}

impl Record for HeroContent {
    const COLLECTION: Collection = Collection::HeroContent;

    fn id(&self) -> RecordId {
        self.id
    }

    fn editable_fields() -> &'static [&'static str] {
        &[
            "title",
            "subtitle",
            "hero_image_url",
            "cta_primary_text",
            "cta_primary_link",
            "cta_secondary_text",
            "cta_secondary_link",
        ]
    }

    fn unset(&self) -> &UnsetColumns {
        &self.unset
    }

    fn unset_mut(&mut self) -> &mut UnsetColumns {
        &mut self.unset
    }

    fn assign(&mut self, field: &str, value: FieldValue) -> Result<(), EditError> {
        match field {
            "title" => self.title = value.into_text(field)?,
            "subtitle" => self.subtitle = value.into_text(field)?,
            "hero_image_url" => self.hero_image_url = value.into_optional_text(field)?,
            "cta_primary_text" => self.cta_primary_text = value.into_text(field)?,
            "cta_primary_link" => self.cta_primary_link = value.into_text(field)?,
            "cta_secondary_text" => self.cta_secondary_text = value.into_text(field)?,
            "cta_secondary_link" => self.cta_secondary_link = value.into_text(field)?,
            _ => return Err(unknown_field::<Self>(field)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCard {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    /// Symbol name, resolved through [`StatIcon::resolve`]
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(skip)]
    pub unset: UnsetColumns,
}

impl Record for StatCard {
    const COLLECTION: Collection = Collection::StatsCards;

    fn id(&self) -> RecordId {
        self.id
    }

    fn display_order(&self) -> Option<i32> {
        self.display_order
    }

    fn editable_fields() -> &'static [&'static str] {
        &["label", "value", "icon"]
    }

    fn unset(&self) -> &UnsetColumns {
        &self.unset
    }

    fn unset_mut(&mut self) -> &mut UnsetColumns {
        &mut self.unset
    }

    fn assign(&mut self, field: &str, value: FieldValue) -> Result<(), EditError> {
        match field {
            "label" => self.label = value.into_text(field)?,
            "value" => self.value = value.into_text(field)?,
            "icon" => self.icon = value.into_text(field)?,
            _ => return Err(unknown_field::<Self>(field)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactMetric {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    /// Pre-formatted, e.g. "+23%"
    #[serde(default, deserialize_with = "null_as_default")]
    pub growth_percentage: String,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(skip)]
    pub unset: UnsetColumns,
}

impl Record for ImpactMetric {
    const COLLECTION: Collection = Collection::ImpactMetrics;

    fn id(&self) -> RecordId {
        self.id
    }

    fn display_order(&self) -> Option<i32> {
        self.display_order
    }

    fn editable_fields() -> &'static [&'static str] {
        &["label", "value", "growth_percentage"]
    }

    fn unset(&self) -> &UnsetColumns {
        &self.unset
    }

    fn unset_mut(&mut self) -> &mut UnsetColumns {
        &mut self.unset
    }

    fn assign(&mut self, field: &str, value: FieldValue) -> Result<(), EditError> {
        match field {
            "label" => self.label = value.into_text(field)?,
            "value" => self.value = value.into_text(field)?,
            "growth_percentage" => self.growth_percentage = value.into_text(field)?,
            _ => return Err(unknown_field::<Self>(field)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusArea {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hashtags: Vec<String>,
    /// Deep-link key, `/themes/{slug}`
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(skip)]
    pub unset: UnsetColumns,
}

impl Record for FocusArea {
    const COLLECTION: Collection = Collection::FocusAreas;

    fn id(&self) -> RecordId {
        self.id
    }

    fn display_order(&self) -> Option<i32> {
        self.display_order
    }

    fn editable_fields() -> &'static [&'static str] {
        &["title", "description", "image_url", "hashtags"]
    }

    fn unset(&self) -> &UnsetColumns {
        &self.unset
    }

    fn unset_mut(&mut self) -> &mut UnsetColumns {
        &mut self.unset
    }

    fn assign(&mut self, field: &str, value: FieldValue) -> Result<(), EditError> {
        match field {
            "title" => self.title = value.into_text(field)?,
            "description" => self.description = value.into_text(field)?,
            "image_url" => self.image_url = value.into_optional_text(field)?,
            "hashtags" => self.hashtags = value.into_list(),
            _ => return Err(unknown_field::<Self>(field)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quote: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub organization: String,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(skip)]
    pub unset: UnsetColumns,
}

impl Record for Testimonial {
    const COLLECTION: Collection = Collection::Testimonials;

    fn id(&self) -> RecordId {
        self.id
    }

    fn display_order(&self) -> Option<i32> {
        self.display_order
    }

    fn editable_fields() -> &'static [&'static str] {
        &["quote", "author_name", "author_title", "organization"]
    }

    fn unset(&self) -> &UnsetColumns {
        &self.unset
    }

    fn unset_mut(&mut self) -> &mut UnsetColumns {
        &mut self.unset
    }

    fn assign(&mut self, field: &str, value: FieldValue) -> Result<(), EditError> {
        match field {
            "quote" => self.quote = value.into_text(field)?,
            "author_name" => self.author_name = value.into_text(field)?,
            "author_title" => self.author_title = value.into_text(field)?,
            "organization" => self.organization = value.into_text(field)?,
            _ => return Err(unknown_field::<Self>(field)),
        }
        Ok(())
    }
}

/// Symbols a stat card may show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatIcon {
    TrendingUp,
    Users,
    BarChart3,
    Shield,
}

impl StatIcon {
    pub const FALLBACK: StatIcon = StatIcon::TrendingUp;

    /// Map a stored icon name to a symbol; unknown names use [`Self::FALLBACK`]
    pub fn resolve(name: &str) -> StatIcon {
        match name {
            "TrendingUp" => StatIcon::TrendingUp,
            "Users" => StatIcon::Users,
            "BarChart3" => StatIcon::BarChart3,
            "Shield" => StatIcon::Shield,
            _ => Self::FALLBACK,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatIcon::TrendingUp => "TrendingUp",
            StatIcon::Users => "Users",
            StatIcon::BarChart3 => "BarChart3",
            StatIcon::Shield => "Shield",
        }
    }
}

/// Stable ascending sort on `display_order`, nulls last; equal keys keep
/// storage order
pub fn sort_by_display_order<R: Record>(records: &mut [R]) {
    records.sort_by_key(|r| (r.display_order().is_none(), r.display_order()));
}
