//! Dashboard content editor
//!
//! The draft is an editable copy of the aggregated content. Edits never
//! mutate a collection in place: [`update_field_at`] returns a new
//! collection with one field of one record replaced, addressed by record
//! identity so a reordering between load and save cannot hit the wrong
//! row. Nothing reaches the store until a save action runs.

pub mod notification;
pub mod save;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::aggregate::AggregatedContent;
use crate::model::{
    Collection, EditError, FieldValue, FocusArea, HeroContent, ImpactMetric, Record, RecordId,
    StatCard, Testimonial,
};
use crate::store::ContentStore;

pub use notification::{Notification, Variant};
pub use save::{save_collection, save_hero, RecordOutcome, SaveReport, SaveStatus};

/// Replace `field` of the record `id`, returning the new collection
pub fn update_field_at<R: Record>(
    records: &[R],
    id: RecordId,
    field: &str,
    value: FieldValue,
) -> Result<Vec<R>, EditError> {
    let index = records
        .iter()
        .position(|r| r.id() == id)
        .ok_or(EditError::RecordNotFound {
            collection: R::COLLECTION,
            id,
        })?;

    let mut next = records.to_vec();
    next[index].set_field(field, value)?;
    Ok(next)
}

/// Editable copy of the site content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentDraft {
    pub hero: Option<HeroContent>,
    pub stats: Vec<StatCard>,
    pub metrics: Vec<ImpactMetric>,
    pub focus_areas: Vec<FocusArea>,
    pub testimonials: Vec<Testimonial>,
    #[serde(skip)]
    touched: BTreeSet<Collection>,
}

impl From<AggregatedContent> for ContentDraft {
    fn from(content: AggregatedContent) -> Self {
        Self {
            hero: content.hero,
            stats: content.stats,
            metrics: content.metrics,
            focus_areas: content.focus_areas,
            testimonials: content.testimonials,
            touched: BTreeSet::new(),
        }
    }
}

impl ContentDraft {
    /// Apply one field edit
    pub fn edit(
        &mut self,
        collection: Collection,
        id: RecordId,
        field: &str,
        value: FieldValue,
    ) -> Result<(), EditError> {
        match collection {
            Collection::HeroContent => {
                let hero = self
                    .hero
                    .as_ref()
                    .filter(|h| h.id == id)
                    .ok_or(EditError::RecordNotFound { collection, id })?;
                let mut next = hero.clone();
                next.set_field(field, value)?;
                self.hero = Some(next);
            }
            Collection::StatsCards => {
                self.stats = update_field_at(&self.stats, id, field, value)?;
            }
            Collection::ImpactMetrics => {
                self.metrics = update_field_at(&self.metrics, id, field, value)?;
            }
            Collection::FocusAreas => {
                self.focus_areas = update_field_at(&self.focus_areas, id, field, value)?;
            }
            Collection::Testimonials => {
                self.testimonials = update_field_at(&self.testimonials, id, field, value)?;
            }
        }
        self.touched.insert(collection);
        Ok(())
    }

    pub fn apply(&mut self, spec: EditSpec) -> Result<(), EditError> {
        self.edit(spec.collection, spec.id, &spec.field, spec.value)
    }

    /// Collections edited since the draft was created
    pub fn touched(&self) -> impl Iterator<Item = Collection> + '_ {
        self.touched.iter().copied()
    }

    /// Save one collection as currently held in the draft
    pub async fn save(
        &self,
        store: &dyn ContentStore,
        collection: Collection,
    ) -> Result<SaveReport, EditError> {
        let report = match collection {
            Collection::HeroContent => {
                let hero = self
                    .hero
                    .as_ref()
                    .ok_or_else(|| EditError::Invalid("no hero content loaded".to_string()))?;
                save_hero(store, hero).await
            }
            Collection::StatsCards => save_collection(store, &self.stats).await,
            Collection::ImpactMetrics => save_collection(store, &self.metrics).await,
            Collection::FocusAreas => save_collection(store, &self.focus_areas).await,
            Collection::Testimonials => save_collection(store, &self.testimonials).await,
        };
        Ok(report)
    }

    /// Save every edited collection, one save action each
    pub async fn save_touched(&self, store: &dyn ContentStore) -> Result<Vec<SaveReport>, EditError> {
        let mut reports = Vec::new();
        for collection in self.touched() {
            reports.push(self.save(store, collection).await?);
        }
        Ok(reports)
    }
}

/// A field edit written as `<collection>/<id>/<field>=<value>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSpec {
    pub collection: Collection,
    pub id: RecordId,
    pub field: String,
    pub value: FieldValue,
}

impl FromStr for EditSpec {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EditError::Invalid(format!("expected <collection>/<id>/<field>=<value>, got `{s}`"));

        let (path, value) = s.split_once('=').ok_or_else(invalid)?;
        let mut parts = path.splitn(3, '/');
        let (Some(collection), Some(id), Some(field)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if field.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            collection: collection.parse()?,
            id: id
                .parse()
                .map_err(|_| EditError::Invalid(format!("`{id}` is not a record id")))?,
            field: field.to_string(),
            value: FieldValue::Text(value.to_string()),
        })
    }
}
