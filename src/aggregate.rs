//! Content aggregation
//!
//! One round of five concurrent reads. Every read is awaited; each section
//! that succeeded is applied, each that failed keeps its empty default.

use serde::{Deserialize, Serialize};

use crate::model::{Collection, FocusArea, HeroContent, ImpactMetric, StatCard, Testimonial};
use crate::store::{fetch_collection, fetch_singleton, ContentStore, StoreError};

/// Union of the five collections as fetched for one page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedContent {
    pub hero: Option<HeroContent>,
    pub stats: Vec<StatCard>,
    pub metrics: Vec<ImpactMetric>,
    pub focus_areas: Vec<FocusArea>,
    pub testimonials: Vec<Testimonial>,
    /// Sections left at their defaults because their read failed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<SectionFailure>,
}

impl AggregatedContent {
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn focus_area(&self, slug: &str) -> Option<&FocusArea> {
        self.focus_areas.iter().find(|a| a.slug == slug)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionFailure {
    pub collection: Collection,
    pub reason: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    /// Not a single section could be read
    #[error("content store unavailable: {} of {} reads failed", .failures.len(), Collection::ALL.len())]
    Unavailable { failures: Vec<SectionFailure> },
}

/// Fetch all five collections concurrently
///
/// Partial failure is not an error: the failed sections are listed in
/// [`AggregatedContent::failures`]. Only a store that fails every read
/// yields [`LoadError::Unavailable`].
pub async fn load_content(store: &dyn ContentStore) -> Result<AggregatedContent, LoadError> {
    let (hero, stats, metrics, focus_areas, testimonials) = tokio::join!(
        fetch_singleton::<HeroContent>(store),
        fetch_collection::<StatCard>(store),
        fetch_collection::<ImpactMetric>(store),
        fetch_collection::<FocusArea>(store),
        fetch_collection::<Testimonial>(store),
    );

    let mut content = AggregatedContent::default();
    let mut failures = Vec::new();

    if let Some(hero) = settle(Collection::HeroContent, hero, &mut failures) {
        content.hero = hero;
    }
    if let Some(stats) = settle(Collection::StatsCards, stats, &mut failures) {
        content.stats = stats;
    }
    if let Some(metrics) = settle(Collection::ImpactMetrics, metrics, &mut failures) {
        content.metrics = metrics;
    }
    if let Some(areas) = settle(Collection::FocusAreas, focus_areas, &mut failures) {
        content.focus_areas = areas;
    }
    if let Some(testimonials) = settle(Collection::Testimonials, testimonials, &mut failures) {
        content.testimonials = testimonials;
    }

    if failures.len() == Collection::ALL.len() {
        tracing::error!(store = store.name(), "Every content read failed");
        return Err(LoadError::Unavailable { failures });
    }

    tracing::debug!(
        store = store.name(),
        stats = content.stats.len(),
        metrics = content.metrics.len(),
        focus_areas = content.focus_areas.len(),
        testimonials = content.testimonials.len(),
        degraded = failures.len(),
        "Content loaded"
    );
    content.failures = failures;
    Ok(content)
}

fn settle<T>(
    collection: Collection,
    result: Result<T, StoreError>,
    failures: &mut Vec<SectionFailure>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(table = %collection, error = %e, "Section read failed, keeping default");
            failures.push(SectionFailure {
                collection,
                reason: e.to_string(),
            });
            None
        }
    }
}
