//! Content store access
//!
//! The store is the only shared resource: a set of flat tables read whole
//! and updated row by row. [`ContentStore`] is the seam; [`MemoryStore`]
//! backs local mode and tests, [`RestStore`] talks to a PostgREST backend.

pub mod error;
pub mod memory;
pub mod rest;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{StoreConfig, StoreKind};
use crate::model::{sort_by_display_order, Collection, Record, RecordId, Row};

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use rest::{RestConfig, RestStore};

/// Column used to order every ordered collection
pub const DISPLAY_ORDER: &str = "display_order";

/// Read of one whole table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub collection: Collection,
    /// Ascending sort column; ties keep storage order
    pub order_by: Option<String>,
}

impl SelectQuery {
    pub fn all(collection: Collection) -> Self {
        Self {
            collection,
            order_by: None,
        }
    }

    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.order_by = Some(column.into());
        self
    }
}

/// Read/write protocol of the content store
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Backend identifier for logs
    fn name(&self) -> &str;

    /// Zero or more rows of one table
    async fn select(&self, query: SelectQuery) -> Result<Vec<Row>>;

    /// The only row of a singleton table, `None` when it is empty
    async fn select_single(&self, collection: Collection) -> Result<Option<Row>>;

    /// Replace the named subset of fields on one row
    async fn update(&self, collection: Collection, id: RecordId, patch: Row) -> Result<()>;
}

/// Read a whole collection, ordered by `display_order` where it has one
pub async fn fetch_collection<R: Record>(store: &dyn ContentStore) -> Result<Vec<R>> {
    let collection = R::COLLECTION;
    let mut query = SelectQuery::all(collection);
    if collection.is_ordered() {
        query = query.order_by(DISPLAY_ORDER);
    }

    let rows = store.select(query).await?;
    let mut records = rows
        .into_iter()
        .map(R::from_row)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    // Stable, so a store that already ordered the rows is left untouched
    sort_by_display_order(&mut records);
    Ok(records)
}

/// Read a singleton record
pub async fn fetch_singleton<R: Record>(store: &dyn ContentStore) -> Result<Option<R>> {
    match store.select_single(R::COLLECTION).await? {
        Some(row) => Ok(Some(R::from_row(row)?)),
        None => Ok(None),
    }
}

/// Write the set editable fields of `record` back to its row
pub async fn write_record<R: Record>(store: &dyn ContentStore, record: &R) -> Result<()> {
    let patch = record.editable_patch()?;
    store.update(R::COLLECTION, record.id(), patch).await
}

/// Build the store described by configuration
pub async fn open(config: &StoreConfig) -> Result<Arc<dyn ContentStore>> {
    match config.kind {
        StoreKind::Memory => {
            let store = match &config.seed_path {
                Some(path) => MemoryStore::load_seed(path).await?,
                None => MemoryStore::new(),
            };
            Ok(Arc::new(store))
        }
        StoreKind::Rest => {
            let base_url = config.base_url.clone().ok_or_else(|| {
                StoreError::InvalidConfig("rest store requires base_url".to_string())
            })?;
            let store = RestStore::new(RestConfig {
                base_url,
                api_key: config.api_key.clone(),
                timeout_secs: config.timeout_secs,
            })?;
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeroContent, StatCard};
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn test_fetch_collection_orders_rows() {
        let store = MemoryStore::new();
        for (order, label) in [(3, "c"), (1, "a"), (2, "b")] {
            store
                .insert(
                    Collection::StatsCards,
                    row(json!({"label": label, "value": "1", "icon": "Users", "display_order": order})),
                )
                .await;
        }

        let stats = fetch_collection::<StatCard>(&store).await.unwrap();
        let labels: Vec<_> = stats.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_fetch_singleton_absent() {
        let store = MemoryStore::new();
        let hero = fetch_singleton::<HeroContent>(&store).await.unwrap();
        assert!(hero.is_none());
    }

    #[tokio::test]
    async fn test_open_rest_without_url_is_rejected() {
        let config = StoreConfig {
            kind: StoreKind::Rest,
            ..Default::default()
        };
        let err = open(&config).await.err().unwrap();
        assert!(matches!(err, StoreError::InvalidConfig(_)));
    }
}
