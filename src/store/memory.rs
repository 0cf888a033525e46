//! In-process content store
//!
//! Tables keep rows in insertion order. Reads and writes can be made to
//! fail per table / per row so callers can exercise degraded paths.

use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};
use tokio::sync::RwLock;

use super::error::{Result, StoreError};
use super::{ContentStore, SelectQuery};
use crate::model::{Collection, RecordId, Row};

/// Seed file layout: table name → rows
pub type Seed = BTreeMap<Collection, Vec<Row>>;

#[derive(Debug, Default)]
struct Tables {
    rows: HashMap<Collection, Vec<Row>>,
    failing_reads: HashSet<Collection>,
    failing_writes: HashSet<RecordId>,
}

/// Content store held in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    update_calls: AtomicU32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from seed tables; rows without an `id` get one
    pub fn from_seed(seed: Seed) -> Self {
        let mut tables = Tables::default();
        for (collection, rows) in seed {
            let rows = rows.into_iter().map(with_id).collect();
            tables.rows.insert(collection, rows);
        }
        Self {
            tables: RwLock::new(tables),
            update_calls: AtomicU32::new(0),
        }
    }

    /// Read a JSON seed file
    pub async fn load_seed(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| StoreError::Seed {
                path: path.to_path_buf(),
                source,
            })?;
        let seed: Seed = serde_json::from_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            tables = seed.len(),
            "Loaded content seed"
        );
        Ok(Self::from_seed(seed))
    }

    /// Make every read of `collection` fail
    pub fn with_failing_reads(mut self, collection: Collection) -> Self {
        self.tables.get_mut().failing_reads.insert(collection);
        self
    }

    /// Make every write to row `id` fail
    pub fn with_failing_write(mut self, id: RecordId) -> Self {
        self.tables.get_mut().failing_writes.insert(id);
        self
    }

    pub async fn set_failing_write(&self, id: RecordId) {
        self.tables.write().await.failing_writes.insert(id);
    }

    /// Append a row, assigning an `id` if it has none; returns the id
    pub async fn insert(&self, collection: Collection, row: Row) -> RecordId {
        let row = with_id(row);
        let id = row_id(&row).unwrap_or_default();
        self.tables
            .write()
            .await
            .rows
            .entry(collection)
            .or_default()
            .push(row);
        id
    }

    /// Rows of a table in storage order
    pub async fn rows(&self, collection: Collection) -> Vec<Row> {
        self.tables
            .read()
            .await
            .rows
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of update calls received, failed ones included
    pub fn update_calls(&self) -> u32 {
        self.update_calls.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn select(&self, query: SelectQuery) -> Result<Vec<Row>> {
        let tables = self.tables.read().await;
        if tables.failing_reads.contains(&query.collection) {
            return Err(StoreError::Injected(format!("read of {}", query.collection)));
        }

        let mut rows = tables
            .rows
            .get(&query.collection)
            .cloned()
            .unwrap_or_default();

        if let Some(column) = &query.order_by {
            rows.sort_by(|a, b| compare_values(a.get(column), b.get(column)));
        }
        Ok(rows)
    }

    async fn select_single(&self, collection: Collection) -> Result<Option<Row>> {
        let mut rows = self.select(SelectQuery::all(collection)).await?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            _ => Err(StoreError::MultipleRows(collection)),
        }
    }

    async fn update(&self, collection: Collection, id: RecordId, patch: Row) -> Result<()> {
        self.update_calls.fetch_add(1, AtomicOrdering::SeqCst);

        let mut tables = self.tables.write().await;
        if tables.failing_writes.contains(&id) {
            return Err(StoreError::Injected(format!("write of {collection} row {id}")));
        }

        let row = tables
            .rows
            .get_mut(&collection)
            .and_then(|rows| rows.iter_mut().find(|r| row_id(r) == Some(id)))
            .ok_or(StoreError::NotFound { collection, id })?;

        for (field, value) in patch {
            row.insert(field, value);
        }
        Ok(())
    }
}

fn row_id(row: &Row) -> Option<RecordId> {
    row.get("id")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
}

fn with_id(mut row: Row) -> Row {
    if row_id(&row).is_none() {
        row.insert("id".to_string(), Value::String(RecordId::new().to_string()));
    }
    row
}

/// Ascending order with nulls last, numbers before text
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.as_str().unwrap_or_default().cmp(b.as_str().unwrap_or_default()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn test_select_orders_nulls_last_and_keeps_ties() {
        let store = MemoryStore::new();
        store.insert(Collection::Testimonials, row(json!({"quote": "n", "display_order": null}))).await;
        store.insert(Collection::Testimonials, row(json!({"quote": "b1", "display_order": 2}))).await;
        store.insert(Collection::Testimonials, row(json!({"quote": "a", "display_order": 1}))).await;
        store.insert(Collection::Testimonials, row(json!({"quote": "b2", "display_order": 2}))).await;

        let rows = store
            .select(SelectQuery::all(Collection::Testimonials).order_by("display_order"))
            .await
            .unwrap();
        let quotes: Vec<_> = rows.iter().map(|r| r["quote"].as_str().unwrap()).collect();
        assert_eq!(quotes, ["a", "b1", "b2", "n"]);
    }

    #[tokio::test]
    async fn test_select_single_rejects_duplicates() {
        let store = MemoryStore::new();
        store.insert(Collection::HeroContent, row(json!({"title": "one"}))).await;
        assert!(store.select_single(Collection::HeroContent).await.unwrap().is_some());

        store.insert(Collection::HeroContent, row(json!({"title": "two"}))).await;
        let err = store.select_single(Collection::HeroContent).await.unwrap_err();
        assert!(matches!(err, StoreError::MultipleRows(Collection::HeroContent)));
    }

    #[tokio::test]
    async fn test_update_replaces_only_patched_fields() {
        let store = MemoryStore::new();
        let id = store
            .insert(Collection::StatsCards, row(json!({"label": "old", "value": "1", "display_order": 0})))
            .await;

        store
            .update(Collection::StatsCards, id, row(json!({"label": "new"})))
            .await
            .unwrap();

        let rows = store.rows(Collection::StatsCards).await;
        assert_eq!(rows[0]["label"], json!("new"));
        assert_eq!(rows[0]["value"], json!("1"));
        assert_eq!(store.update_calls(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_row() {
        let store = MemoryStore::new();
        let err = store
            .update(Collection::StatsCards, RecordId::new(), Row::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let id = RecordId::new();
        let store = MemoryStore::from_seed(Seed::from([(
            Collection::FocusAreas,
            vec![row(json!({"id": id, "title": "t", "display_order": 0}))],
        )]))
        .with_failing_reads(Collection::ImpactMetrics)
        .with_failing_write(id);

        assert!(store.select(SelectQuery::all(Collection::ImpactMetrics)).await.is_err());
        assert!(store.select(SelectQuery::all(Collection::FocusAreas)).await.is_ok());
        assert!(store.update(Collection::FocusAreas, id, Row::new()).await.is_err());
    }
}
