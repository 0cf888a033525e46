//! Writing edited records back to the content store
//!
//! Each record is written with every editable field (last writer wins, no
//! check for changes made since load). Writes are sequential: one request
//! in flight at a time. Every record gets its own outcome and the outcomes
//! are folded into a single notification.

use serde::Serialize;

use super::notification::Notification;
use crate::model::{Collection, HeroContent, Record, RecordId};
use crate::store::{write_record, ContentStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordOutcome {
    pub id: RecordId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecordOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveStatus {
    Success,
    PartialFailure,
    Failure,
}

/// Result of one save action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    pub collection: Collection,
    pub status: SaveStatus,
    pub outcomes: Vec<RecordOutcome>,
    pub notification: Notification,
}

impl SaveReport {
    pub fn from_outcomes(collection: Collection, outcomes: Vec<RecordOutcome>) -> Self {
        let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
        let status = if failed == 0 {
            SaveStatus::Success
        } else if failed == outcomes.len() {
            SaveStatus::Failure
        } else {
            SaveStatus::PartialFailure
        };

        let label = collection.label();
        let notification = match status {
            SaveStatus::Success => Notification::success(format!("{label} updated")),
            SaveStatus::Failure => {
                Notification::failure(format!("Failed to update {}", label.to_lowercase()))
            }
            SaveStatus::PartialFailure => {
                let ids: Vec<String> = outcomes
                    .iter()
                    .filter(|o| !o.is_ok())
                    .map(|o| o.id.to_string())
                    .collect();
                Notification::failure(format!(
                    "Some {} could not be saved",
                    label.to_lowercase()
                ))
                .with_description(format!(
                    "{} of {} records failed: {}",
                    failed,
                    outcomes.len(),
                    ids.join(", ")
                ))
            }
        };

        Self {
            collection,
            status,
            outcomes,
            notification,
        }
    }

    pub fn failed_ids(&self) -> Vec<RecordId> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_ok())
            .map(|o| o.id)
            .collect()
    }
}

/// Write the hero singleton
pub async fn save_hero(store: &dyn ContentStore, hero: &HeroContent) -> SaveReport {
    save_collection(store, std::slice::from_ref(hero)).await
}

/// Write every record of a collection, one awaited update per record
pub async fn save_collection<R: Record>(store: &dyn ContentStore, records: &[R]) -> SaveReport {
    let mut outcomes = Vec::with_capacity(records.len());

    for record in records {
        let id = record.id();
        let error = match write_record(store, record).await {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(table = %R::COLLECTION, %id, error = %e, "Record write failed");
                Some(e.to_string())
            }
        };
        outcomes.push(RecordOutcome { id, error });
    }

    let report = SaveReport::from_outcomes(R::COLLECTION, outcomes);
    tracing::info!(
        table = %R::COLLECTION,
        records = records.len(),
        status = ?report.status,
        "Saved collection"
    );
    report
}
