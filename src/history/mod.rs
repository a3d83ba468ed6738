//! History of past analyses
//!
//! The log is an append-only list of [`HistoryRecord`]s, most recent first.
//! Stores load it wholesale and rewrite it wholesale on every append.

mod memory;
mod sqlite;

pub use memory::InMemoryHistoryStore;
pub use sqlite::SqliteHistoryStore;

use crate::analysis::AnalysisResult;
use crate::error::{Result, ReviewIqError};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Snapshot of one successful analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: String,
    /// Unix milliseconds
    pub timestamp: i64,
    pub business_name: String,
    pub review_count: usize,
    pub result: AnalysisResult,
}

impl HistoryRecord {
    pub fn new(business_name: impl Into<String>, review_count: usize, result: AnalysisResult) -> Self {
        Self {
            id: format!("analysis-{}", Uuid::new_v4()),
            timestamp: Utc::now().timestamp_millis(),
            business_name: business_name.into(),
            review_count,
            result,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.timestamp)
            .single()
            .unwrap_or_default()
    }
}

/// Persistence backend for the history log
pub trait HistoryStore: Send + Sync {
    /// Every record, most recent first
    fn get_all(&self) -> Result<Vec<HistoryRecord>>;

    /// Add a record in front of all existing ones
    fn append(&self, record: HistoryRecord) -> Result<()>;
}

/// Encode a full log for storage
pub(crate) fn encode_log(records: &[HistoryRecord]) -> Result<String> {
    serde_json::to_string(records).map_err(|e| ReviewIqError::Json {
        source: e,
        context: "Failed to serialize history log".to_string(),
    })
}

/// Decode a stored log
pub(crate) fn decode_log(text: &str) -> Result<Vec<HistoryRecord>> {
    serde_json::from_str(text).map_err(|e| ReviewIqError::Json {
        source: e,
        context: "Failed to deserialize history log".to_string(),
    })
}

/// History operations over an injected store
#[derive(Clone)]
pub struct HistoryLog {
    store: Arc<dyn HistoryStore>,
}

impl HistoryLog {
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self { store }
    }

    /// Record a successful analysis and return the stored record
    pub fn record(
        &self,
        business_name: &str,
        review_count: usize,
        result: &AnalysisResult,
    ) -> Result<HistoryRecord> {
        let record = HistoryRecord::new(business_name, review_count, result.clone());
        self.store.append(record.clone())?;
        tracing::info!(
            "Saved analysis {} for '{}' ({} reviews)",
            record.id,
            record.business_name,
            record.review_count
        );
        Ok(record)
    }

    pub fn list(&self) -> Result<Vec<HistoryRecord>> {
        self.store.get_all()
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.store.get_all()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn find(&self, id: &str) -> Result<HistoryRecord> {
        self.store
            .get_all()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| ReviewIqError::HistoryNotFound { id: id.to_string() })
    }
}
