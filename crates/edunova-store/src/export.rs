//! JSON export snapshots.
//!
//! The admin pages offered a "download everything as JSON" debug action;
//! this module builds the equivalent serializable document from any
//! store's records plus its activity log.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::activity::ActivityEntry;

/// A point-in-time dump of one store.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSnapshot {
    pub exported_at: DateTime<Utc>,
    /// Raw record count, including deactivated records.
    pub total_records: usize,
    /// The active records, serialized as a JSON array.
    pub active_records: serde_json::Value,
    pub activity_log: Vec<ActivityEntry>,
}

impl ExportSnapshot {
    /// Build a snapshot from the active records of a store.
    /// `total_records` is the raw count; `active` only what survives the
    /// status filter.
    pub fn build<T: Serialize>(
        total_records: usize,
        active: &[&T],
        activity_log: &[ActivityEntry],
    ) -> Self {
        let active_records = serde_json::to_value(active).unwrap_or(serde_json::Value::Null);
        Self {
            exported_at: Utc::now(),
            total_records,
            active_records,
            activity_log: activity_log.to_vec(),
        }
    }

    /// Pretty-printed JSON document, the shape the download produced.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
