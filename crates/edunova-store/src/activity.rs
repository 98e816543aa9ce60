//! Per-page activity log.
//!
//! Mirrors the `logActivity` pattern of the admin pages: every mutation
//! appends a timestamped record that only debug tooling and the export
//! snapshot ever read.  Each record is also emitted through `tracing`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One logged action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityEntry {
    pub at: DateTime<Utc>,
    /// Upper-snake action tag, e.g. `ADD_COURSE`.
    pub action: String,
    /// The user the page was running as.
    pub actor: String,
    /// Free-form action payload.
    pub details: serde_json::Value,
}

/// Ordered activity records for one page session.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and emit it as a debug trace.
    pub fn record(&mut self, action: &str, actor: &str, details: serde_json::Value) {
        debug!(action, actor, %details, "activity");
        self.entries.push(ActivityEntry {
            at: Utc::now(),
            action: action.to_string(),
            actor: actor.to_string(),
            details,
        });
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all records, as the logout reset does.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
