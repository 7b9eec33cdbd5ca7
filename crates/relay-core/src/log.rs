//! Append-only history of dispatch attempts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub action_id: String,
    pub success: bool,
    pub response: String,
}

#[derive(Debug, Default)]
pub struct ExecutionLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record one attempt, stamped with the current time.
    pub fn append(&self, action_id: &str, success: bool, response: impl Into<String>) -> LogEntry {
        let entry = LogEntry {
            timestamp: Utc::now(),
            action_id: action_id.to_string(),
            success,
            response: response.into(),
        };
        self.lock().push(entry.clone());
        entry
    }

    /// All entries in append order.
    pub fn list(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub(crate) fn replace(&self, entries: Vec<LogEntry>) {
        *self.lock() = entries;
    }
}
