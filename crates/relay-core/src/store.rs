//! Snapshot persistence for the registry and the execution log.
//!
//! Failures here are never returned to callers: `load` and `save` log a
//! diagnostic and leave both memory and the previous file untouched.

use crate::action::{null_as_default, Action};
use crate::error::Result;
use crate::io;
use crate::log::{ExecutionLog, LogEntry};
use crate::registry::ActionRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// On-disk shape of the relay state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub actions: HashMap<String, Action>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub logs: Vec<LogEntry>,
}

impl Snapshot {
    /// Read and parse a snapshot. `Ok(None)` when the file does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        let Some(bytes) = io::read_if_exists(path)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_vec_pretty(self)?;
        io::atomic_write(path, &data)
    }
}

pub struct Store {
    path: PathBuf,
    registry: Arc<ActionRegistry>,
    log: Arc<ExecutionLog>,
    write_lock: Mutex<()>,
}

impl Store {
    pub fn new(path: PathBuf, registry: Arc<ActionRegistry>, log: Arc<ExecutionLog>) -> Self {
        Self {
            path,
            registry,
            log,
            write_lock: Mutex::new(()),
        }
    }

    /// Hydrate the registry and log from disk. A missing file is a first
    /// run; an unreadable one is reported and ignored.
    pub fn load(&self) {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        match Snapshot::read(&self.path) {
            Ok(Some(snapshot)) => {
                tracing::debug!(
                    path = %self.path.display(),
                    actions = snapshot.actions.len(),
                    logs = snapshot.logs.len(),
                    "loaded snapshot"
                );
                self.registry.replace(snapshot.actions);
                self.log.replace(snapshot.logs);
            }
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "no snapshot yet");
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), "error loading data: {e}");
            }
        }
    }

    /// Write the current registry and log to disk, replacing the previous
    /// snapshot.
    pub fn save(&self) {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let snapshot = Snapshot {
            actions: self.registry.snapshot(),
            logs: self.log.list(),
        };
        if let Err(e) = snapshot.write(&self.path) {
            tracing::error!(path = %self.path.display(), "error saving data: {e}");
        }
    }
}
