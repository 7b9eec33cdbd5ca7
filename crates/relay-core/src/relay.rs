//! The `Relay` ties the registry, log, dispatcher, and store together and
//! writes a snapshot after every successful mutation.

use crate::action::{Action, ActionUpdate, NewAction};
use crate::config::Config;
use crate::dispatch::{Dispatcher, Outcome};
use crate::error::{RelayError, Result};
use crate::log::{ExecutionLog, LogEntry};
use crate::registry::ActionRegistry;
use crate::store::Store;
use std::path::PathBuf;
use std::sync::Arc;

pub struct Relay {
    registry: Arc<ActionRegistry>,
    log: Arc<ExecutionLog>,
    dispatcher: Dispatcher,
    store: Store,
}

impl Relay {
    /// Build a relay backed by `config.data_file` and load any existing
    /// snapshot.
    pub fn open(config: &Config) -> Self {
        Self::with_data_file(config.data_file.clone())
    }

    pub fn with_data_file(data_file: PathBuf) -> Self {
        let registry = Arc::new(ActionRegistry::new());
        let log = Arc::new(ExecutionLog::new());
        let relay = Self {
            dispatcher: Dispatcher::new(Arc::clone(&log)),
            store: Store::new(data_file, Arc::clone(&registry), Arc::clone(&log)),
            registry,
            log,
        };
        relay.store.load();
        relay
    }

    pub fn create_action(&self, new: NewAction) -> Result<Action> {
        let action = self.registry.create(new)?;
        tracing::info!(id = %action.id, name = %action.name, "created action");
        self.store.save();
        Ok(action)
    }

    pub fn get_action(&self, id: &str) -> Result<Action> {
        self.registry.get(id)
    }

    pub fn find_action(&self, name: &str) -> Result<Action> {
        self.registry.find_by_name(name)
    }

    pub fn list_actions(&self) -> Vec<Action> {
        self.registry.list()
    }

    pub fn update_action(&self, id: &str, update: ActionUpdate) -> Result<Action> {
        let action = self.registry.update(id, update)?;
        tracing::info!(id = %action.id, name = %action.name, "updated action");
        self.store.save();
        Ok(action)
    }

    pub fn delete_action(&self, id: &str) -> Result<()> {
        self.registry.delete(id)?;
        tracing::info!(id, "deleted action");
        self.store.save();
        Ok(())
    }

    pub fn trigger_by_id(&self, id: &str) -> Result<Outcome> {
        let action = self.registry.get(id)?;
        self.dispatch(&action)
    }

    pub fn trigger_by_name(&self, name: &str) -> Result<Outcome> {
        let action = self.registry.find_by_name(name)?;
        self.dispatch(&action)
    }

    pub fn logs(&self) -> Vec<LogEntry> {
        self.log.list()
    }

    fn dispatch(&self, action: &Action) -> Result<Outcome> {
        let result = self.dispatcher.execute(action);
        // Both outcomes and construction errors appended a log entry.
        match &result {
            Ok(_) | Err(RelayError::RequestConstruction(_)) => self.store.save(),
            Err(_) => {}
        }
        result
    }
}
