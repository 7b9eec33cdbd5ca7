//! In-memory action registry.
//!
//! Every operation takes the lock exactly once, so the name-uniqueness check
//! and the insert/update that follows it can never interleave with another
//! writer.

use crate::action::{validate_headers, Action, ActionUpdate, NewAction};
use crate::error::{RelayError, Result};
use crate::id::generate_id;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
pub struct ActionRegistry {
    actions: RwLock<HashMap<String, Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Action>> {
        self.actions.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Action>> {
        self.actions.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn create(&self, new: NewAction) -> Result<Action> {
        if new.name.is_empty() {
            return Err(RelayError::InvalidInput("name is required".into()));
        }
        if new.url.is_empty() {
            return Err(RelayError::InvalidInput("URL is required".into()));
        }
        if let Some(headers) = &new.headers {
            validate_headers(headers)?;
        }

        let mut actions = self.write();
        if actions.values().any(|a| a.name == new.name) {
            return Err(RelayError::DuplicateName(new.name));
        }
        let action = new.into_action(generate_id());
        actions.insert(action.id.clone(), action.clone());
        Ok(action)
    }

    pub fn get(&self, id: &str) -> Result<Action> {
        self.read()
            .get(id)
            .cloned()
            .ok_or_else(|| RelayError::ActionNotFound(id.to_string()))
    }

    pub fn find_by_name(&self, name: &str) -> Result<Action> {
        self.read()
            .values()
            .find(|a| a.name == name)
            .cloned()
            .ok_or_else(|| RelayError::ActionNotFound(name.to_string()))
    }

    /// Copy of every action, in no particular order.
    pub fn list(&self) -> Vec<Action> {
        self.read().values().cloned().collect()
    }

    pub fn update(&self, id: &str, update: ActionUpdate) -> Result<Action> {
        if let Some(headers) = &update.headers {
            validate_headers(headers)?;
        }
        let mut actions = self.write();
        if !actions.contains_key(id) {
            return Err(RelayError::ActionNotFound(id.to_string()));
        }
        if let Some(name) = update.new_name() {
            if actions.values().any(|a| a.id != id && a.name == name) {
                return Err(RelayError::DuplicateName(name.to_string()));
            }
        }
        let action = actions
            .get_mut(id)
            .ok_or_else(|| RelayError::ActionNotFound(id.to_string()))?;
        update.apply(action);
        Ok(action.clone())
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RelayError::ActionNotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub(crate) fn snapshot(&self) -> HashMap<String, Action> {
        self.read().clone()
    }

    pub(crate) fn replace(&self, actions: HashMap<String, Action>) {
        *self.write() = actions;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Headers;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn create_assigns_id_and_defaults() {
        let registry = ActionRegistry::new();
        let action = registry
            .create(NewAction::new("Ping", "http://x.invalid").with_method("GET"))
            .unwrap();
        assert_eq!(action.id.len(), 16);
        assert_eq!(action.method, "GET");
        assert_eq!(registry.get(&action.id).unwrap(), action);
    }

    #[test]
    fn create_requires_url_and_name() {
        let registry = ActionRegistry::new();
        let err = registry.create(NewAction::new("a", "")).unwrap_err();
        assert!(matches!(err, RelayError::InvalidInput(_)));
        let err = registry.create(NewAction::new("", "http://e.com")).unwrap_err();
        assert!(matches!(err, RelayError::InvalidInput(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let registry = ActionRegistry::new();
        registry.create(NewAction::new("A", "http://e.com")).unwrap();
        let err = registry
            .create(NewAction::new("A", "http://f.com"))
            .unwrap_err();
        assert!(matches!(err, RelayError::DuplicateName(ref n) if n == "A"));
        let named_a: Vec<_> = registry.list().into_iter().filter(|a| a.name == "A").collect();
        assert_eq!(named_a.len(), 1);
        assert_eq!(named_a[0].url, "http://e.com");
    }

    #[test]
    fn find_by_name_and_missing() {
        let registry = ActionRegistry::new();
        let created = registry.create(NewAction::new("A", "http://e.com")).unwrap();
        assert_eq!(registry.find_by_name("A").unwrap().id, created.id);
        assert!(matches!(
            registry.find_by_name("B"),
            Err(RelayError::ActionNotFound(_))
        ));
        assert!(matches!(
            registry.get("nonexistent"),
            Err(RelayError::ActionNotFound(_))
        ));
    }

    #[test]
    fn update_keeps_own_name_and_unset_fields() {
        let registry = ActionRegistry::new();
        let created = registry
            .create(
                NewAction::new("A", "http://e.com")
                    .with_headers(Headers::from([("X-Old".to_string(), "1".to_string())]))
                    .with_body("payload"),
            )
            .unwrap();

        let updated = registry
            .update(
                &created.id,
                ActionUpdate {
                    name: Some("A".into()),
                    url: Some("http://g.com".into()),
                    ..ActionUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.url, "http://g.com");
        assert_eq!(updated.method, "POST");
        assert_eq!(updated.body, "payload");
        assert_eq!(updated.headers, created.headers);
    }

    #[test]
    fn update_headers_replaces_map() {
        let registry = ActionRegistry::new();
        let created = registry
            .create(
                NewAction::new("A", "http://e.com")
                    .with_headers(Headers::from([("X-Old".to_string(), "1".to_string())])),
            )
            .unwrap();
        let updated = registry
            .update(
                &created.id,
                ActionUpdate {
                    headers: Some(Headers::from([("X-New".to_string(), "2".to_string())])),
                    ..ActionUpdate::default()
                },
            )
            .unwrap();
        assert!(!updated.headers.contains_key("X-Old"));
        assert_eq!(updated.headers.get("X-New").map(String::as_str), Some("2"));
    }

    #[test]
    fn update_rejects_name_of_other_action() {
        let registry = ActionRegistry::new();
        registry.create(NewAction::new("A", "http://e.com")).unwrap();
        let b = registry.create(NewAction::new("B", "http://f.com")).unwrap();
        let err = registry
            .update(
                &b.id,
                ActionUpdate {
                    name: Some("A".into()),
                    ..ActionUpdate::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, RelayError::DuplicateName(_)));
        assert_eq!(registry.get(&b.id).unwrap().name, "B");
    }

    #[test]
    fn case_colliding_headers_are_rejected() {
        let registry = ActionRegistry::new();
        let colliding = Headers::from([
            ("X-A".to_string(), "1".to_string()),
            ("x-a".to_string(), "2".to_string()),
        ]);
        let err = registry
            .create(NewAction::new("A", "http://e.com").with_headers(colliding.clone()))
            .unwrap_err();
        assert!(matches!(err, RelayError::InvalidInput(_)));
        assert!(registry.is_empty());

        let created = registry.create(NewAction::new("A", "http://e.com")).unwrap();
        let err = registry
            .update(
                &created.id,
                ActionUpdate {
                    headers: Some(colliding),
                    ..ActionUpdate::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, RelayError::InvalidInput(_)));
        assert!(registry.get(&created.id).unwrap().headers.is_empty());
    }

    #[test]
    fn update_and_delete_missing_id() {
        let registry = ActionRegistry::new();
        assert!(matches!(
            registry.update("nope", ActionUpdate::default()),
            Err(RelayError::ActionNotFound(_))
        ));
        assert!(matches!(
            registry.delete("nope"),
            Err(RelayError::ActionNotFound(_))
        ));
    }

    #[test]
    fn delete_then_get_fails() {
        let registry = ActionRegistry::new();
        let created = registry.create(NewAction::new("A", "http://e.com")).unwrap();
        registry.delete(&created.id).unwrap();
        assert!(matches!(
            registry.get(&created.id),
            Err(RelayError::ActionNotFound(_))
        ));
    }

    #[test]
    fn concurrent_creates_with_distinct_names_all_succeed() {
        let registry = Arc::new(ActionRegistry::new());
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry
                        .create(NewAction::new(format!("action-{i}"), "http://e.com"))
                        .unwrap()
                        .id
                })
            })
            .collect();
        let ids: HashSet<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(ids.len(), 16);
        assert_eq!(registry.len(), 16);
    }

    #[test]
    fn concurrent_creates_with_same_name_admit_exactly_one() {
        let registry = Arc::new(ActionRegistry::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.create(NewAction::new("same", "http://e.com")))
            })
            .collect();
        let ok = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|r| r.is_ok())
            .count();
        assert_eq!(ok, 1);
        assert_eq!(registry.len(), 1);
    }
}
