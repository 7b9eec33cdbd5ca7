//! Action definitions: the stored request template plus the create/update
//! payloads accepted by the registry.

use crate::error::{RelayError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};

pub const DEFAULT_METHOD: &str = "POST";

pub type Headers = BTreeMap<String, String>;

/// A named, replayable HTTP request template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: Headers,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
}

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

/// Treat an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Header names are case-insensitive on the wire, so two keys differing
/// only in case would collapse into one header at dispatch.
pub fn validate_headers(headers: &Headers) -> Result<()> {
    let mut seen = HashSet::new();
    for key in headers.keys() {
        if !seen.insert(key.to_ascii_lowercase()) {
            return Err(RelayError::InvalidInput(format!(
                "header '{key}' is given more than once (names are case-insensitive)"
            )));
        }
    }
    Ok(())
}

/// Fields for a new action. The ID is always assigned by the registry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAction {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub headers: Option<Headers>,
    #[serde(default)]
    pub body: Option<String>,
}

impl NewAction {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub(crate) fn into_action(self, id: String) -> Action {
        let method = self
            .method
            .filter(|m| !m.is_empty())
            .unwrap_or_else(default_method);
        Action {
            id,
            name: self.name,
            url: self.url,
            method,
            headers: self.headers.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
        }
    }
}

/// Partial update. `None` (or an empty name/url/method) leaves the field
/// alone; `headers`, when present, replaces the whole map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub headers: Option<Headers>,
    #[serde(default)]
    pub body: Option<String>,
}

impl ActionUpdate {
    /// The new name, if this update actually renames the action.
    pub fn new_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    pub(crate) fn apply(self, action: &mut Action) {
        if let Some(name) = self.name.filter(|n| !n.is_empty()) {
            action.name = name;
        }
        if let Some(url) = self.url.filter(|u| !u.is_empty()) {
            action.url = url;
        }
        if let Some(method) = self.method.filter(|m| !m.is_empty()) {
            action.method = method;
        }
        if let Some(headers) = self.headers {
            action.headers = headers;
        }
        if let Some(body) = self.body {
            action.body = body;
        }
    }
}

/// Parse a `Key:Value` header argument. Both sides are trimmed.
pub fn parse_header(raw: &str) -> Option<(String, String)> {
    let (key, value) = raw.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}
