//! Outbound execution of actions.
//!
//! A dispatch produces exactly one log entry. Transport failures are an
//! ordinary `Outcome { success: false, .. }`; only a request that cannot be
//! built at all surfaces as an error.

use crate::action::Action;
use crate::error::{RelayError, Result};
use crate::log::ExecutionLog;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Budget for the whole call: connect, send, and response.
pub const DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
}

pub struct Dispatcher {
    log: Arc<ExecutionLog>,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(log: Arc<ExecutionLog>) -> Self {
        Self {
            log,
            timeout: DISPATCH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fire the action's request once and record the result.
    ///
    /// Blocks for up to the dispatch timeout. Callers must not hold any
    /// registry lock across this call.
    pub fn execute(&self, action: &Action) -> Result<Outcome> {
        let (client, request) = match self.build_request(action) {
            Ok(built) => built,
            Err(reason) => {
                tracing::warn!(action_id = %action.id, "cannot build request: {reason}");
                self.log
                    .append(&action.id, false, format!("Request creation error: {reason}"));
                return Err(RelayError::RequestConstruction(reason));
            }
        };

        let outcome = match client.execute(request) {
            Ok(response) => {
                let status = response.status();
                Outcome {
                    success: status.is_success(),
                    message: format!("Status: {status}"),
                }
            }
            Err(e) => Outcome {
                success: false,
                message: format!("Request failed: {}", error_chain(&e)),
            },
        };

        if outcome.success {
            tracing::info!(action_id = %action.id, name = %action.name, "{}", outcome.message);
        } else {
            tracing::warn!(action_id = %action.id, name = %action.name, "{}", outcome.message);
        }
        self.log.append(&action.id, outcome.success, &outcome.message);
        Ok(outcome)
    }

    fn build_request(
        &self,
        action: &Action,
    ) -> std::result::Result<(Client, reqwest::blocking::Request), String> {
        let method = Method::from_bytes(action.method.as_bytes())
            .map_err(|_| format!("invalid method '{}'", action.method))?;
        let url = Url::parse(&action.url).map_err(|e| format!("invalid URL '{}': {e}", action.url))?;

        let mut headers = HeaderMap::new();
        for (key, value) in &action.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| format!("invalid header name '{key}'"))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| format!("invalid value for header '{key}'"))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| e.to_string())?;
        let request = client
            .request(method, url)
            .headers(headers)
            .body(action.body.clone())
            .build()
            .map_err(|e| e.to_string())?;
        Ok((client, request))
    }
}

/// Render an error and its sources as `outer: inner: root`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
