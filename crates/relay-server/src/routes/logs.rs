use axum::{extract::State, Json};
use relay_core::log::LogEntry;

use super::blocking;
use crate::error::AppError;
use crate::state::AppState;

/// GET /logs — dispatch history, oldest first.
pub async fn list_logs(State(app): State<AppState>) -> Result<Json<Vec<LogEntry>>, AppError> {
    let relay = app.relay.clone();
    let logs = blocking(move || Ok(relay.logs())).await?;
    Ok(Json(logs))
}
