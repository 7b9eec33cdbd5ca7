use axum::{
    extract::{Path, State},
    Json,
};
use relay_core::dispatch::Outcome;

use super::blocking;
use crate::error::AppError;
use crate::state::AppState;

/// GET /trigger/{*name} — dispatch by name, reply with a one-line summary.
///
/// A transport failure is still a 200: the body reports `Success: false`.
pub async fn trigger_by_name(
    State(app): State<AppState>,
    Path(name): Path<String>,
) -> Result<String, AppError> {
    let relay = app.relay.clone();
    let outcome = blocking(move || relay.trigger_by_name(&name)).await?;
    Ok(format!(
        "Action triggered: {} (Success: {})",
        outcome.message, outcome.success
    ))
}

/// POST /actions/{id}/trigger — dispatch by ID, reply with the outcome.
pub async fn trigger_by_id(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Outcome>, AppError> {
    let relay = app.relay.clone();
    let outcome = blocking(move || relay.trigger_by_id(&id)).await?;
    Ok(Json(outcome))
}
