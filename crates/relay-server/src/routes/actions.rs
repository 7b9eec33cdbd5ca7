use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use relay_core::action::{Action, ActionUpdate, NewAction};

use super::blocking;
use crate::error::AppError;
use crate::state::AppState;

/// GET /actions — every action, unordered.
pub async fn list_actions(State(app): State<AppState>) -> Result<Json<Vec<Action>>, AppError> {
    let relay = app.relay.clone();
    let actions = blocking(move || Ok(relay.list_actions())).await?;
    Ok(Json(actions))
}

/// POST /actions — create an action; the ID in the body, if any, is ignored.
pub async fn create_action(
    State(app): State<AppState>,
    body: Result<Json<NewAction>, JsonRejection>,
) -> Result<Json<Action>, AppError> {
    let Json(body) = body?;
    let relay = app.relay.clone();
    let action = blocking(move || relay.create_action(body)).await?;
    Ok(Json(action))
}

/// GET /actions/{id}
pub async fn get_action(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Action>, AppError> {
    let relay = app.relay.clone();
    let action = blocking(move || relay.get_action(&id)).await?;
    Ok(Json(action))
}

/// PUT /actions/{id} — replace the supplied fields only.
pub async fn update_action(
    State(app): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ActionUpdate>, JsonRejection>,
) -> Result<Json<Action>, AppError> {
    let Json(body) = body?;
    let relay = app.relay.clone();
    let action = blocking(move || relay.update_action(&id, body)).await?;
    Ok(Json(action))
}

/// DELETE /actions/{id}
pub async fn delete_action(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let relay = app.relay.clone();
    blocking(move || relay.delete_action(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
