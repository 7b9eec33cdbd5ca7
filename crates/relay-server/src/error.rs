use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use relay_core::error::RelayError;

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Status code the error maps to. Anything that is not a `RelayError`
    /// is treated as an internal failure.
    pub fn status(&self) -> StatusCode {
        if self.0.downcast_ref::<JsonRejection>().is_some() {
            return StatusCode::BAD_REQUEST;
        }
        match self.0.downcast_ref::<RelayError>() {
            Some(RelayError::InvalidInput(_) | RelayError::DuplicateName(_)) => {
                StatusCode::BAD_REQUEST
            }
            Some(RelayError::ActionNotFound(_)) => StatusCode::NOT_FOUND,
            Some(
                RelayError::RequestConstruction(_)
                | RelayError::Io(_)
                | RelayError::Yaml(_)
                | RelayError::Json(_),
            )
            | None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{:#}", self.0);
        }
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
