use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("action name must be unique: '{0}' is already taken")]
    DuplicateName(String),

    #[error("action not found: {0}")]
    ActionNotFound(String),

    #[error("request creation error: {0}")]
    RequestConstruction(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RelayError>;
