/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use muse_core::MuseError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Store error: {0}")]
    Store(MuseError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<MuseError> for ServerError {
    fn from(err: MuseError) -> Self {
        match err {
            MuseError::InvalidInput(msg) => ServerError::BadRequest(msg),
            MuseError::Duplicate(msg) => ServerError::Conflict(msg),
            MuseError::NotFound { entity, id } => {
                ServerError::NotFound(format!("{} not found: {}", entity, id))
            }
            other => ServerError::Store(other),
        }
    }
}

impl From<muse_storage::StorageError> for ServerError {
    fn from(err: muse_storage::StorageError) -> Self {
        MuseError::from(err).into()
    }
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_)
            | ServerError::Conflict(_)
            | ServerError::InvalidCredentials => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            ServerError::BadRequest(msg)
            | ServerError::Conflict(msg)
            | ServerError::NotFound(msg) => msg,
            ServerError::InvalidCredentials => "Invalid username or password".to_string(),
            ServerError::Store(ref e) => {
                tracing::error!("Store error: {:?}", e);
                "Database error".to_string()
            }
            ServerError::Storage(ref msg) => {
                tracing::error!("Storage error: {}", msg);
                "Storage error".to_string()
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                "Configuration error".to_string()
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                "IO error".to_string()
            }
            ServerError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                "Password error".to_string()
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_client_statuses() {
        let cases = [
            (MuseError::invalid_input("title"), StatusCode::BAD_REQUEST),
            (MuseError::duplicate("alice"), StatusCode::BAD_REQUEST),
            (MuseError::not_found("Song", "x"), StatusCode::NOT_FOUND),
            (MuseError::storage("disk full"), StatusCode::INTERNAL_SERVER_ERROR),
            (MuseError::Database("locked".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ServerError::from(err).status(), expected);
        }
    }

    #[test]
    fn invalid_credentials_is_bad_request() {
        assert_eq!(
            ServerError::InvalidCredentials.status(),
            StatusCode::BAD_REQUEST
        );
    }
}
