use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;

use crate::errors::StoreError;

pub type ServerResult<T> = Result<T, ServerError>;

/// Errors answered by the HTTP surface
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Not found")]
    NotFound,

    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Content store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Unknown locale prefixes are just unknown paths
            ServerError::NotFound | ServerError::UnsupportedLocale(_) => StatusCode::NOT_FOUND,
            ServerError::Store(_) | ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ServerError::NotFound | ServerError::UnsupportedLocale(_) => "NOT_FOUND",
            ServerError::Store(_) => "CONTENT_UNAVAILABLE",
            ServerError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Store details stay in the log
        let message = if status.is_server_error() {
            error!("{}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}
