use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Any failure while reading user data from the film source
    #[error("Failed to fetch Letterboxd data for {username}: {message}")]
    SourceFetch { username: String, message: String },

    /// A catalog (TMDb) call failed outside the per-film sync loop
    #[error("TMDb {operation} failed: {message}")]
    CatalogOperation {
        operation: &'static str,
        message: String,
    },

    #[error("No TMDb list available for {0}")]
    ListNotFound(String),

    /// Sync was requested while disabled or unconfigured
    #[error("{0}")]
    SyncUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Wraps an arbitrary source failure with the username it concerned
    pub fn source_fetch(username: &str, error: anyhow::Error) -> Self {
        AppError::SourceFetch {
            username: username.to_string(),
            message: format!("{error:#}"),
        }
    }

    pub fn catalog(operation: &'static str, error: anyhow::Error) -> Self {
        AppError::CatalogOperation {
            operation,
            message: format!("{error:#}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::SourceFetch { .. } => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::ListNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::CatalogOperation { .. } => (StatusCode::BAD_GATEWAY, self.to_string()),
            AppError::SyncUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
