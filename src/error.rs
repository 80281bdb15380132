use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The recipe provider refused the call because the API quota is used up
    #[error("Recipe provider quota exceeded")]
    ProviderQuotaExceeded,

    /// The request never produced a response (connect failure, timeout)
    #[error("Recipe provider unreachable: {0}")]
    ProviderNetwork(String),

    /// The provider answered with a non-success status
    #[error("Recipe provider returned status {status}: {body}")]
    ProviderResponse { status: u16, body: String },

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Maps a `reqwest` send/read failure to a network error
    pub fn network(err: reqwest::Error) -> Self {
        AppError::ProviderNetwork(err.to_string())
    }

    /// True for the failures that come from talking to the recipe provider
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            AppError::ProviderQuotaExceeded
                | AppError::ProviderNetwork(_)
                | AppError::ProviderResponse { .. }
                | AppError::ExternalApi(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Database(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::ProviderQuotaExceeded => (StatusCode::TOO_MANY_REQUESTS, self.to_string()),
            AppError::ProviderResponse { status: 404, .. } => {
                (StatusCode::NOT_FOUND, "Nothing found at the recipe provider".to_string())
            }
            AppError::ProviderNetwork(_) | AppError::ProviderResponse { .. } => {
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            AppError::ExternalApi(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
