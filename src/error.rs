use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

/// Failures surfaced to HTTP clients.
///
/// Best-effort enrichment (scrobble counts, image downloads) never produces
/// one of these; it falls back to `0` or `None` instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No code provided")]
    MissingCode,

    #[error("{0}")]
    Configuration(String),

    #[error("Failed to get token")]
    TokenExchange { status: u16, details: Value },

    #[error("Authorization header with Bearer token is required")]
    AuthenticationRequired,

    #[error("Spotify rejected the request: {0}")]
    UpstreamAuth(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingCode | ApiError::TokenExchange { .. } => StatusCode::BAD_REQUEST,
            ApiError::Configuration(_)
            | ApiError::AuthenticationRequired
            | ApiError::UpstreamAuth(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short name of the error kind, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::MissingCode => "MissingCodeError",
            ApiError::Configuration(_) => "ConfigurationError",
            ApiError::TokenExchange { .. } => "TokenExchangeError",
            ApiError::AuthenticationRequired => "AuthenticationRequiredError",
            ApiError::UpstreamAuth(_) => "UpstreamAuthError",
            ApiError::Internal(_) => "InternalError",
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::TokenExchange { status, details } => json!({
                "error": self.to_string(),
                "status": status,
                "details": details,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (self.status(), Json(body)).into_response()
    }
}
