//! Structured errors for the gateway's HTTP surface.
//!
//! Only two conditions are allowed to change a response status code:
//! input validation (400) and upstream catalog failure (502). Everything
//! else degrades inside the handlers and never reaches this type.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ludex_client::CatalogError;
use serde_json::json;

/// Errors surfaced to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Required input missing or malformed. No upstream call is attempted.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The catalog API returned a non-success status or failed to respond.
    #[error("upstream catalog error: {0}")]
    Upstream(String),

    /// Internal failure shaping the response.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidQuery(msg) => ApiError::Validation(msg),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}
