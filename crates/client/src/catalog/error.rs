//! Catalog API client error types.

use std::sync::Arc;

/// Errors from the upstream catalog API client.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Missing RAWG API key.
    #[error("missing API key: LUDEX_RAWG_API_KEY not set")]
    MissingApiKey,

    /// Invalid query parameters.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Upstream returned a non-success status. The body is truncated so
    /// operators can diagnose without the raw upstream payload leaking
    /// to clients.
    #[error("upstream HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Request timeout.
    #[error("upstream request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { CatalogError::Timeout } else { CatalogError::Network(Arc::new(err)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::MissingApiKey;
        assert!(err.to_string().contains("API key"));

        let err = CatalogError::Http { status: 503, body: "service unavailable".to_string() };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("service unavailable"));
    }
}
