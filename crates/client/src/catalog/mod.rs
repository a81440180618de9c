//! RAWG catalog API client.
//!
//! Provides a client for the third-party game catalog API with rate
//! limiting, opinionated query policy, and a tag-fallback strategy.
//!
//! ### Specification
//!
//! - **Endpoint**: `https://api.rawg.io/api/games`
//! - **Authentication**: API key passed as the `key` query parameter.
//! - **Rate Limiting**: fixed minimum interval between consecutive calls;
//!   no automatic retries (the tag fallback is a deliberate alternate
//!   query, not a retry).
//! - **Policy**: default ordering override and page-size clamp, applied by
//!   [`ListQuery::effective`] before any call.

pub mod error;
pub mod request;
pub mod response;

pub use error::CatalogError;
pub use request::{DEFAULT_ORDERING, ListQuery, MAX_PAGE_SIZE, UNRELIABLE_TAG};
pub use response::{CatalogItem, ListResponse};

use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Default base URL for the RAWG API.
const DEFAULT_BASE_URL: &str = "https://api.rawg.io/api";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "ludex/0.1";

/// Default minimum interval between upstream requests.
const DEFAULT_MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(250);

/// Upstream error bodies are truncated to this many bytes in diagnostics.
const MAX_ERROR_BODY: usize = 256;

/// Which query produced a list result.
///
/// Diagnostic metadata only; clients must never branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Primary,
    TagFallback,
}

impl FetchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchMode::Primary => "primary",
            FetchMode::TagFallback => "tag-fallback",
        }
    }
}

/// Catalog API client configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// RAWG API key.
    pub api_key: String,
    /// Base URL (default: https://api.rawg.io/api).
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string (default: ludex/0.x).
    pub user_agent: String,
    /// Minimum interval between consecutive upstream calls.
    pub min_request_interval: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            min_request_interval: DEFAULT_MIN_REQUEST_INTERVAL,
        }
    }
}

/// Rate limiter to enforce request intervals.
#[derive(Debug)]
struct RateLimiter {
    last_request: Mutex<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(Instant::now().checked_sub(min_interval).unwrap_or_else(Instant::now)),
            min_interval,
        }
    }

    /// Acquire permission to make a request, waiting if necessary.
    async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < self.min_interval {
            tokio::time::sleep(self.min_interval - elapsed).await;
        }
        *last = Instant::now();
    }
}

/// RAWG catalog API client.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: CatalogConfig,
    rate_limiter: Arc<RateLimiter>,
}

impl CatalogClient {
    /// Create a new catalog client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        if config.api_key.is_empty() {
            return Err(CatalogError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| CatalogError::Network(Arc::new(e)))?;

        let rate_limiter = Arc::new(RateLimiter::new(config.min_request_interval));

        Ok(Self { http, config, rate_limiter })
    }

    /// Fetch a single catalog item by its numeric id.
    pub async fn get_game(&self, id: i64) -> Result<CatalogItem, CatalogError> {
        if id <= 0 {
            return Err(CatalogError::InvalidQuery(format!("invalid game id: {id}")));
        }

        let url = format!("{}/games/{}", self.config.base_url, id);
        let bytes = self.execute(&url, &[]).await?;

        serde_json::from_slice(&bytes).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Fetch a filtered/sorted page of catalog items.
    ///
    /// The ordering override and page-size clamp are applied before the
    /// call; see [`ListQuery::effective`].
    pub async fn list_games(&self, query: &ListQuery) -> Result<ListResponse, CatalogError> {
        let url = format!("{}/games", self.config.base_url);
        let params = query.effective();
        let bytes = self.execute(&url, &params).await?;

        serde_json::from_slice(&bytes).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Fetch a list, retrying once with a broader query when the
    /// unreliable tag filter yields nothing.
    ///
    /// A non-empty fallback result silently replaces the primary; an empty
    /// or failed fallback leaves the original (empty) result in place. The
    /// returned [`FetchMode`] reports which query served the request.
    pub async fn list_games_with_fallback(&self, query: &ListQuery) -> Result<(ListResponse, FetchMode), CatalogError> {
        let primary = self.list_games(query).await?;

        if primary.is_empty()
            && let Some(alt) = query.fallback_variant()
        {
            tracing::debug!("empty result for tag query, trying broader fallback");
            match self.list_games(&alt).await {
                Ok(fallback) if !fallback.is_empty() => return Ok((fallback, FetchMode::TagFallback)),
                Ok(_) => tracing::debug!("fallback query also empty"),
                Err(e) => tracing::warn!("fallback query failed, keeping primary result: {}", e),
            }
        }

        Ok((primary, FetchMode::Primary))
    }

    /// Perform one rate-limited GET, returning the raw body bytes.
    async fn execute(&self, url: &str, params: &[(String, String)]) -> Result<Vec<u8>, CatalogError> {
        self.rate_limiter.acquire().await;

        let start = Instant::now();

        let http_response = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .query(params)
            .query(&[("key", &self.config.api_key)])
            .send()
            .await
            .map_err(CatalogError::from)?;

        let status = http_response.status();
        tracing::debug!("catalog API {} -> {} in {:?}", url, status, start.elapsed());

        if status.is_client_error() || status.is_server_error() {
            let body = http_response.text().await.unwrap_or_default();
            return Err(CatalogError::Http { status: status.as_u16(), body: truncate(&body, MAX_ERROR_BODY) });
        }

        let bytes = http_response.bytes().await.map_err(CatalogError::from)?;
        Ok(bytes.to_vec())
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        s[..end].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new_missing_key() {
        let config = CatalogConfig::default();
        let result = CatalogClient::new(config);
        assert!(matches!(result, Err(CatalogError::MissingApiKey)));
    }

    #[test]
    fn test_client_new_with_key() {
        let config = CatalogConfig { api_key: "test-key".to_string(), ..Default::default() };
        assert!(CatalogClient::new(config).is_ok());
    }

    #[tokio::test]
    async fn test_get_game_rejects_nonpositive_id() {
        let config = CatalogConfig { api_key: "test-key".to_string(), ..Default::default() };
        let client = CatalogClient::new(config).unwrap();

        let result = client.get_game(0).await;
        assert!(matches!(result, Err(CatalogError::InvalidQuery(_))));

        let result = client.get_game(-5).await;
        assert!(matches!(result, Err(CatalogError::InvalidQuery(_))));
    }

    #[test]
    fn test_fetch_mode_labels() {
        assert_eq!(FetchMode::Primary.as_str(), "primary");
        assert_eq!(FetchMode::TagFallback.as_str(), "tag-fallback");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 256), "short");
        let long = "x".repeat(300);
        assert_eq!(truncate(&long, 256).len(), 256);
        // never split a multi-byte char
        let accented = "é".repeat(200);
        let cut = truncate(&accented, 256);
        assert!(cut.len() <= 256);
        assert!(accented.starts_with(&cut));
    }

    #[tokio::test]
    async fn test_rate_limiter_spaces_requests() {
        let limiter = RateLimiter::new(Duration::from_millis(50));
        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
