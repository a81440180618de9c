//! HTTP surface of the gateway.
//!
//! Routes are stateless per request: everything cross-request lives in the
//! cache store and the ratings store. The shared helpers here implement
//! the cache discipline every list-shaped route follows: freshness is
//! judged against the configured TTL by the handler (not the store), a
//! failed cache read degrades to a miss, and a failed cache write is
//! logged without touching the already-computed response.

use std::sync::Arc;

use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use ludex_client::{CatalogClient, FetchMode, ListResponse};
use ludex_core::{AppConfig, CacheDb, CacheEntry};

use crate::enrich::EnrichedItem;
use crate::error::ApiError;

pub mod items;
pub mod list;
pub mod search;

/// Upstream logical resource path; cache keys are derived from it.
pub(crate) const GAMES_PATH: &str = "/games";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: CacheDb,
    pub client: CatalogClient,
    pub config: Arc<AppConfig>,
}

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /catalog/items/:id` - Single enriched item
/// - `GET /catalog/search` - Ranked, enriched full-text search
/// - `GET /catalog/list` - Filtered list with tag fallback
/// - `GET /health` - Liveness check
///
/// # Middleware
/// - CORS: static permissive policy; preflight OPTIONS succeeds on every
///   route
/// - Tracing: logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/catalog/items/:id", get(items::item_handler))
        .route("/catalog/search", get(search::search_handler))
        .route("/catalog/list", get(list::list_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Freshness is a pure function of entry age against the fixed TTL.
pub(crate) fn is_fresh(entry: &CacheEntry, ttl_seconds: i64) -> bool {
    entry.age_seconds(Utc::now()).is_some_and(|age| age < ttl_seconds)
}

/// Cache lookup that degrades to a miss on store failure, staleness, or a
/// corrupt payload.
pub(crate) async fn lookup_cached(db: &CacheDb, key: &str, ttl_seconds: i64) -> Option<Value> {
    match db.get_response(key).await {
        Ok(Some(entry)) if is_fresh(&entry, ttl_seconds) => match serde_json::from_str(&entry.payload) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("corrupt cache payload for {}: {}", key, e);
                None
            }
        },
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("cache read failed for {}, treating as miss: {}", key, e);
            None
        }
    }
}

/// Cache write that never fails the already-computed response.
pub(crate) async fn store_response(db: &CacheDb, key: &str, payload: &Value) {
    let entry = CacheEntry::new(key, payload.to_string());
    if let Err(e) = db.put_response(&entry).await {
        tracing::warn!("cache write failed for {}: {}", key, e);
    }
}

/// Assemble the served page body: upstream shape with enriched results
/// and, for list routes, the serving mode as a diagnostic field.
pub(crate) fn page_payload(
    page: &ListResponse, enriched: &[EnrichedItem], served_by: Option<FetchMode>,
) -> Result<Value, ApiError> {
    let mut body = serde_json::to_value(page).map_err(|e| ApiError::Internal(e.to_string()))?;
    body["results"] = serde_json::to_value(enriched).map_err(|e| ApiError::Internal(e.to_string()))?;
    if let Some(mode) = served_by {
        body["served_by"] = Value::String(mode.as_str().to_string());
    }
    Ok(body)
}

/// JSON response with the cache-status header and, for list routes, the
/// serving-mode header.
pub(crate) fn respond(payload: Value, cache_status: &'static str, source: Option<&str>) -> Response {
    let mut response = Json(payload).into_response();
    response
        .headers_mut()
        .insert("x-cache", HeaderValue::from_static(cache_status));
    if let Some(source) = source
        && let Ok(value) = HeaderValue::from_str(source)
    {
        response.headers_mut().insert("x-catalog-source", value);
    }
    response
}
