//! Full-text search route.
//!
//! Validates the query, then follows the cache discipline: fresh hit
//! serves the cached body; a miss fetches upstream, re-ranks by relevance,
//! enriches with first-party ratings, and writes through.

use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;

use super::{AppState, GAMES_PATH, lookup_cached, page_payload, respond, store_response};
use crate::enrich::enrich_items;
use crate::error::ApiError;
use ludex_client::{ListQuery, rank_by_relevance};
use ludex_core::canonical_key;

/// Input parameters for the search route.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// Handler for `GET /catalog/search`.
pub async fn search_handler(
    State(state): State<AppState>, Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::Validation("missing required parameter: query".to_string()))?
        .to_string();

    let list_query = ListQuery { search: Some(query.clone()), page_size: params.page_size, ..Default::default() };
    let key = canonical_key(GAMES_PATH, &list_query.effective());

    if let Some(cached) = lookup_cached(&state.db, &key, state.config.cache_ttl_seconds).await {
        tracing::debug!("cache hit for search: {}", query);
        return Ok(respond(cached, "hit", None));
    }

    let mut page = state.client.list_games(&list_query).await?;

    // the score reads upstream fields only; enrichment preserves order
    rank_by_relevance(&query, &mut page.results);
    let enriched = enrich_items(&state.db, std::mem::take(&mut page.results)).await;

    let payload = page_payload(&page, &enriched, None)?;
    store_response(&state.db, &key, &payload).await;

    Ok(respond(payload, "miss", None))
}
