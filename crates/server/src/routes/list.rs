//! Filtered list route.
//!
//! Same cache discipline as search, with two differences: arbitrary
//! filters pass through to the upstream query, and the fetch uses the
//! tag-fallback strategy. The serving mode travels inside the cached body
//! (`served_by`) so hits can still report it in the response header.

use std::collections::{BTreeMap, HashMap};

use axum::{
    extract::{Query, State},
    response::Response,
};

use super::{AppState, GAMES_PATH, lookup_cached, page_payload, respond, store_response};
use crate::enrich::enrich_items;
use crate::error::ApiError;
use ludex_client::ListQuery;
use ludex_core::canonical_key;

/// Parameters the gateway interprets itself; everything else passes
/// through. `key` never passes through.
const RESERVED: &[&str] = &["search", "genres", "tags", "ordering", "page_size", "key"];

/// Handler for `GET /catalog/list`.
pub async fn list_handler(
    State(state): State<AppState>, Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let list_query = parse_list_query(&params)?;
    let key = canonical_key(GAMES_PATH, &list_query.effective());

    if let Some(cached) = lookup_cached(&state.db, &key, state.config.cache_ttl_seconds).await {
        let source = cached
            .get("served_by")
            .and_then(|v| v.as_str())
            .unwrap_or("primary")
            .to_string();
        tracing::debug!("cache hit for list: {}", key);
        return Ok(respond(cached, "hit", Some(source.as_str())));
    }

    let (mut page, mode) = state.client.list_games_with_fallback(&list_query).await?;
    let enriched = enrich_items(&state.db, std::mem::take(&mut page.results)).await;

    let payload = page_payload(&page, &enriched, Some(mode))?;
    store_response(&state.db, &key, &payload).await;

    Ok(respond(payload, "miss", Some(mode.as_str())))
}

fn parse_list_query(params: &HashMap<String, String>) -> Result<ListQuery, ApiError> {
    let page_size = match params.get("page_size") {
        Some(raw) => Some(
            raw.parse::<u32>()
                .map_err(|_| ApiError::Validation(format!("invalid page_size: {raw}")))?,
        ),
        None => None,
    };

    let extra: BTreeMap<String, String> = params
        .iter()
        .filter(|(k, _)| !RESERVED.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Ok(ListQuery {
        search: params.get("search").cloned(),
        genres: params.get("genres").cloned(),
        tags: params.get("tags").cloned(),
        ordering: params.get("ordering").cloned(),
        page_size,
        extra,
    })
}
