//! Single-item route.
//!
//! Fetches one catalog item by numeric id and enriches it with the
//! first-party rating. This path is not cached.

use axum::{
    Json,
    extract::{Path, State},
};

use super::AppState;
use crate::enrich::{EnrichedItem, enrich_item};
use crate::error::ApiError;

/// Handler for `GET /catalog/items/:id`.
pub async fn item_handler(
    State(state): State<AppState>, Path(id): Path<i64>,
) -> Result<Json<EnrichedItem>, ApiError> {
    let item = state.client.get_game(id).await?;
    let enriched = enrich_item(&state.db, item).await;

    Ok(Json(enriched))
}
