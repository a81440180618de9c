//! Rating enrichment.
//!
//! Left-joins catalog items against the first-party ratings store by
//! numeric catalog id. Every output item carries a `user_rating` field,
//! explicitly null when no first-party rating exists. A failed lookup
//! degrades to all-null ratings; it never fails the request.

use ludex_client::CatalogItem;
use ludex_core::CacheDb;
use serde::Serialize;
use std::collections::HashMap;

/// A catalog item with the first-party rating attached.
///
/// `user_rating` is always serialized, as null when absent.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedItem {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub user_rating: Option<f64>,
}

/// Enrich a result page with one batched rating lookup.
///
/// An empty page skips the store entirely.
pub async fn enrich_items(db: &CacheDb, items: Vec<CatalogItem>) -> Vec<EnrichedItem> {
    if items.is_empty() {
        return Vec::new();
    }

    let ids: Vec<String> = items.iter().map(|item| item.id.to_string()).collect();
    let ratings = match db.get_ratings(&ids).await {
        Ok(map) => map,
        Err(e) => {
            tracing::warn!("rating lookup failed, serving null ratings: {}", e);
            HashMap::new()
        }
    };

    items
        .into_iter()
        .map(|item| {
            let user_rating = ratings.get(&item.id.to_string()).copied();
            EnrichedItem { item, user_rating }
        })
        .collect()
}

/// Enrich a single item with a point lookup.
pub async fn enrich_item(db: &CacheDb, item: CatalogItem) -> EnrichedItem {
    let user_rating = match db.get_rating(&item.id.to_string()).await {
        Ok(rating) => rating,
        Err(e) => {
            tracing::warn!("rating lookup failed for {}, serving null rating: {}", item.id, e);
            None
        }
    };

    EnrichedItem { item, user_rating }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ludex_core::RatingRecord;

    fn item(id: i64, name: &str) -> CatalogItem {
        CatalogItem {
            id,
            name: name.to_string(),
            rating: None,
            metacritic: None,
            background_image: None,
            extra: serde_json::Map::new(),
        }
    }

    async fn seed(db: &CacheDb, game_id: &str, rating: f64) {
        db.put_rating(&RatingRecord { game_id: game_id.to_string(), average_rating: rating })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_enrichment_completeness() {
        let db = CacheDb::open_in_memory().await.unwrap();
        seed(&db, "1", 4.0).await;
        seed(&db, "3", 2.5).await;

        let items = vec![item(1, "One"), item(2, "Two"), item(3, "Three")];
        let enriched = enrich_items(&db, items).await;

        assert_eq!(enriched.len(), 3);
        assert_eq!(enriched[0].user_rating, Some(4.0));
        assert_eq!(enriched[1].user_rating, None);
        assert_eq!(enriched[2].user_rating, Some(2.5));
    }

    #[tokio::test]
    async fn test_enrichment_no_ratings_at_all() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let enriched = enrich_items(&db, vec![item(7, "Seven")]).await;

        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].user_rating, None);
    }

    #[tokio::test]
    async fn test_enrichment_empty_page_is_noop() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let enriched = enrich_items(&db, Vec::new()).await;
        assert!(enriched.is_empty());
    }

    #[tokio::test]
    async fn test_enrich_single_item() {
        let db = CacheDb::open_in_memory().await.unwrap();
        seed(&db, "42", 3.7).await;

        let enriched = enrich_item(&db, item(42, "Answer")).await;
        assert_eq!(enriched.user_rating, Some(3.7));

        let enriched = enrich_item(&db, item(43, "Question")).await;
        assert_eq!(enriched.user_rating, None);
    }

    #[test]
    fn test_null_rating_serialized_explicitly() {
        let enriched = EnrichedItem { item: item(1, "One"), user_rating: None };
        let value = serde_json::to_value(&enriched).unwrap();
        assert!(value.get("user_rating").is_some());
        assert!(value["user_rating"].is_null());
    }
}
