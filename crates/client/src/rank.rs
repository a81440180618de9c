//! Relevance ranking for full-text search results.
//!
//! The upstream API's own search ordering is not reliable for this
//! product, so search pages are re-ranked with a composite heuristic:
//! a base score from how the item name matches the query, plus small
//! popularity and critic-score boosts as tie-breakers. Scores are
//! internal; they order the page and are then discarded.

use crate::catalog::CatalogItem;

const EXACT_MATCH: f64 = 1000.0;
const PREFIX_MATCH: f64 = 500.0;
const SUBSTRING_MATCH: f64 = 100.0;
const PER_WORD_MATCH: f64 = 10.0;

/// Composite relevance score for one candidate.
///
/// Case-insensitive, query trimmed. Absent rating/metacritic count as 0.
pub fn relevance_score(query: &str, item: &CatalogItem) -> f64 {
    let query = query.trim().to_lowercase();
    let name = item.name.to_lowercase();

    let base = if name == query {
        EXACT_MATCH
    } else if name.starts_with(&query) {
        PREFIX_MATCH
    } else if name.contains(&query) {
        SUBSTRING_MATCH
    } else {
        let matched = query.split_whitespace().filter(|word| name.contains(word)).count();
        matched as f64 * PER_WORD_MATCH
    };

    base + 2.0 * item.rating.unwrap_or(0.0) + item.metacritic.unwrap_or(0) as f64 / 10.0
}

/// Sort items descending by relevance to `query`.
///
/// The sort is stable: ties on equal scores preserve upstream order.
pub fn rank_by_relevance(query: &str, items: &mut [CatalogItem]) {
    items.sort_by(|a, b| {
        relevance_score(query, b)
            .partial_cmp(&relevance_score(query, a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str, rating: Option<f64>, metacritic: Option<i64>) -> CatalogItem {
        CatalogItem {
            id,
            name: name.to_string(),
            rating,
            metacritic,
            background_image: None,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_score_tiers() {
        let query = "doom";
        assert!(relevance_score(query, &item(1, "Doom", None, None)) >= 1000.0);

        let prefix = relevance_score(query, &item(2, "Doom Eternal", None, None));
        assert!((500.0..1000.0).contains(&prefix));

        let substring = relevance_score(query, &item(3, "Gloom", None, None));
        assert!((100.0..500.0).contains(&substring));
    }

    #[test]
    fn test_word_match_score() {
        let score = relevance_score("ancient war", &item(1, "War of the Ancient Kingdoms", None, None));
        // "war" matches, "ancient" matches
        assert_eq!(score, 20.0);

        let score = relevance_score("ancient war", &item(2, "Peaceful Farming", None, None));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_boosts() {
        let score = relevance_score("doom", &item(1, "Doom", Some(4.5), Some(85)));
        assert_eq!(score, 1000.0 + 9.0 + 8.5);
    }

    #[test]
    fn test_ranking_deterministic_regardless_of_input_order() {
        let query = "doom";
        let exact = item(1, "Doom", None, None);
        let prefix = item(2, "Doom Eternal", None, None);
        let substring = item(3, "Gloom", None, None);

        let mut forward = vec![exact.clone(), prefix.clone(), substring.clone()];
        let mut backward = vec![substring, prefix, exact];

        rank_by_relevance(query, &mut forward);
        rank_by_relevance(query, &mut backward);

        let names: Vec<&str> = forward.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Doom", "Doom Eternal", "Gloom"]);
        let names: Vec<&str> = backward.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Doom", "Doom Eternal", "Gloom"]);
    }

    #[test]
    fn test_ties_preserve_upstream_order() {
        let mut items = vec![
            item(1, "Shadow Keep", None, None),
            item(2, "Shadow Gate", None, None),
            item(3, "Shadow Fall", None, None),
        ];
        // all three score identically for an unrelated query
        rank_by_relevance("doom", &mut items);
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn test_case_insensitive_and_trimmed() {
        let score_upper = relevance_score("  DOOM  ", &item(1, "doom", None, None));
        assert!(score_upper >= 1000.0);
    }

    #[test]
    fn test_rating_breaks_equal_base_scores() {
        let mut items = vec![
            item(1, "Doom Eternal", Some(1.0), None),
            item(2, "Doom 3", Some(4.9), None),
        ];
        rank_by_relevance("doom", &mut items);
        assert_eq!(items[0].id, 2);
    }
}
