//! Catalog API response types.
//!
//! Catalog items are owned upstream and treated mostly as opaque JSON: the
//! gateway deserializes the handful of fields it interprets (id, name, the
//! two score fields, the cover image) and passes everything else through
//! untouched via serde flatten.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single catalog item, keyed by its numeric upstream id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    pub rating: Option<f64>,
    pub metacritic: Option<i64>,
    pub background_image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A page of catalog items in the upstream list shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<CatalogItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ListResponse {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
