//! Catalog list query parameters and the policies applied before a call.
//!
//! Two opinionated policies sit between inbound filters and the upstream
//! request: a default ordering override (the upstream default ordering is
//! low-signal for this product, critic score is substituted), and a page
//! size clamp that bounds cache payload size and upstream load. Both are
//! applied by [`ListQuery::effective`], so the cache key and the outbound
//! request always agree.

use std::collections::BTreeMap;

/// Ordering substituted when the caller requests none, or a low-signal one.
pub const DEFAULT_ORDERING: &str = "-metacritic";

/// Upstream orderings considered low-signal enough to override.
const LOW_SIGNAL_ORDERINGS: &[&str] = &["added", "-added"];

/// Hard upper bound on upstream page size.
pub const MAX_PAGE_SIZE: u32 = 40;

/// Page size used when the caller doesn't request one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// The one tag whose upstream taxonomy is known to be incomplete.
pub const UNRELIABLE_TAG: &str = "battle-royale";

const FALLBACK_SEARCH: &str = "battle royale";
const FALLBACK_GENRES: &str = "shooter,action";

/// Filter/sort parameters for a catalog list or search call.
///
/// `extra` carries passthrough filters (platforms, dates, page, ...) that
/// the gateway forwards without interpreting; a BTreeMap keeps their
/// iteration order deterministic.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub search: Option<String>,
    pub genres: Option<String>,
    pub tags: Option<String>,
    pub ordering: Option<String>,
    pub page_size: Option<u32>,
    pub extra: BTreeMap<String, String>,
}

impl ListQuery {
    /// The parameters actually sent upstream, after policy.
    ///
    /// Ordering and page_size are always present in the output so that
    /// equivalent requests normalize to the same parameter set.
    pub fn effective(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = Vec::new();

        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }
        if let Some(genres) = &self.genres {
            params.push(("genres".to_string(), genres.clone()));
        }
        if let Some(tags) = &self.tags {
            params.push(("tags".to_string(), tags.clone()));
        }

        params.push(("ordering".to_string(), self.effective_ordering()));
        params.push(("page_size".to_string(), self.effective_page_size().to_string()));

        for (k, v) in &self.extra {
            params.push((k.clone(), v.clone()));
        }

        params
    }

    /// Requested ordering, or the critic-score default when the request
    /// carries none or a known low-signal one.
    pub fn effective_ordering(&self) -> String {
        match self.ordering.as_deref().map(str::trim) {
            Some(o) if !o.is_empty() && !LOW_SIGNAL_ORDERINGS.contains(&o) => o.to_string(),
            _ => DEFAULT_ORDERING.to_string(),
        }
    }

    /// Requested page size clamped to [`MAX_PAGE_SIZE`].
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE)
    }

    /// The broader alternate query used when the unreliable tag filter
    /// comes back empty.
    ///
    /// Returns None unless the query filters on [`UNRELIABLE_TAG`]. The
    /// variant drops the tag filter and substitutes a free-text search
    /// term plus two broader genre filters.
    pub fn fallback_variant(&self) -> Option<ListQuery> {
        let tags = self.tags.as_deref()?;
        if !tags.split(',').any(|t| t.trim() == UNRELIABLE_TAG) {
            return None;
        }

        let mut alt = self.clone();
        alt.tags = None;
        alt.search = Some(FALLBACK_SEARCH.to_string());
        alt.genres = Some(FALLBACK_GENRES.to_string());
        Some(alt)
    }
}
