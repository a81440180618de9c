//! Canonical cache key generation.
//!
//! A cache key is the logical resource path plus its query parameters in a
//! deterministic order, so any two semantically equivalent requests map to
//! the same cache row regardless of how the caller ordered its parameters.

/// Build the canonical cache key for a resource path and its parameters.
///
/// Parameters are sorted by key (byte-lexicographic) and joined as
/// `key=value` pairs with `&`. An empty parameter set yields the bare path.
pub fn canonical_key(path: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }

    let mut entries: Vec<&(String, String)> = params.iter().collect();
    entries.sort();

    let query = entries
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!("{path}?{query}")
}
