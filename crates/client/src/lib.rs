//! Outbound catalog client for the ludex gateway.
//!
//! This crate provides the upstream catalog API client (with query policy,
//! rate limiting, and the tag-fallback strategy) and the relevance scorer
//! used to re-rank full-text search results.

pub mod catalog;
pub mod rank;

pub use catalog::{
    CatalogClient, CatalogConfig, CatalogError, CatalogItem, FetchMode, ListQuery, ListResponse,
};
pub use rank::{rank_by_relevance, relevance_score};
