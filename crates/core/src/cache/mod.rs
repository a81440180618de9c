//! SQLite-backed persistence for the catalog gateway.
//!
//! This module provides the two external stores the gateway depends on,
//! behind one async connection:
//!
//! - Response cache: key -> exact served JSON body, with write timestamps
//! - Ratings: first-party aggregate ratings, point and batched lookups
//!
//! The cache is upsert-by-key, age-judged (never explicitly invalidated on
//! the serve path), and runs in WAL mode for concurrent access.

pub mod connection;
pub mod key;
pub mod migrations;
pub mod ratings;
pub mod responses;

pub use crate::Error;

pub use connection::CacheDb;
pub use key::canonical_key;
pub use ratings::RatingRecord;
pub use responses::CacheEntry;
