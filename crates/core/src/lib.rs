//! Core types and shared functionality for the ludex catalog gateway.
//!
//! This crate provides:
//! - Response cache and ratings store with SQLite backend
//! - Canonical cache key generation
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheDb, CacheEntry, RatingRecord, canonical_key};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
