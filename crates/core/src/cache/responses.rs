//! Response cache operations.
//!
//! Stores the exact JSON body served for a cache key, together with the
//! write timestamp. The store itself is TTL-agnostic: it returns raw
//! age-bearing entries and the gateway decides freshness, so the TTL
//! policy can vary by route without changing storage.

use super::connection::CacheDb;
use crate::Error;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio_rusqlite::{params, rusqlite};

/// A cached gateway response.
///
/// `payload` is always the exact JSON body that was or would be returned to
/// the client for `key`; writes happen only after the full enriched payload
/// has been assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub payload: String,
    pub created_at: String,
}

impl CacheEntry {
    /// Create an entry stamped with the current time.
    pub fn new(key: impl Into<String>, payload: impl Into<String>) -> Self {
        Self { key: key.into(), payload: payload.into(), created_at: Utc::now().to_rfc3339() }
    }

    /// Age of the entry relative to `now`, in seconds.
    ///
    /// Returns None when the stored timestamp doesn't parse; callers treat
    /// that as stale.
    pub fn age_seconds(&self, now: DateTime<Utc>) -> Option<i64> {
        let created = DateTime::parse_from_rfc3339(&self.created_at).ok()?;
        Some((now - created.with_timezone(&Utc)).num_seconds())
    }
}

impl CacheDb {
    /// Get a cached response by key.
    ///
    /// Returns None if the key doesn't exist. Staleness is not checked
    /// here; the entry carries its write timestamp for the caller.
    pub async fn get_response(&self, key: &str) -> Result<Option<CacheEntry>, Error> {
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<Option<CacheEntry>, Error> {
                let mut stmt =
                    conn.prepare("SELECT cache_key, payload_json, created_at FROM response_cache WHERE cache_key = ?1")?;

                let result = stmt.query_row(params![key], |row| {
                    Ok(CacheEntry { key: row.get(0)?, payload: row.get(1)?, created_at: row.get(2)? })
                });

                match result {
                    Ok(entry) => Ok(Some(entry)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Insert or update a cached response.
    ///
    /// Uses UPSERT semantics: inserts if the key doesn't exist, replaces
    /// payload and created_at if it does. Concurrent writers for the same
    /// key resolve as last-write-wins.
    pub async fn put_response(&self, entry: &CacheEntry) -> Result<(), Error> {
        let entry = entry.clone();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO response_cache (cache_key, payload_json, created_at)
                    VALUES (?1, ?2, ?3)
                    ON CONFLICT(cache_key) DO UPDATE SET
                        payload_json = excluded.payload_json,
                        created_at = excluded.created_at",
                    params![entry.key, entry.payload, entry.created_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Delete cache rows older than the given TTL.
    ///
    /// Housekeeping only; the serve path never depends on rows being
    /// deleted. Returns the number of deleted entries.
    pub async fn purge_stale_responses(&self, ttl_seconds: i64) -> Result<u64, Error> {
        let cutoff = (Utc::now() - Duration::seconds(ttl_seconds)).to_rfc3339();
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM response_cache WHERE created_at < ?1", params![cutoff])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_and_get_response() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let entry = CacheEntry::new("/games?page_size=20", r#"{"count":0,"results":[]}"#);

        db.put_response(&entry).await.unwrap();

        let retrieved = db.get_response(&entry.key).await.unwrap().unwrap();
        assert_eq!(retrieved.payload, entry.payload);
        assert_eq!(retrieved.created_at, entry.created_at);
    }

    #[tokio::test]
    async fn test_get_missing_response() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let result = db.get_response("/games?page_size=1").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_upsert_replaces_payload() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let key = "/games?search=doom";

        db.put_response(&CacheEntry::new(key, r#"{"old":1}"#)).await.unwrap();
        db.put_response(&CacheEntry::new(key, r#"{"new":2}"#)).await.unwrap();

        let retrieved = db.get_response(key).await.unwrap().unwrap();
        assert_eq!(retrieved.payload, r#"{"new":2}"#);

        let rows: i64 = db
            .conn
            .call(|conn| conn.query_row("SELECT COUNT(*) FROM response_cache", [], |row| row.get(0)))
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_put_preserves_given_timestamp() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let backdated = (Utc::now() - Duration::hours(25)).to_rfc3339();
        let entry = CacheEntry {
            key: "/games?tags=coop".to_string(),
            payload: "{}".to_string(),
            created_at: backdated.clone(),
        };

        db.put_response(&entry).await.unwrap();

        let retrieved = db.get_response(&entry.key).await.unwrap().unwrap();
        assert_eq!(retrieved.created_at, backdated);
        assert!(retrieved.age_seconds(Utc::now()).unwrap() >= 25 * 3600);
    }

    #[tokio::test]
    async fn test_purge_stale_responses() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let stale = CacheEntry {
            key: "stale".to_string(),
            payload: "{}".to_string(),
            created_at: (Utc::now() - Duration::hours(48)).to_rfc3339(),
        };
        db.put_response(&stale).await.unwrap();
        db.put_response(&CacheEntry::new("fresh", "{}")).await.unwrap();

        let deleted = db.purge_stale_responses(24 * 3600).await.unwrap();
        assert_eq!(deleted, 1);
        assert!(db.get_response("stale").await.unwrap().is_none());
        assert!(db.get_response("fresh").await.unwrap().is_some());
    }

    #[test]
    fn test_age_seconds_unparseable() {
        let entry = CacheEntry {
            key: "k".to_string(),
            payload: "{}".to_string(),
            created_at: "not-a-timestamp".to_string(),
        };
        assert!(entry.age_seconds(Utc::now()).is_none());
    }
}
