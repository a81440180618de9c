//! First-party rating lookups.
//!
//! One row per catalog item that has aggregate ratings. This is the sparse
//! right-hand side of a left join against catalog results: absence of a row
//! means a null rating on the enriched item, never an error.

use std::collections::HashMap;

use super::connection::CacheDb;
use crate::Error;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::{params, rusqlite};

/// Aggregate rating for a single catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRecord {
    pub game_id: String,
    pub average_rating: f64,
}

impl CacheDb {
    /// Point lookup for a single catalog item's aggregate rating.
    pub async fn get_rating(&self, game_id: &str) -> Result<Option<f64>, Error> {
        let game_id = game_id.to_string();
        self.conn
            .call(move |conn| -> Result<Option<f64>, Error> {
                let result = conn.query_row(
                    "SELECT average_rating FROM ratings WHERE game_id = ?1",
                    params![game_id],
                    |row| row.get(0),
                );

                match result {
                    Ok(rating) => Ok(Some(rating)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Batched lookup for a full result page in one round trip.
    ///
    /// Returns a map keyed by game_id; absent ids simply have no entry.
    /// An empty id set short-circuits without touching the store.
    pub async fn get_ratings(&self, game_ids: &[String]) -> Result<HashMap<String, f64>, Error> {
        if game_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids = game_ids.to_vec();
        self.conn
            .call(move |conn| -> Result<HashMap<String, f64>, Error> {
                let placeholders = vec!["?"; ids.len()].join(", ");
                let sql = format!("SELECT game_id, average_rating FROM ratings WHERE game_id IN ({placeholders})");
                let mut stmt = conn.prepare(&sql)?;

                let rows = stmt.query_map(rusqlite::params_from_iter(ids.iter()), |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
                })?;

                let mut map = HashMap::new();
                for row in rows {
                    let (id, rating) = row?;
                    map.insert(id, rating);
                }
                Ok(map)
            })
            .await
            .map_err(Error::from)
    }

    /// Insert or update a rating row.
    pub async fn put_rating(&self, record: &RatingRecord) -> Result<(), Error> {
        let record = record.clone();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO ratings (game_id, average_rating)
                    VALUES (?1, ?2)
                    ON CONFLICT(game_id) DO UPDATE SET
                        average_rating = excluded.average_rating",
                    params![record.game_id, record.average_rating],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }
}
