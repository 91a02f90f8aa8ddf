//! Read-only projections over the store: movie listing and seat maps. No
//! invariants of its own beyond what the store already guarantees.

use crate::database::Database;
use crate::error::BookingError;
use crate::models::Movie;
use crate::store;

#[derive(Clone)]
pub struct CatalogReader {
    db: Database,
}

impl CatalogReader {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list_movies(&self) -> Result<Vec<Movie>, BookingError> {
        Ok(store::movies(&self.db).await?)
    }

    pub async fn movie_details(&self, movie_id: i64) -> Result<Movie, BookingError> {
        store::movie(&self.db, movie_id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("movie {movie_id} not found")))
    }

    pub async fn seat_map(&self, movie_id: i64) -> Result<Vec<Vec<i64>>, BookingError> {
        store::seat_grid(&self.db, movie_id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("movie {movie_id} not found")))
    }
}
