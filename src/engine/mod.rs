//! Reservation engine: the only component that mutates seat status. Both
//! transports share one engine instance, so the mutual-exclusion invariant
//! lives here and in the store's transaction discipline, never in an adapter.

pub mod validate;

use crate::database::Database;
use crate::error::BookingError;
use crate::models::seat::{AVAILABLE, BOOKED};
use crate::models::{Booking, Customer};
use crate::store;
use tracing::{debug, info};

#[derive(Clone)]
pub struct ReservationEngine {
    db: Database,
}

impl ReservationEngine {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Books a seat for one customer. Exactly one of any number of concurrent
    /// callers targeting the same seat succeeds; the rest get
    /// `SeatUnavailable`.
    ///
    /// The status flip and the booking row are written in one transaction
    /// whose first statement is a conditional update, so the check-then-set
    /// is atomic: a racing transaction either serializes behind the write
    /// lock and then sees BOOKED, or commits first and wins.
    pub async fn book_seat(
        &self,
        movie_id: i64,
        row: i64,
        col: i64,
        customer: &Customer,
    ) -> Result<i64, BookingError> {
        validate::movie_id(movie_id)?;
        validate::seat_position(row, col)?;
        validate::customer(customer)?;

        let mut tx = self.db.pool.begin().await?;

        let claimed = sqlx::query(
            "UPDATE seats SET status = ?1
             WHERE movie_id = ?2 AND row = ?3 AND col = ?4 AND status = ?5",
        )
        .bind(BOOKED)
        .bind(movie_id)
        .bind(row)
        .bind(col)
        .bind(AVAILABLE)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if claimed == 0 {
            // Nothing was written; distinguish an unknown seat from a lost
            // race before the transaction rolls back on drop.
            let exists: bool = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM seats WHERE movie_id = ?1 AND row = ?2 AND col = ?3)",
            )
            .bind(movie_id)
            .bind(row)
            .bind(col)
            .fetch_one(&mut *tx)
            .await?;

            return Err(if exists {
                debug!("book_seat: seat ({row}, {col}) of movie {movie_id} already booked");
                BookingError::SeatUnavailable
            } else {
                BookingError::NotFound(format!("movie {movie_id} not found"))
            });
        }

        let booking_id: i64 = sqlx::query_scalar(
            "INSERT INTO bookings (movie_id, row, col, customer_name, customer_email, customer_phone)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id",
        )
        .bind(movie_id)
        .bind(row)
        .bind(col)
        .bind(customer.name.trim())
        .bind(customer.email.trim())
        .bind(customer.phone.trim())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        info!("Booked seat ({row}, {col}) of movie {movie_id}, booking {booking_id}");
        Ok(booking_id)
    }

    /// Frees a booked seat and removes its booking row in one transaction.
    /// Cancelling an AVAILABLE seat fails with `NotBooked`.
    pub async fn cancel_booking(
        &self,
        movie_id: i64,
        row: i64,
        col: i64,
    ) -> Result<(), BookingError> {
        validate::movie_id(movie_id)?;
        validate::seat_position(row, col)?;

        let mut tx = self.db.pool.begin().await?;

        let freed = sqlx::query(
            "UPDATE seats SET status = ?1
             WHERE movie_id = ?2 AND row = ?3 AND col = ?4 AND status = ?5",
        )
        .bind(AVAILABLE)
        .bind(movie_id)
        .bind(row)
        .bind(col)
        .bind(BOOKED)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if freed == 0 {
            let exists: bool = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM seats WHERE movie_id = ?1 AND row = ?2 AND col = ?3)",
            )
            .bind(movie_id)
            .bind(row)
            .bind(col)
            .fetch_one(&mut *tx)
            .await?;

            return Err(if exists {
                BookingError::NotBooked
            } else {
                BookingError::NotFound(format!("movie {movie_id} not found"))
            });
        }

        sqlx::query("DELETE FROM bookings WHERE movie_id = ?1 AND row = ?2 AND col = ?3")
            .bind(movie_id)
            .bind(row)
            .bind(col)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!("Cancelled booking for seat ({row}, {col}) of movie {movie_id}");
        Ok(())
    }

    /// Administrative reset: every seat back to AVAILABLE, all booking rows
    /// discarded, atomically.
    pub async fn reset_all(&self) -> Result<(), BookingError> {
        let mut tx = self.db.pool.begin().await?;

        sqlx::query("DELETE FROM bookings").execute(&mut *tx).await?;
        let reset = sqlx::query("UPDATE seats SET status = ?1")
            .bind(AVAILABLE)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        info!("Reset {reset} seats to available");
        Ok(())
    }

    /// Booking lookup for the transports. A miss covers both an unknown seat
    /// and a seat that was never booked.
    pub async fn booking_details(
        &self,
        movie_id: i64,
        row: i64,
        col: i64,
    ) -> Result<Booking, BookingError> {
        validate::movie_id(movie_id)?;
        validate::seat_position(row, col)?;

        store::booking_details(&self.db, movie_id, row, col)
            .await?
            .ok_or_else(|| {
                BookingError::NotFound(format!(
                    "no booking for seat ({row}, {col}) of movie {movie_id}"
                ))
            })
    }
}
