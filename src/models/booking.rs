use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A committed booking, as read back from the store. `movie_title` comes from
/// the join against the catalog so clients can render a receipt in one call.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub movie_id: i64,
    pub movie_title: String,
    pub row: i64,
    pub col: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub booking_time: NaiveDateTime,
}

/// Customer details supplied with a booking request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
}
