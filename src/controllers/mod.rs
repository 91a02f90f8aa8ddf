pub mod bookings;
pub mod movies;

use crate::error::BookingError;
use axum::http::StatusCode;
use axum::{Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(movies::routes())
        .merge(bookings::routes())
}

/// Maps engine errors to the wire shape shared by every endpoint: business
/// rejections (seat taken, nothing to cancel) stay 200 with `success: false`,
/// bad input is 400, misses are 404, and only store faults surface as 500.
pub(crate) fn error_response(err: BookingError) -> (StatusCode, Json<serde_json::Value>) {
    let (status, message) = match &err {
        BookingError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        BookingError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        BookingError::SeatUnavailable => {
            (StatusCode::OK, "Seat already booked".to_string())
        }
        BookingError::NotBooked => (StatusCode::OK, "Seat is not booked".to_string()),
        BookingError::Store(e) => {
            tracing::error!("store error: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Storage unavailable".to_string(),
            )
        }
    };

    (
        status,
        Json(serde_json::json!({ "success": false, "message": message })),
    )
}
