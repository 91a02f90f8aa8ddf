use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use super::error_response;
use crate::models::Customer;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/book", post(book_seat))
        .route("/booking/{movie_id}/{row}/{col}", get(booking_details))
        .route("/cancel", post(cancel_booking))
        .route("/reset", post(reset_all))
}

// POST /api/book
#[derive(Debug, Deserialize)]
struct BookRequest {
    movie_id: i64,
    row: i64,
    col: i64,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
}

async fn book_seat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let customer = Customer {
        name: req.customer_name,
        email: req.customer_email,
        phone: req.customer_phone,
    };

    let booking_id = state
        .engine
        .book_seat(req.movie_id, req.row, req.col, &customer)
        .await
        .map_err(error_response)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": format!("Seat booked successfully for {}!", customer.name.trim()),
        "booking_id": booking_id,
    })))
}

// GET /api/booking/{movie_id}/{row}/{col}
async fn booking_details(
    State(state): State<Arc<AppState>>,
    Path((movie_id, row, col)): Path<(i64, i64, i64)>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let booking = state
        .engine
        .booking_details(movie_id, row, col)
        .await
        .map_err(error_response)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "booking": booking,
    })))
}

// POST /api/cancel
#[derive(Debug, Deserialize)]
struct CancelRequest {
    movie_id: i64,
    row: i64,
    col: i64,
}

async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CancelRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    state
        .engine
        .cancel_booking(req.movie_id, req.row, req.col)
        .await
        .map_err(error_response)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Booking cancelled successfully!",
    })))
}

// POST /api/reset
async fn reset_all(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    state.engine.reset_all().await.map_err(error_response)?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "All seats have been reset!",
    })))
}
