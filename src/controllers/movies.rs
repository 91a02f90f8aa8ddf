use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use super::error_response;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(list_movies))
        .route("/seats/{movie_id}", get(seat_map))
}

// GET /api/movies
async fn list_movies(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let movies = state.catalog.list_movies().await.map_err(error_response)?;
    Ok(Json(serde_json::json!({
        "success": true,
        "movies": movies,
    })))
}

// GET /api/seats/{movie_id}
async fn seat_map(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i64>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let seats = state.catalog.seat_map(movie_id).await.map_err(error_response)?;
    Ok(Json(serde_json::json!({
        "success": true,
        "movie_id": movie_id,
        "seats": seats,
    })))
}
