pub mod catalog;
pub mod config;
pub mod controllers;
pub mod database;
pub mod engine;
pub mod error;
pub mod models;
pub mod rpc;
pub mod store;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// Shared state for both transports: one store, one engine
pub struct AppState {
    pub db: database::Database,
    pub engine: engine::ReservationEngine,
    pub catalog: catalog::CatalogReader,
    pub config: config::Config,
}

impl AppState {
    pub async fn new(config: config::Config) -> Result<Arc<Self>, Box<dyn std::error::Error>> {
        let db = database::Database::new(&config.database.url, config.database.pool_size).await?;

        db.run_migrations().await?;
        store::seed(&db).await?;

        let engine = engine::ReservationEngine::new(db.clone());
        let catalog = catalog::CatalogReader::new(db.clone());

        Ok(Arc::new(Self {
            db,
            engine,
            catalog,
            config,
        }))
    }
}

/// Builds the HTTP router. Kept out of `main` so integration tests can mount
/// the same app on an ephemeral port.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Cinema Booking API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
