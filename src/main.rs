use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinema_booking::{config::Config, rpc, router, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cinema Booking service");

    let rpc_port = config.app.rpc_port;
    let http_port = config.app.port;

    // One shared state: store, engine, catalog
    let state = AppState::new(config)
        .await
        .expect("Failed to initialize application state");
    info!("Database ready");

    // --- RPC transport for desktop clients ---

    let rpc_addr = SocketAddr::from(([0, 0, 0, 0], rpc_port));
    let rpc_listener = TcpListener::bind(rpc_addr)
        .await
        .expect("Failed to bind RPC listener");
    info!("RPC server listening on {rpc_addr}");

    let rpc_state = state.clone();
    task::spawn(async move {
        if let Err(e) = rpc::serve(rpc_state, rpc_listener).await {
            tracing::error!("rpc server stopped: {e}");
        }
    });

    // --- HTTP transport for the web client ---

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], http_port));
    info!("Web server listening on {addr}");

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind HTTP listener");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("HTTP server failed");
}
