use cinema_booking::config::{AppConfig, Config, DatabaseConfig};
use cinema_booking::AppState;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

static NEXT_DB: AtomicU32 = AtomicU32::new(0);

/// Fresh application state over a private file-backed SQLite database, so
/// tests never share seat state or bookings.
pub async fn test_state() -> Arc<AppState> {
    let n = NEXT_DB.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "cinema_booking_test_{}_{n}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let config = Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            rpc_port: 0,
            rust_log: "warn".to_string(),
        },
        database: DatabaseConfig {
            url: format!("sqlite://{}", path.display()),
            pool_size: 5,
        },
    };

    AppState::new(config)
        .await
        .expect("failed to initialize test state")
}
