//! Newsbrief persistence API server
//!
//! Serves the latest daily/weekly snapshots and accepts upserts from the
//! batch generation job, authenticated with a static shared-secret header.

mod routes;

use axum::{
    http::{header, Method},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use newsbrief_storage::SnapshotStore;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SnapshotStore>,
    /// Shared secret required on write endpoints
    pub api_key: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,newsbrief_api=debug")),
        )
        .init();

    info!("Starting Newsbrief API");

    let api_key = std::env::var("NEWS_API_KEY")
        .map_err(|_| anyhow::anyhow!("NEWS_API_KEY must be set"))?;

    let db_path = std::env::var("NEWS_DB_PATH").unwrap_or_else(|_| "data/news.db".to_string());
    info!("Opening snapshot store at: {}", db_path);
    let store = Arc::new(SnapshotStore::new(&db_path)?);

    let state = AppState { store, api_key };

    // Configure CORS for the frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-api-key"),
        ]);

    let app = Router::new()
        .merge(routes::api_routes())
        .layer(cors)
        .with_state(state);

    let port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
