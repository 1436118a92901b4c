//! Health check endpoints

use axum::{routing::get, Router};

use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(liveness))
}

/// Simple liveness check (always returns OK if the server is running)
async fn liveness() -> &'static str {
    "OK"
}
