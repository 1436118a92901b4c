//! Snapshot endpoints
//!
//! GET returns the most recent snapshot (JSON null when none exists yet);
//! POST upserts the submitted snapshot, keyed by its period descriptor, and
//! requires the shared-secret header.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info};

use newsbrief_core::{DailyNewsData, WeeklyNewsData};

use crate::AppState;

/// Create news routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/news/daily", get(get_daily).post(post_daily))
        .route("/news/weekly", get(get_weekly).post(post_weekly))
}

fn authorized(state: &AppState, headers: &HeaderMap) -> bool {
    headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(|key| key == state.api_key)
        .unwrap_or(false)
}

/// GET /news/daily - most recent daily snapshot
async fn get_daily(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.latest_daily() {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => {
            error!("Failed to load daily news: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Failed to fetch daily news"
                })),
            )
                .into_response()
        }
    }
}

/// POST /news/daily - upsert a daily snapshot (batch job)
async fn post_daily(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<DailyNewsData>,
) -> impl IntoResponse {
    if !authorized(&state, &headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "Unauthorized" })),
        )
            .into_response();
    }

    match state.store.upsert_daily(&body) {
        Ok(()) => {
            info!("Stored daily snapshot for {}", body.date);
            (
                StatusCode::CREATED,
                Json(serde_json::json!({ "success": true, "data": body })),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to save daily news: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Failed to save daily news"
                })),
            )
                .into_response()
        }
    }
}

/// GET /news/weekly - most recent weekly snapshot
async fn get_weekly(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.latest_weekly() {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => {
            error!("Failed to load weekly news: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Failed to fetch weekly news"
                })),
            )
                .into_response()
        }
    }
}

/// POST /news/weekly - upsert a weekly snapshot (batch job)
async fn post_weekly(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<WeeklyNewsData>,
) -> impl IntoResponse {
    if !authorized(&state, &headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "Unauthorized" })),
        )
            .into_response();
    }

    match state.store.upsert_weekly(&body) {
        Ok(()) => {
            info!(
                "Stored weekly snapshot for {} ~ {}",
                body.week_start, body.week_end
            );
            (
                StatusCode::CREATED,
                Json(serde_json::json!({ "success": true, "data": body })),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to save weekly news: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Failed to save weekly news"
                })),
            )
                .into_response()
        }
    }
}
