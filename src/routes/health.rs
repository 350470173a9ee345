use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::{geocode, AppState};

pub async fn ping(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "message": app_state.settings.ping_message }))
}

pub async fn health(State(app_state): State<AppState>) -> impl IntoResponse {
    let store = app_state.inventory.snapshot().await;
    let upstream_configured = app_state.settings.upstream().is_some();

    Json(json!({
        "success": true,
        "message": format!("Vehicle service healthy with {} vehicles", store.len()),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "totalRecords": store.len(),
        "usingMockData": !upstream_configured,
        "upstreamConfigured": upstream_configured,
        "knownZips": geocode::known_zip_count(),
    }))
}
