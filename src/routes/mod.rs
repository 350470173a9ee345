// Route definitions

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

mod api;
mod geocode;
mod health;

pub fn create_router(app_state: AppState) -> Router {
    let api_router = Router::new()
        .route("/ping", get(health::ping))
        .route("/health", get(health::health))
        .route("/vehicles", get(api::get_vehicles))
        .route("/vehicles/filters", get(api::get_filter_options))
        .route("/vehicles/:id", get(api::get_vehicle_by_id))
        .route("/dealers", get(api::get_dealers))
        .route("/vehicle-types", get(api::get_vehicle_types))
        .route("/geocode/batch", post(geocode::geocode_batch))
        .route("/geocode/:zip", get(geocode::geocode_zip))
        .with_state(app_state);

    Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
}
