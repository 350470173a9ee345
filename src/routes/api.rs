// Handlers for the vehicle listing endpoints

use anyhow::Context;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::{
    error::{AppError, AppResult},
    inventory::{Facet, VehiclePage},
    models::{DataResponse, VehiclesResponse},
    query::{parse_vehicle_query, VehicleParams},
    upstream, AppState,
};

pub async fn get_vehicles(
    State(app_state): State<AppState>,
    RawQuery(raw_query): RawQuery,
    params: Result<Query<VehicleParams>, QueryRejection>,
) -> AppResult<Response> {
    tracing::info!("[HANDLER] /api/vehicles - Request received: {:?}", raw_query);

    // Validation happens before any upstream call or inventory scan
    let Query(params) = params?;
    let query = parse_vehicle_query(&params)?;

    let mut note = None;
    if let Some(base_url) = app_state.settings.upstream() {
        match upstream::fetch_vehicles(
            &app_state.http_client,
            base_url,
            raw_query.as_deref(),
            app_state.settings.upstream_timeout(),
        )
        .await
        {
            Ok(listing) => {
                tracing::info!(
                    "[HANDLER] /api/vehicles - Relaying {} upstream listings.",
                    listing.data.len()
                );
                return Ok(Json(listing).into_response());
            }
            Err(e) => {
                tracing::warn!("[HANDLER] /api/vehicles - Upstream failed, falling back to local inventory: {:?}", e);
                note = Some(upstream::FALLBACK_NOTE.to_string());
            }
        }
    }

    let store = app_state.inventory.snapshot().await;
    let result: anyhow::Result<VehiclePage> = tokio::task::spawn_blocking(move || store.query(&query))
        .await
        .context("Inventory query task failed")
        .and_then(|page| page);

    match result {
        Ok(page) => {
            tracing::info!(
                "[HANDLER] /api/vehicles - Returning {} of {} matching vehicles.",
                page.data.len(),
                page.meta.total_records
            );
            Ok(Json(VehiclesResponse::ok(page.data, page.meta).with_note(note)).into_response())
        }
        Err(e) => {
            tracing::error!("[HANDLER] /api/vehicles - Query failed: {:?}", e);
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(VehiclesResponse::failure("Failed to fetch vehicles")),
            )
                .into_response())
        }
    }
}

pub async fn get_vehicle_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    tracing::info!("[HANDLER] /api/vehicles/:id - Request received for id: {}", id);

    let id = id
        .parse::<u64>()
        .ok()
        .filter(|id| *id >= 1)
        .ok_or_else(|| AppError::BadRequest("Invalid vehicle ID".to_string()))?;

    let store = app_state.inventory.snapshot().await;
    let vehicle = store
        .get(id)
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;
    Ok(Json(DataResponse::ok(vehicle)))
}

pub async fn get_filter_options(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    tracing::info!("[HANDLER] /api/vehicles/filters - Request received.");
    let store = app_state.inventory.snapshot().await;
    Ok(Json(DataResponse::ok(store.filter_options())))
}

pub async fn get_dealers(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    tracing::info!("[HANDLER] /api/dealers - Request received.");
    let store = app_state.inventory.snapshot().await;
    Ok(Json(DataResponse::ok(store.facet_counts(Facet::Dealer))))
}

pub async fn get_vehicle_types(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    tracing::info!("[HANDLER] /api/vehicle-types - Request received.");
    let store = app_state.inventory.snapshot().await;
    Ok(Json(DataResponse::ok(store.facet_counts(Facet::VehicleType))))
}
