use axum::{
    extract::{rejection::JsonRejection, Json as JsonExtract, Path},
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    geocode::{self, MAX_BATCH_SIZE},
    models::DataResponse,
};

#[derive(Deserialize, Debug)]
pub struct BatchRequest {
    #[serde(default)]
    zips: Vec<String>,
}

pub async fn geocode_zip(Path(zip): Path<String>) -> AppResult<impl IntoResponse> {
    tracing::info!("[HANDLER] /api/geocode/:zip - Request received for {}", zip);
    let result = geocode::lookup(&zip)?;
    Ok(Json(DataResponse::ok(result)))
}

pub async fn geocode_batch(
    request: Result<JsonExtract<BatchRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let JsonExtract(request) = request?;
    tracing::info!("[HANDLER] /api/geocode/batch - {} ZIPs received", request.zips.len());

    if request.zips.is_empty() {
        return Err(AppError::BadRequest(
            "Request body must contain 'zips' array with at least one ZIP code".to_string(),
        ));
    }
    if request.zips.len() > MAX_BATCH_SIZE {
        return Err(AppError::BadRequest(format!(
            "Maximum {MAX_BATCH_SIZE} ZIP codes allowed per batch request"
        )));
    }

    Ok(Json(DataResponse::ok(geocode::lookup_batch(&request.zips))))
}
