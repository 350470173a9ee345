// Custom error types and conversions
// Gives every handler the same JSON error body

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::geocode::GeocodeError;
use crate::inventory::paginate::PaginationError;
use crate::query::QueryError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),
}

impl From<QueryError> for AppError {
    fn from(error: QueryError) -> Self {
        AppError::BadRequest(error.to_string())
    }
}

impl From<PaginationError> for AppError {
    fn from(error: PaginationError) -> Self {
        AppError::BadRequest(error.to_string())
    }
}

impl From<GeocodeError> for AppError {
    fn from(error: GeocodeError) -> Self {
        AppError::BadRequest(error.to_string())
    }
}

// Extractor rejections get the same JSON body as every other bad request
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(message) => {
                tracing::debug!("Rejected request: {}", message);
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(message) => {
                tracing::debug!("Not found: {}", message);
                StatusCode::NOT_FOUND
            }
            AppError::InternalServerError(e) => {
                // Log the detailed error here, don't expose it to the client
                tracing::error!("Internal server error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "success": false, "message": self.to_string() }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
