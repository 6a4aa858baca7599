//! # Error Handling Middleware
//!
//! Maps `RotaError` values to HTTP status codes and JSON error bodies so
//! every endpoint reports failures the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rota_core::errors::RotaError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use rota_api::middleware::error_handling::AppError;
/// use rota_core::errors::RotaError;
///
/// async fn handler() -> Result<Json<u64>, AppError> {
///     Err(AppError(RotaError::NotFound("Schedule with ID 7 not found".to_string())))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub RotaError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            RotaError::NotFound(_) => StatusCode::NOT_FOUND,
            RotaError::Validation(_) => StatusCode::BAD_REQUEST,
            RotaError::IndexOutOfRange { .. } => StatusCode::BAD_REQUEST,
            RotaError::InvalidTransition(_) => StatusCode::CONFLICT,
            RotaError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RotaError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RotaError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Request failed: {:#}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// Automatic conversion from RotaError to AppError
///
/// Lets handlers returning `Result<T, AppError>` use `?` on controller calls.
impl From<RotaError> for AppError {
    fn from(err: RotaError) -> Self {
        AppError(err)
    }
}

/// Maps a RotaError to an HTTP response
pub fn map_error(err: RotaError) -> Response {
    AppError(err).into_response()
}
