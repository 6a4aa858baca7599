use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    schedules: usize,
}

#[derive(Serialize)]
struct VersionResponse {
    version: String,
}

async fn health_check(State(state): State<Arc<ApiState>>) -> Result<Json<HealthResponse>, AppError> {
    let schedules = state.controller()?.schedules().len();

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        schedules,
    }))
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
}
