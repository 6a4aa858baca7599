use axum::{
    extract::{Path, State},
    Json,
};
use rota_core::{
    errors::RotaError,
    models::schedule::{DeleteScheduleResponse, RotateRequest, RotateResponse, ScheduleResponse},
};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn list_schedules(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ScheduleResponse>>, AppError> {
    let controller = state.controller()?;
    let schedules = controller
        .schedules()
        .iter()
        .map(ScheduleResponse::from)
        .collect();

    Ok(Json(schedules))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<u64>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let controller = state.controller()?;
    let schedule = controller
        .schedule(id)
        .ok_or_else(|| RotaError::NotFound(format!("Schedule with ID {} not found", id)))?;

    Ok(Json(ScheduleResponse::from(schedule)))
}

/// Deleting an unknown id succeeds with `deleted: false`.
#[axum::debug_handler]
pub async fn delete_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteScheduleResponse>, AppError> {
    let deleted = state.controller()?.delete_schedule(id)?;

    Ok(Json(DeleteScheduleResponse { id, deleted }))
}

/// Rotating an unknown id, or a schedule without names, succeeds with
/// `rotated: false`.
#[axum::debug_handler]
pub async fn rotate_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<u64>,
    Json(payload): Json<RotateRequest>,
) -> Result<Json<RotateResponse>, AppError> {
    let mut controller = state.controller()?;
    let rotated = controller.rotate(id, payload.direction)?.is_some();
    let schedule = controller.schedule(id);

    Ok(Json(RotateResponse {
        id,
        rotated,
        current_index: schedule.map(|s| s.current_index),
        current_name: schedule.and_then(|s| s.current_name()).map(str::to_string),
    }))
}
