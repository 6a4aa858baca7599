//! Handlers for the create/edit form.
//!
//! Each handler performs one form operation and, except for toggles and
//! submit, answers with the whole form so clients can re-render from it.

use axum::{
    extract::{Path, State},
    Json,
};
use rota_core::models::{
    form::{ChangeNameRequest, RemoveNameResponse, ScheduleForm, ToggleResponse, UpdateFormRequest},
    schedule::ScheduleResponse,
};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn get_form(State(state): State<Arc<ApiState>>) -> Result<Json<ScheduleForm>, AppError> {
    let controller = state.controller()?;
    Ok(Json(controller.form().clone()))
}

#[axum::debug_handler]
pub async fn open_form(State(state): State<Arc<ApiState>>) -> Result<Json<ScheduleForm>, AppError> {
    let mut controller = state.controller()?;
    controller.open_form()?;
    Ok(Json(controller.form().clone()))
}

#[axum::debug_handler]
pub async fn begin_edit(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<u64>,
) -> Result<Json<ScheduleForm>, AppError> {
    let mut controller = state.controller()?;
    controller.begin_edit(id)?;
    Ok(Json(controller.form().clone()))
}

#[axum::debug_handler]
pub async fn update_form(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<UpdateFormRequest>,
) -> Result<Json<ScheduleForm>, AppError> {
    let mut controller = state.controller()?;

    if let Some(title) = payload.title {
        controller.set_title(title)?;
    }
    if let Some(recurrence) = payload.recurrence {
        controller.set_recurrence(recurrence)?;
    }
    if let Some(time) = payload.time {
        controller.set_time(time)?;
    }

    Ok(Json(controller.form().clone()))
}

#[axum::debug_handler]
pub async fn add_name(State(state): State<Arc<ApiState>>) -> Result<Json<ScheduleForm>, AppError> {
    let mut controller = state.controller()?;
    controller.add_name_field()?;
    Ok(Json(controller.form().clone()))
}

#[axum::debug_handler]
pub async fn change_name(
    State(state): State<Arc<ApiState>>,
    Path(index): Path<usize>,
    Json(payload): Json<ChangeNameRequest>,
) -> Result<Json<ScheduleForm>, AppError> {
    let mut controller = state.controller()?;
    controller.change_name_field(index, payload.value)?;
    Ok(Json(controller.form().clone()))
}

#[axum::debug_handler]
pub async fn remove_name(
    State(state): State<Arc<ApiState>>,
    Path(index): Path<usize>,
) -> Result<Json<RemoveNameResponse>, AppError> {
    let mut controller = state.controller()?;
    let removed = controller.remove_name_field(index)?;

    Ok(Json(RemoveNameResponse {
        removed,
        names: controller.form().state().names.clone(),
    }))
}

#[axum::debug_handler]
pub async fn toggle_day(
    State(state): State<Arc<ApiState>>,
    Path(day): Path<u8>,
) -> Result<Json<ToggleResponse>, AppError> {
    let selected = state.controller()?.toggle_day(day)?;
    Ok(Json(ToggleResponse { value: day, selected }))
}

#[axum::debug_handler]
pub async fn toggle_date(
    State(state): State<Arc<ApiState>>,
    Path(date): Path<u8>,
) -> Result<Json<ToggleResponse>, AppError> {
    let selected = state.controller()?.toggle_date(date)?;
    Ok(Json(ToggleResponse { value: date, selected }))
}

#[axum::debug_handler]
pub async fn toggle_month(
    State(state): State<Arc<ApiState>>,
    Path(month): Path<u8>,
) -> Result<Json<ToggleResponse>, AppError> {
    let selected = state.controller()?.toggle_month(month)?;
    Ok(Json(ToggleResponse { value: month, selected }))
}

#[axum::debug_handler]
pub async fn submit_form(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let schedule = state.controller()?.submit()?;
    Ok(Json(ScheduleResponse::from(&schedule)))
}

#[axum::debug_handler]
pub async fn cancel_form(State(state): State<Arc<ApiState>>) -> Result<Json<ScheduleForm>, AppError> {
    let mut controller = state.controller()?;
    controller.cancel();
    Ok(Json(controller.form().clone()))
}
