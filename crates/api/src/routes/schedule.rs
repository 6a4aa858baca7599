use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/schedules", get(handlers::schedule::list_schedules))
        .route(
            "/api/schedules/:id",
            get(handlers::schedule::get_schedule).delete(handlers::schedule::delete_schedule),
        )
        .route(
            "/api/schedules/:id/rotate",
            post(handlers::schedule::rotate_schedule),
        )
}
