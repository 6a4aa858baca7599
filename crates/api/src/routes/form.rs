use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/form",
            get(handlers::form::get_form)
                .post(handlers::form::open_form)
                .patch(handlers::form::update_form),
        )
        .route("/api/form/edit/:id", post(handlers::form::begin_edit))
        .route("/api/form/names", post(handlers::form::add_name))
        .route(
            "/api/form/names/:index",
            put(handlers::form::change_name).delete(handlers::form::remove_name),
        )
        .route("/api/form/days/:day", post(handlers::form::toggle_day))
        .route("/api/form/dates/:date", post(handlers::form::toggle_date))
        .route("/api/form/months/:month", post(handlers::form::toggle_month))
        .route("/api/form/submit", post(handlers::form::submit_form))
        .route("/api/form/cancel", post(handlers::form::cancel_form))
}
