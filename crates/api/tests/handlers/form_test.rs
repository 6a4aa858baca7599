use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rota_core::models::{
    form::{FormMode, RemoveNameResponse, ScheduleForm, ToggleResponse},
    schedule::{Recurrence, ScheduleResponse},
};
use serde_json::{json, Value};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_form_starts_closed() {
    let ctx = TestContext::new();

    let form = ctx.server.get("/api/form").await.json::<ScheduleForm>();

    assert_eq!(form.mode(), FormMode::Closed);
    assert_eq!(form.state().names, vec![String::new()]);
}

#[tokio::test]
async fn test_edits_on_closed_form_conflict() {
    let ctx = TestContext::new();

    ctx.server
        .post("/api/form/names")
        .await
        .assert_status(StatusCode::CONFLICT);
    ctx.server
        .post("/api/form/submit")
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_open_twice_conflicts() {
    let ctx = TestContext::new();

    ctx.server.post("/api/form").await.assert_status_ok();
    ctx.server
        .post("/api/form")
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_fields_and_toggles() {
    let ctx = TestContext::new();
    ctx.server.post("/api/form").await.assert_status_ok();

    let form = ctx
        .server
        .patch("/api/form")
        .json(&json!({ "title": "Bins", "type": "yearly", "time": "06:30" }))
        .await
        .json::<ScheduleForm>();
    assert_eq!(form.state().title, "Bins");
    assert_eq!(form.state().recurrence, Recurrence::Yearly);
    assert_eq!(form.state().time, "06:30");

    for month in [11, 2] {
        let toggled = ctx
            .server
            .post(&format!("/api/form/months/{}", month))
            .await
            .json::<ToggleResponse>();
        assert!(toggled.selected);
    }
    let untoggled = ctx
        .server
        .post("/api/form/months/11")
        .await
        .json::<ToggleResponse>();
    assert!(!untoggled.selected);

    ctx.server.post("/api/form/dates/31").await.assert_status_ok();
    ctx.server.post("/api/form/days/6").await.assert_status_ok();

    let form = ctx.server.get("/api/form").await.json::<Value>();
    assert_eq!(form["state"]["selectedMonths"], json!([2]));
    assert_eq!(form["state"]["selectedDates"], json!([31]));
    assert_eq!(form["state"]["selectedDays"], json!([6]));
}

#[tokio::test]
async fn test_toggle_out_of_range_is_bad_request() {
    let ctx = TestContext::new();
    ctx.server.post("/api/form").await.assert_status_ok();

    ctx.server
        .post("/api/form/months/13")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    ctx.server
        .post("/api/form/days/7")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_name_fields() {
    let ctx = TestContext::new();
    ctx.server.post("/api/form").await.assert_status_ok();

    let removed = ctx
        .server
        .delete("/api/form/names/0")
        .await
        .json::<RemoveNameResponse>();
    assert!(!removed.removed);
    assert_eq!(removed.names, vec![String::new()]);

    ctx.server
        .put("/api/form/names/4")
        .json(&json!({ "value": "Nobody" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server.post("/api/form/names").await.assert_status_ok();
    ctx.server
        .put("/api/form/names/1")
        .json(&json!({ "value": "Bea" }))
        .await
        .assert_status_ok();

    let removed = ctx
        .server
        .delete("/api/form/names/0")
        .await
        .json::<RemoveNameResponse>();
    assert!(removed.removed);
    assert_eq!(removed.names, vec!["Bea".to_string()]);
}

#[tokio::test]
async fn test_submit_filters_blank_names() {
    let ctx = TestContext::new();

    let created = ctx.create_schedule("Trash", &["Alice", "  ", "Bob"]).await;

    assert_eq!(created.schedule.names, vec!["Alice".to_string(), "Bob".to_string()]);
}

#[tokio::test]
async fn test_submit_missing_title_is_bad_request() {
    let ctx = TestContext::new();
    ctx.server.post("/api/form").await.assert_status_ok();
    ctx.server
        .put("/api/form/names/0")
        .json(&json!({ "value": "Alice" }))
        .await
        .assert_status_ok();

    let response = ctx.server.post("/api/form/submit").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Validation error: title is required"
    );
    let form = ctx.server.get("/api/form").await.json::<ScheduleForm>();
    assert_eq!(form.mode(), FormMode::Creating);
}

#[tokio::test]
async fn test_edit_keeps_id_and_turn() {
    let ctx = TestContext::new();
    let created = ctx.create_schedule("Trash", &["A", "B", "C"]).await;
    let id = created.schedule.id;
    ctx.server
        .post(&format!("/api/schedules/{}/rotate", id))
        .json(&json!({ "direction": "next" }))
        .await
        .assert_status_ok();

    let form = ctx
        .server
        .post(&format!("/api/form/edit/{}", id))
        .await
        .json::<ScheduleForm>();
    assert_eq!(
        form.mode(),
        FormMode::Editing { id }
    );
    assert_eq!(form.state().title, "Trash");

    ctx.server
        .patch("/api/form")
        .json(&json!({ "title": "Recycling" }))
        .await
        .assert_status_ok();
    let edited = ctx
        .server
        .post("/api/form/submit")
        .await
        .json::<ScheduleResponse>();

    assert_eq!(edited.schedule.id, id);
    assert_eq!(edited.schedule.current_index, 1);
    assert_eq!(edited.schedule.title, "Recycling");
    assert_eq!(edited.current_name.as_deref(), Some("B"));
}

#[tokio::test]
async fn test_edit_unknown_schedule_is_not_found() {
    let ctx = TestContext::new();

    ctx.server
        .post("/api/form/edit/123")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancel_discards_changes() {
    let ctx = TestContext::new();
    let created = ctx.create_schedule("Trash", &["A"]).await;
    let id = created.schedule.id;

    ctx.server
        .post(&format!("/api/form/edit/{}", id))
        .await
        .assert_status_ok();
    ctx.server
        .patch("/api/form")
        .json(&json!({ "title": "Changed" }))
        .await
        .assert_status_ok();

    let form = ctx
        .server
        .post("/api/form/cancel")
        .await
        .json::<ScheduleForm>();
    assert_eq!(form.mode(), FormMode::Closed);

    let schedule = ctx
        .server
        .get(&format!("/api/schedules/{}", id))
        .await
        .json::<ScheduleResponse>();
    assert_eq!(schedule.schedule.title, "Trash");
}
