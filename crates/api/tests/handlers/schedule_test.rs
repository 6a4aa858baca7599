use std::sync::Arc;

use axum::http::StatusCode;
use mockall::predicate;
use pretty_assertions::assert_eq;
use rota_core::{
    models::schedule::{DeleteScheduleResponse, RotateResponse, ScheduleResponse},
    store::{KeyValueStore, MemoryStore, ScheduleStore, SCHEDULES_KEY},
};
use rota_db::mock::MockSlotStore;
use serde_json::{json, Value};

use crate::test_utils::{server_for, TestContext};

#[tokio::test]
async fn test_list_starts_empty() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/api/schedules").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Vec<ScheduleResponse>>(), vec![]);
}

#[tokio::test]
async fn test_create_and_get_schedule() {
    let ctx = TestContext::new();
    let created = ctx.create_schedule("Trash", &["Alice", "Bob"]).await;

    assert_eq!(created.schedule.current_index, 0);
    assert_eq!(created.current_name.as_deref(), Some("Alice"));

    let response = ctx
        .server
        .get(&format!("/api/schedules/{}", created.schedule.id))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<ScheduleResponse>(), created);
}

#[tokio::test]
async fn test_get_unknown_schedule_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/api/schedules/404").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(body["error"], "Resource not found: Schedule with ID 404 not found");
}

#[tokio::test]
async fn test_rotate_wraps_both_ways() {
    let ctx = TestContext::new();
    let created = ctx.create_schedule("Trash", &["A", "B", "C"]).await;
    let path = format!("/api/schedules/{}/rotate", created.schedule.id);

    let prev = ctx
        .server
        .post(&path)
        .json(&json!({ "direction": "prev" }))
        .await
        .json::<RotateResponse>();
    assert!(prev.rotated);
    assert_eq!(prev.current_index, Some(2));
    assert_eq!(prev.current_name.as_deref(), Some("C"));

    let next = ctx
        .server
        .post(&path)
        .json(&json!({ "direction": "next" }))
        .await
        .json::<RotateResponse>();
    assert_eq!(next.current_index, Some(0));

    let persisted = ScheduleStore::new(ctx.store.clone()).try_load().unwrap();
    assert_eq!(persisted[0].current_index, 0);
}

#[tokio::test]
async fn test_rotate_unknown_schedule_is_noop() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/schedules/77/rotate")
        .json(&json!({ "direction": "next" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<RotateResponse>();
    assert!(!body.rotated);
    assert_eq!(body.current_index, None);
}

#[tokio::test]
async fn test_rotate_schedule_without_names_reports_not_rotated() {
    let store = MemoryStore::new();
    store
        .set(
            SCHEDULES_KEY,
            r#"[{"id":3,"title":"Broken","names":[],"type":"daily","time":"09:00","currentIndex":0}]"#,
        )
        .unwrap();
    let ctx = TestContext::with_store(store);

    let response = ctx
        .server
        .post("/api/schedules/3/rotate")
        .json(&json!({ "direction": "next" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<RotateResponse>();
    assert!(!body.rotated);
    assert_eq!(body.current_index, Some(0));
    assert_eq!(body.current_name, None);
}

#[tokio::test]
async fn test_rotate_rejects_unknown_direction() {
    let ctx = TestContext::new();
    let created = ctx.create_schedule("Trash", &["A", "B"]).await;

    let response = ctx
        .server
        .post(&format!("/api/schedules/{}/rotate", created.schedule.id))
        .json(&json!({ "direction": "sideways" }))
        .await;

    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn test_delete_keeps_other_schedules_in_order() {
    let ctx = TestContext::new();
    let first = ctx.create_schedule("First", &["A"]).await;
    let second = ctx.create_schedule("Second", &["B"]).await;
    let third = ctx.create_schedule("Third", &["C"]).await;

    let response = ctx
        .server
        .delete(&format!("/api/schedules/{}", second.schedule.id))
        .await;
    response.assert_status_ok();
    assert!(response.json::<DeleteScheduleResponse>().deleted);

    let remaining: Vec<u64> = ctx
        .server
        .get("/api/schedules")
        .await
        .json::<Vec<ScheduleResponse>>()
        .into_iter()
        .map(|s| s.schedule.id)
        .collect();
    assert_eq!(remaining, vec![first.schedule.id, third.schedule.id]);

    let again = ctx
        .server
        .delete(&format!("/api/schedules/{}", second.schedule.id))
        .await
        .json::<DeleteScheduleResponse>();
    assert!(!again.deleted);
}

#[tokio::test]
async fn test_health_reports_schedule_count() {
    let ctx = TestContext::new();
    ctx.create_schedule("Trash", &["A"]).await;

    let body = ctx.server.get("/health").await.json::<Value>();

    assert_eq!(body, json!({ "status": "ok", "schedules": 1 }));
}

#[tokio::test]
async fn test_storage_failure_is_server_error() {
    let mut store = MockSlotStore::new();
    store.expect_get().returning(|_| {
        Ok(Some(
            r#"[{"id":5,"title":"Trash","names":["A","B"],"type":"daily","time":"08:00","currentIndex":0}]"#
                .to_string(),
        ))
    });
    store
        .expect_set()
        .with(predicate::eq(SCHEDULES_KEY), predicate::always())
        .returning(|_, _| Err(eyre::eyre!("read-only filesystem")));
    let server = server_for(Arc::new(store));

    let response = server
        .post("/api/schedules/5/rotate")
        .json(&json!({ "direction": "next" }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let schedule = server.get("/api/schedules/5").await.json::<ScheduleResponse>();
    assert_eq!(schedule.schedule.current_index, 0);
}
