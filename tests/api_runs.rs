use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

use interval_timer::{
    api::create_router,
    services::{SilentNotifier, TimerStore},
    state::AppState,
};

fn app() -> (TempDir, Arc<AppState>, Router) {
    let dir = tempdir().unwrap();
    let store = TimerStore::with_path(dir.path().join("timers.json"));
    let state = Arc::new(AppState::new(store, Arc::new(SilentNotifier), 0, "127.0.0.1".to_string()));
    let router = create_router(Arc::clone(&state));
    (dir, state, router)
}

async fn call(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(router: &Router, body: Value) -> String {
    let (status, timer) = call(router, Method::POST, "/timers", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    timer["id"].as_str().unwrap().to_string()
}

fn sprint_timer() -> Value {
    json!({
        "name": "Sprints",
        "settings": {"soundEnabled": true, "countdownBeep": "3"},
        "intervals": [
            {"title": "Warm up", "seconds": 30, "color": "gray"},
            {"title": "Go", "seconds": "0:10", "color": "green"}
        ]
    })
}

#[tokio::test]
async fn health_and_palette() {
    let (_dir, _state, router) = app();

    let (status, health) = call(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");

    let (status, palette) = call(&router, Method::GET, "/palette", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(palette.as_array().unwrap().len(), 15);
    assert_eq!(palette[0]["id"], "red");
}

#[tokio::test]
async fn timer_crud() {
    let (_dir, _state, router) = app();
    let id = create(&router, sprint_timer()).await;

    let (status, timer) = call(&router, Method::GET, &format!("/timers/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(timer["name"], "Sprints");
    assert_eq!(timer["intervals"][0]["color"], "light-gray");
    assert_eq!(timer["intervals"][1]["seconds"], 10);

    let (status, updated) = call(
        &router,
        Method::PUT,
        &format!("/timers/{}", id),
        Some(json!({"name": "Renamed", "intervals": [{"title": "Only", "seconds": 5}]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Renamed");
    assert_eq!(updated["createdAt"], timer["createdAt"]);

    let (_, list) = call(&router, Method::GET, "/timers", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = call(&router, Method::DELETE, &format!("/timers/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = call(&router, Method::GET, &format!("/timers/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn invalid_duration_is_rejected() {
    let (_dir, _state, router) = app();
    let (status, body) = call(
        &router,
        Method::POST,
        "/timers",
        Some(json!({"name": "Bad", "intervals": [{"seconds": "2:99"}]})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"].as_str().unwrap().contains("interval 0"));
}

#[tokio::test]
async fn oversized_durations_are_rejected() {
    let (_dir, state, router) = app();
    let (status, body) = call(
        &router,
        Method::POST,
        "/timers",
        Some(json!({"name": "Huge", "intervals": [{"seconds": 1e20}, {"seconds": 1e20}]})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"].as_str().unwrap().contains("longer than"));
    assert!(state.store.list().is_empty());
}

#[tokio::test]
async fn cannot_run_missing_or_empty_timers() {
    let (_dir, _state, router) = app();

    let (status, _) = call(&router, Method::POST, "/timers/ghost/run", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let id = create(&router, json!({"name": "Empty"})).await;
    let (status, body) = call(&router, Method::POST, &format!("/timers/{}/run", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("no intervals"));

    let (status, _) = call(&router, Method::GET, &format!("/timers/{}/run", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn run_view_transport() {
    let (_dir, state, router) = app();
    let id = create(&router, sprint_timer()).await;
    let run = format!("/timers/{}/run", id);

    let (status, snapshot) = call(&router, Method::POST, &run, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["phase"], "ready");
    assert_eq!(snapshot["state"]["remainingSeconds"], 30);
    assert_eq!(snapshot["position"], "1 / 2");
    assert_eq!(snapshot["next"]["title"], "Go");

    let (_, snapshot) = call(&router, Method::POST, &format!("{}/toggle", run), None).await;
    assert_eq!(snapshot["phase"], "running");

    tokio::time::sleep(Duration::from_millis(5_500)).await;
    let (_, snapshot) = call(&router, Method::GET, &run, None).await;
    assert_eq!(snapshot["state"]["elapsedTotalSeconds"], 5);
    assert_eq!(snapshot["state"]["remainingSeconds"], 25);
    assert_eq!(snapshot["display"]["remaining"], "0:25");

    let (_, snapshot) = call(&router, Method::POST, &format!("{}/skip-forward", run), None).await;
    assert_eq!(snapshot["state"]["currentIndex"], 1);
    assert_eq!(snapshot["state"]["remainingSeconds"], 10);
    assert_eq!(snapshot["state"]["running"], true);

    let (_, snapshot) = call(&router, Method::POST, &format!("{}/skip-back", run), None).await;
    assert_eq!(snapshot["state"]["currentIndex"], 0);
    assert_eq!(snapshot["state"]["remainingSeconds"], 30);

    let (_, snapshot) = call(&router, Method::POST, &format!("{}/restart", run), None).await;
    assert_eq!(snapshot["phase"], "ready");
    assert_eq!(snapshot["state"]["elapsedTotalSeconds"], 0);

    tokio::time::sleep(Duration::from_secs(3)).await;
    let (_, snapshot) = call(&router, Method::GET, &run, None).await;
    assert_eq!(snapshot["state"]["elapsedTotalSeconds"], 0);

    let (status, _) = call(&router, Method::DELETE, &run, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(state.active_runs().unwrap(), 0);
    let (status, _) = call(&router, Method::POST, &format!("{}/toggle", run), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn run_finishes_at_total_duration() {
    let (_dir, _state, router) = app();
    let id = create(
        &router,
        json!({"name": "Short", "intervals": [{"seconds": 2}, {"seconds": 1}, {"seconds": 3}]}),
    )
    .await;
    let run = format!("/timers/{}/run", id);

    call(&router, Method::POST, &run, None).await;
    call(&router, Method::POST, &format!("{}/toggle", run), None).await;
    tokio::time::sleep(Duration::from_millis(9_500)).await;

    let (_, snapshot) = call(&router, Method::GET, &run, None).await;
    assert_eq!(snapshot["phase"], "finished");
    assert_eq!(snapshot["state"]["running"], false);
    assert_eq!(snapshot["state"]["currentIndex"], 2);
    assert_eq!(snapshot["state"]["remainingSeconds"], 0);
    assert_eq!(snapshot["state"]["elapsedTotalSeconds"], 6);
    assert_eq!(snapshot["remainingTotalSeconds"], 0);
}

#[tokio::test(start_paused = true)]
async fn entering_again_replaces_the_run() {
    let (_dir, state, router) = app();
    let id = create(&router, sprint_timer()).await;
    let run = format!("/timers/{}/run", id);

    call(&router, Method::POST, &run, None).await;
    call(&router, Method::POST, &format!("{}/toggle", run), None).await;
    tokio::time::sleep(Duration::from_millis(2_500)).await;

    let (_, snapshot) = call(&router, Method::POST, &run, None).await;
    assert_eq!(snapshot["state"]["elapsedTotalSeconds"], 0);
    tokio::time::sleep(Duration::from_secs(3)).await;

    let (_, snapshot) = call(&router, Method::GET, &run, None).await;
    assert_eq!(snapshot["state"]["elapsedTotalSeconds"], 0);
    assert_eq!(state.active_runs().unwrap(), 1);

    let (_, status) = call(&router, Method::GET, "/status", None).await;
    assert_eq!(status["active_runs"], 1);
    assert_eq!(status["timers"], 1);
}
