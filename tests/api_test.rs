use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use focus_timer::{
    api::responses::{ApiResponse, StatusResponse},
    create_router, AppState, Phase, TimerConfiguration,
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

fn app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        20554,
        "127.0.0.1".to_string(),
        TimerConfiguration::default(),
    ));
    (create_router(Arc::clone(&state)), state)
}

async fn call<T: DeserializeOwned>(app: &Router, method: Method, uri: &str) -> T {
    let response = app
        .clone()
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "{uri}");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn status_reports_fresh_timer() {
    let (app, _) = app();

    let status: StatusResponse = call(&app, Method::GET, "/status").await;
    assert_eq!(status.timer.phase, Phase::Focus);
    assert_eq!(status.timer.display, "25:00");
    assert!(!status.timer.is_running);
    assert_eq!(status.port, 20554);
    assert!(status.last_action.is_none());
    assert!(status.last_notify_error.is_none());
}

#[tokio::test]
async fn start_pause_toggle() {
    let (app, _) = app();

    let response: ApiResponse = call(&app, Method::POST, "/start").await;
    assert_eq!(response.status, "running");
    assert!(response.timer.is_running);

    let response: ApiResponse = call(&app, Method::POST, "/start").await;
    assert_eq!(response.status, "running");

    let response: ApiResponse = call(&app, Method::POST, "/pause").await;
    assert_eq!(response.status, "paused");

    let response: ApiResponse = call(&app, Method::POST, "/toggle").await;
    assert_eq!(response.status, "running");
    assert_eq!(response.message, "Timer started");

    let response: ApiResponse = call(&app, Method::POST, "/toggle").await;
    assert_eq!(response.status, "paused");
    assert_eq!(response.message, "Timer paused");

    let status: StatusResponse = call(&app, Method::GET, "/status").await;
    assert_eq!(status.last_action.as_deref(), Some("toggle"));
    assert!(status.last_action_time.is_some());
}

#[tokio::test]
async fn focus_adjustment_is_bounded() {
    let (app, _) = app();

    for _ in 0..50 {
        let _: ApiResponse = call(&app, Method::POST, "/focus/increase").await;
    }
    let status: StatusResponse = call(&app, Method::GET, "/status").await;
    assert_eq!(status.timer.focus_minutes, 60);
    assert_eq!(status.timer.display, "60:00");

    for _ in 0..50 {
        let _: ApiResponse = call(&app, Method::POST, "/focus/decrease").await;
    }
    let status: StatusResponse = call(&app, Method::GET, "/status").await;
    assert_eq!(status.timer.focus_minutes, 25);
    assert_eq!(status.timer.display, "25:00");
}

#[tokio::test]
async fn reset_after_break() {
    let (app, state) = app();

    let _: ApiResponse = call(&app, Method::POST, "/focus/increase").await;
    let _: ApiResponse = call(&app, Method::POST, "/start").await;
    for _ in 0..26 * 60 {
        state.tick().unwrap();
    }

    let status: StatusResponse = call(&app, Method::GET, "/status").await;
    assert_eq!(status.timer.phase, Phase::Break);
    assert_eq!(status.timer.display, "06:00");
    assert!(!status.timer.is_running);

    let response: ApiResponse = call(&app, Method::POST, "/reset").await;
    assert_eq!(response.timer.phase, Phase::Focus);
    assert_eq!(response.timer.display, "25:00");
    assert_eq!(response.timer.focus_minutes, 25);
    assert_eq!(response.status, "paused");
}

#[tokio::test]
async fn health() {
    let (app, _) = app();

    let health: serde_json::Value = call(&app, Method::GET, "/health").await;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (app, _) = app();

    let response = app
        .oneshot(Request::builder().uri("/stop").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
