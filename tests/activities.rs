use axum::{body::to_bytes, http::Request, Router};
use runlog_rs::{routes, state::AppState};
use tower::ServiceExt;

fn app_with_state() -> (Router, AppState) {
    let state = AppState::new();
    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::upload::router())
        .merge(routes::activities::router())
        .with_state(state.clone());
    (app, state)
}

fn summary(start_time: &str) -> runlog_rs::types::activity::ActivitySummary {
    runlog_rs::types::activity::ActivitySummary {
        start_time: start_time.parse().expect("timestamp"),
        total_elapsed_seconds: 600.0,
        total_distance_meters: 2000.0,
        avg_pace_seconds_per_km: 300.0,
        avg_heart_rate_bpm: Some(150.0),
        avg_cadence_spm: None,
        laps: Vec::new(),
    }
}

#[tokio::test]
async fn list_returns_newest_first() {
    let (app, state) = app_with_state();
    state.insert("older".to_string(), summary("2024-01-01T06:00:00Z"));
    state.insert("newer".to_string(), summary("2024-02-01T06:00:00Z"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/activities")
                .method("GET")
                .body(axum::body::Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let text = String::from_utf8(body.to_vec()).expect("utf8");

    let newer_pos = text.find("newer").expect("newer in body");
    let older_pos = text.find("older").expect("older in body");
    assert!(newer_pos < older_pos);
}

#[tokio::test]
async fn get_by_id_returns_stored_summary() {
    let (app, state) = app_with_state();
    state.insert("abc-123".to_string(), summary("2024-01-01T06:00:00Z"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/activities/abc-123")
                .method("GET")
                .body(axum::body::Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let text = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(text.contains("\"activity_id\":\"abc-123\""));
    assert!(text.contains("\"total_distance_meters\":2000.0"));
}

#[tokio::test]
async fn list_honors_skip_and_limit() {
    let (app, state) = app_with_state();
    state.insert("jan".to_string(), summary("2024-01-01T06:00:00Z"));
    state.insert("feb".to_string(), summary("2024-02-01T06:00:00Z"));
    state.insert("mar".to_string(), summary("2024-03-01T06:00:00Z"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/activities?skip=1&limit=1")
                .method("GET")
                .body(axum::body::Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let text = String::from_utf8(body.to_vec()).expect("utf8");

    // Newest first is mar, feb, jan; skipping one and taking one leaves feb.
    assert!(text.contains("\"activity_id\":\"feb\""));
    assert!(!text.contains("\"activity_id\":\"mar\""));
    assert!(!text.contains("\"activity_id\":\"jan\""));
}

#[tokio::test]
async fn delete_removes_stored_activity() {
    let (app, state) = app_with_state();
    state.insert("abc-123".to_string(), summary("2024-01-01T06:00:00Z"));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/activities/abc-123")
                .method("DELETE")
                .body(axum::body::Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let text = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(text.contains("Activity deleted successfully"));
    assert!(state.get("abc-123").is_none());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/activities/abc-123")
                .method("GET")
                .body(axum::body::Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_id_is_not_found() {
    let (app, _state) = app_with_state();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/activities/nope")
                .method("DELETE")
                .body(axum::body::Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
    let (app, _state) = app_with_state();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/activities/nope")
                .method("GET")
                .body(axum::body::Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}
