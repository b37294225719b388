// HTTP API tests. Requests go straight into the router with
// `tower::ServiceExt::oneshot`, no socket involved.

#![cfg(feature = "web")]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use finder2d::web::{build_router, AppState};
use finder2d::{CellSymbols, Finder, SearchParams};

const SOURCE: &str = "000000\n011000\n011000\n000000\n000000\n";
const TARGET: &str = "11\n11\n";

fn app() -> (Router, AppState) {
    let symbols = CellSymbols::new(b'1', b'0').unwrap();
    let state = AppState::new(Finder::new(symbols, SearchParams::default()));
    (build_router(state.clone()), state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn load_both(app: &Router) {
    let (status, _) = send(
        app,
        "PUT",
        "/api/v1/matrix/source",
        Some(json!({ "content": SOURCE })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        app,
        "PUT",
        "/api/v1/matrix/target",
        Some(json!({ "api": "v1", "content": TARGET })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================
// Health and matrices
// ============================================================

#[tokio::test]
async fn health_is_ok() {
    let (app, _) = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn load_then_get_matrix() {
    let (app, state) = app();
    let (status, body) = send(
        &app,
        "PUT",
        "/api/v1/matrix/Source",
        Some(json!({ "content": SOURCE })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "source");
    assert_eq!(body["width"], 6);
    assert_eq!(body["height"], 5);

    let (status, body) = send(&app, "GET", "/api/v1/matrix/source", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["api"], "v1");
    assert_eq!(body["content"], SOURCE);

    assert!(state.finder.read().await.source().is_some());
}

#[tokio::test]
async fn get_matrix_before_loading_is_not_found() {
    let (app, _) = app();
    let (status, body) = send(&app, "GET", "/api/v1/matrix/target", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("target"));
}

#[tokio::test]
async fn unknown_matrix_name_is_not_found() {
    let (app, _) = app();
    let (status, _) = send(
        &app,
        "PUT",
        "/api/v1/matrix/frame",
        Some(json!({ "content": SOURCE })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_matrix_is_bad_request() {
    let (app, _) = app();
    let (status, body) = send(
        &app,
        "PUT",
        "/api/v1/matrix/source",
        Some(json!({ "content": "01\n011\n" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("line #2"));
}

#[tokio::test]
async fn other_api_version_is_not_implemented() {
    let (app, _) = app();
    let (status, _) = send(
        &app,
        "PUT",
        "/api/v1/matrix/source",
        Some(json!({ "api": "v2", "content": SOURCE })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);

    let (status, _) = send(&app, "GET", "/api/v1/matches?api=v0", None).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
}

// ============================================================
// Search and matches
// ============================================================

#[tokio::test]
async fn search_without_matrices_conflicts() {
    let (app, state) = app();
    let (status, body) = send(&app, "POST", "/api/v1/search", Some(json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("source"));
    assert!(state.status.read().await.last_error.is_some());
}

#[tokio::test]
async fn search_then_list_and_get_matches() {
    let (app, _) = app();
    load_both(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/search",
        Some(json!({ "api": "v1", "percentage": 75.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_matches"], 1);

    let (status, body) = send(&app, "GET", "/api/v1/matches", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["matches"],
        json!([{ "x": 1, "y": 1, "percentage": 100.0 }])
    );

    let (status, body) = send(&app, "GET", "/api/v1/matches/0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["match"]["x"], 1);
    assert_eq!(body["matrix"]["width"], 2);
    assert_eq!(body["matrix"]["height"], 2);
    assert_eq!(body["matrix"]["content"], TARGET);

    let (status, body) = send(&app, "GET", "/api/v1/matches/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not found match with id=7");
}

#[tokio::test]
async fn unreachable_percentage_finds_nothing() {
    let (app, _) = app();
    load_both(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/search",
        Some(json!({ "percentage": 101.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_matches"], 0);
}

#[tokio::test]
async fn search_without_body_uses_session_params() {
    let (app, _) = app();
    load_both(&app).await;

    let (status, body) = send(&app, "POST", "/api/v1/search", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_matches"], 1);
}

#[tokio::test]
async fn reloading_source_clears_matches() {
    let (app, _) = app();
    load_both(&app).await;
    send(&app, "POST", "/api/v1/search", None).await;

    let (status, _) = send(
        &app,
        "PUT",
        "/api/v1/matrix/source",
        Some(json!({ "content": "00\n00\n" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/v1/matches", None).await;
    assert_eq!(body["matches"], json!([]));
    let (status, _) = send(&app, "GET", "/api/v1/matches/0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_reports_the_session() {
    let (app, _) = app();
    load_both(&app).await;
    send(&app, "POST", "/api/v1/search", Some(json!({ "delta": 2 }))).await;

    let (status, body) = send(&app, "GET", "/api/v1/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], json!({ "width": 6, "height": 5 }));
    assert_eq!(body["target"], json!({ "width": 2, "height": 2 }));
    assert_eq!(body["percentage"], 50.0);
    assert_eq!(body["delta"], 2);
    assert_eq!(body["total_matches"], 1);
    assert!(body["searched_at"].is_string());
    assert!(body["last_error"].is_null());
}
