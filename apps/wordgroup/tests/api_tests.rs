//! Integration tests for the wordgroup HTTP API.
//!
//! Uses axum-test to drive the router in-process. Lookups go to a small
//! canned word API bound to a local port.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::{Json, Router, extract::Query, routing::get};
use axum_test::TestServer;
use serde_json::json;
use std::collections::HashMap;
use wordgroup::ApiConfig;
use wordgroup::DatamuseClient;
use wordgroup::api::{
    AppState, ErrorResponse, GroupResponse, HealthResponse, SavedResponse, create_router,
};
use wordgroup_core::{Body, Page, Value};

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Canned `/words` endpoint: answers `rel_rhy=grape` and `ml=happy`,
/// everything else is an empty list.
async fn words_handler(
    Query(params): Query<HashMap<String, String>>,
) -> Json<serde_json::Value> {
    if params.get("rel_rhy").map(String::as_str) == Some("grape") {
        return Json(json!([
            {"word": "shape", "score": 900, "numSyllables": 1},
            {"word": "escape", "score": 800, "numSyllables": 2},
            {"word": "drape", "score": 700, "numSyllables": 1},
            {"word": "agape", "score": 600}
        ]));
    }
    if params.get("ml").map(String::as_str) == Some("happy") {
        return Json(json!([
            {"word": "glad", "score": 50},
            {"word": "cheerful", "score": 40}
        ]));
    }
    Json(json!([]))
}

/// Start the canned word API and return its base URL.
async fn spawn_word_api() -> String {
    let app = Router::new().route("/words", get(words_handler));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn test_server_for(base_url: String) -> TestServer {
    let config = ApiConfig {
        base_url,
        timeout_secs: 5,
        max_results: 100,
    };
    let client = DatamuseClient::new(&config).unwrap();
    TestServer::new(create_router(AppState::new(client))).unwrap()
}

async fn create_test_server() -> TestServer {
    test_server_for(spawn_word_api().await)
}

// =============================================================================
// HEALTH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// GROUP ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_group_by_team() {
    let server = create_test_server().await;

    let response = server
        .post("/group")
        .json(&json!({
            "items": [
                {"name": "Steve", "team": "blue"},
                {"name": "Jack", "team": "red"},
                {"name": "Carol", "team": "blue"}
            ],
            "by": "team"
        }))
        .await;

    response.assert_status_ok();
    let body: GroupResponse = response.json();
    assert_eq!(body.groups.len(), 2);
    assert_eq!(body.groups[0].key, Value::from("blue"));
    assert_eq!(body.groups[0].items.len(), 2);
    assert_eq!(
        body.groups[0].items[0].get("name"),
        Some(&Value::from("Steve"))
    );
    assert_eq!(
        body.groups[0].items[1].get("name"),
        Some(&Value::from("Carol"))
    );
    assert_eq!(body.groups[1].key, Value::from("red"));
}

#[tokio::test]
async fn test_group_numeric_keys_ascending() {
    let server = create_test_server().await;

    let response = server
        .post("/group")
        .json(&json!({
            "items": [{"n": 10}, {"n": 2}, {"n": 10}, {"n": -1}],
            "by": "n"
        }))
        .await;

    response.assert_status_ok();
    let body: GroupResponse = response.json();
    let keys: Vec<Value> = body.groups.iter().map(|g| g.key.clone()).collect();
    assert_eq!(keys, vec![Value::Int(-1), Value::Int(2), Value::Int(10)]);
}

#[tokio::test]
async fn test_group_empty_items() {
    let server = create_test_server().await;

    let response = server
        .post("/group")
        .json(&json!({"items": [], "by": "team"}))
        .await;

    response.assert_status_ok();
    let body: GroupResponse = response.json();
    assert!(body.groups.is_empty());
}

#[tokio::test]
async fn test_group_rejects_non_array() {
    let server = create_test_server().await;

    let response = server
        .post("/group")
        .json(&json!({"items": {"team": "blue"}, "by": "team"}))
        .await;

    response.assert_status_bad_request();
    let error: ErrorResponse = response.json();
    assert!(error.error.contains("array"));
}

#[tokio::test]
async fn test_group_rejects_mixed_key_kinds() {
    let server = create_test_server().await;

    let response = server
        .post("/group")
        .json(&json!({"items": [{"k": 1}, {"k": "one"}], "by": "k"}))
        .await;

    response.assert_status_bad_request();
    let error: ErrorResponse = response.json();
    assert!(error.error.contains("not mutually comparable"));
}

#[tokio::test]
async fn test_group_accepts_records_with_any_field_types() {
    let server = create_test_server().await;

    let response = server
        .post("/group")
        .json(&json!({
            "items": [
                {"name": "Steve", "team": "blue", "weight": 72.5},
                {"name": "Jack", "team": "red", "meta": {"x": 1}}
            ],
            "by": "team"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["groups"][0]["items"][0]["weight"], json!(72.5));
    assert_eq!(body["groups"][1]["items"][0]["meta"], json!({"x": 1}));
}

#[tokio::test]
async fn test_group_rejects_blank_field() {
    let server = create_test_server().await;

    let response = server
        .post("/group")
        .json(&json!({"items": [{"k": 1}], "by": "  "}))
        .await;

    response.assert_status_bad_request();
}

// =============================================================================
// LOOKUP ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_rhymes_sectioned_by_syllables() {
    let server = create_test_server().await;

    let response = server.get("/rhymes").add_query_param("word", "grape").await;

    response.assert_status_ok();
    let page: Page = response.json();
    assert_eq!(page.description, "Words that rhyme with grape:");
    let Body::Sections(sections) = page.body else {
        panic!("expected sections, got {:?}", page.body);
    };
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].heading, "Syllables: 1");
    assert_eq!(sections[0].words, vec!["shape", "drape"]);
    assert_eq!(sections[1].heading, "Syllables: 2");
    assert_eq!(sections[1].words, vec!["escape"]);
}

#[tokio::test]
async fn test_similar_keeps_api_order() {
    let server = create_test_server().await;

    let response = server.get("/similar").add_query_param("word", "happy").await;

    response.assert_status_ok();
    let page: Page = response.json();
    assert_eq!(page.description, "Words with a similar meaning to happy:");
    assert_eq!(
        page.body,
        Body::List(vec!["glad".to_string(), "cheerful".to_string()])
    );
}

#[tokio::test]
async fn test_lookup_without_results() {
    let server = create_test_server().await;

    let response = server.get("/rhymes").add_query_param("word", "orange").await;

    response.assert_status_ok();
    let page: Page = response.json();
    assert_eq!(page.body, Body::NoResults);
}

#[tokio::test]
async fn test_lookup_rejects_empty_word() {
    let server = create_test_server().await;

    let response = server.get("/rhymes").add_query_param("word", "   ").await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_lookup_unreachable_api_is_bad_gateway() {
    // Nothing listens on the discard port.
    let server = test_server_for("http://127.0.0.1:9".to_string());

    let response = server.get("/similar").add_query_param("word", "happy").await;

    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
    let error: ErrorResponse = response.json();
    assert!(!error.error.is_empty());
}

// =============================================================================
// SAVED WORDS ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_saved_starts_empty() {
    let server = create_test_server().await;

    let response = server.get("/saved").await;

    response.assert_status_ok();
    let saved: SavedResponse = response.json();
    assert!(saved.words.is_empty());
    assert_eq!(saved.summary, "(none)");
}

#[tokio::test]
async fn test_save_then_list() {
    let server = create_test_server().await;

    server
        .post("/saved")
        .json(&json!({"word": "shape"}))
        .await
        .assert_status_ok();
    let response = server.post("/saved").json(&json!({"word": " drape "})).await;
    response.assert_status_ok();

    let saved: SavedResponse = server.get("/saved").await.json();
    assert_eq!(saved.words, vec!["shape", "drape"]);
    assert_eq!(saved.summary, "shape, drape");
}

#[tokio::test]
async fn test_save_rejects_blank_word() {
    let server = create_test_server().await;

    let response = server.post("/saved").json(&json!({"word": ""})).await;

    response.assert_status_bad_request();
    let saved: SavedResponse = server.get("/saved").await.json();
    assert!(saved.words.is_empty());
}
