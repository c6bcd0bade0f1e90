use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use challenge_bot::category::ChallengeCategory;
use challenge_bot::gemini::GeminiClient;
use challenge_bot::web_server::{build_router, AppState};
use challenge_bot::{library, FALLBACK_MESSAGE, WELCOME_MESSAGE};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_server(gemini: &MockServer) -> TestServer {
    let client = GeminiClient::new(format!("{}/generate", gemini.uri()), "test-key".to_string());
    let state = AppState::new(client).unwrap();
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn chat_turn_appends_user_and_assistant_entries() {
    let gemini = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "Do 30 squats today!"}]}}]
        })))
        .mount(&gemini)
        .await;
    let server = test_server(&gemini);

    let response = server
        .post("/api/chat")
        .json(&json!({"message": "I need a workout"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["reply"], "Do 30 squats today!");
    assert_eq!(body["category"], "fitness");

    let history: Value = server.get("/api/history").await.json();
    let entries = history["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3); // welcome + user + assistant
    assert_eq!(entries[0]["text"], WELCOME_MESSAGE);
    assert_eq!(entries[0]["origin"], "assistant");
    assert_eq!(entries[1]["text"], "I need a workout");
    assert_eq!(entries[1]["origin"], "user");
    assert_eq!(entries[2]["text"], "Do 30 squats today!");
    assert_eq!(entries[2]["origin"], "assistant");
}

#[tokio::test]
async fn failed_turn_appends_the_fixed_fallback_line() {
    let gemini = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&gemini)
        .await;
    let server = test_server(&gemini);

    let response = server
        .post("/api/chat")
        .json(&json!({"message": "I need a workout"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["reply"], FALLBACK_MESSAGE);
    assert_eq!(body["error"], "Failed to generate challenge. Please try again.");

    let history: Value = server.get("/api/history").await.json();
    let entries = history["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2]["text"], FALLBACK_MESSAGE);
    assert_eq!(entries[2]["origin"], "assistant");
}

#[tokio::test]
async fn rate_limited_turn_maps_to_429() {
    let gemini = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&gemini)
        .await;
    let server = test_server(&gemini);

    let response = server
        .post("/api/chat")
        .json(&json!({"message": "meditate"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn empty_message_is_rejected_without_touching_the_transcript() {
    let gemini = MockServer::start().await;
    let server = test_server(&gemini);

    let response = server.post("/api/chat").json(&json!({"message": "   "})).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let history: Value = server.get("/api/history").await.json();
    assert_eq!(history["entries"].as_array().unwrap().len(), 1); // welcome only
}

#[tokio::test]
async fn concurrent_turns_are_rejected_while_one_is_pending() {
    let gemini = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({
                    "candidates": [{"content": {"parts": [{"text": "Stretch for 10 minutes."}]}}]
                })),
        )
        .mount(&gemini)
        .await;
    let server = test_server(&gemini);

    let (first, second) = tokio::join!(
        server.post("/api/chat").json(&json!({"message": "relax"})),
        server.post("/api/chat").json(&json!({"message": "relax"})),
    );

    let mut statuses = [first.status_code(), second.status_code()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);

    // The rejected turn left no trace: exactly one user/assistant pair.
    let history: Value = server.get("/api/history").await.json();
    assert_eq!(history["entries"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn daily_challenge_is_stable_within_a_day() {
    let gemini = MockServer::start().await;
    let server = test_server(&gemini);

    let first: Value = server.get("/api/daily").await.json();
    let second: Value = server.get("/api/daily").await.json();
    assert_eq!(first, second);
    assert!(!first["challenge"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn category_challenge_comes_from_the_library() {
    let gemini = MockServer::start().await;
    let server = test_server(&gemini);

    let body: Value = server.get("/api/challenge/fitness").await.json();
    let challenge = body["challenge"].as_str().unwrap();
    let fitness = library::challenges_for(ChallengeCategory::Fitness).unwrap();
    assert!(fitness.contains(&challenge));
}

#[tokio::test]
async fn unknown_category_returns_the_invalid_category_message() {
    let gemini = MockServer::start().await;
    let server = test_server(&gemini);

    let body: Value = server.get("/api/challenge/cooking").await.json();
    assert_eq!(body["challenge"], "Invalid category selected.");
}
