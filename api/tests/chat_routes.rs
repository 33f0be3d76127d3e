mod common;

use axum::http::StatusCode;
use common::{Delegates, completion};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_groq_forwards_message_verbatim() {
    let delegates = Delegates::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(header("Authorization", "Bearer groq_key"))
        .and(body_partial_json(json!({
            "model": "llama3-8b-8192",
            "messages": [{ "role": "user", "content": "Is oatmeal good for diabetics?" }]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("Yes, in moderation. Prefer `steel-cut` oats.")),
        )
        .expect(1)
        .mount(&delegates.llm)
        .await;
    let server = delegates.server().await;

    let response = server
        .post("/api/groq")
        .json(&json!({ "message": "Is oatmeal good for diabetics?" }))
        .await;

    response.assert_status(StatusCode::OK);
    response.assert_json(&json!({ "response": "Yes, in moderation. Prefer `steel-cut` oats." }));
}

#[tokio::test]
async fn test_groq_delegate_error_is_passed_through() {
    let delegates = Delegates::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": "Invalid API Key",
                "type": "invalid_request_error",
                "code": "invalid_api_key"
            }
        })))
        .mount(&delegates.llm)
        .await;
    let server = delegates.server().await;

    let response = server
        .post("/api/groq")
        .json(&json!({ "message": "hello" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "error": "LLM API returned error: 401 Unauthorized - Invalid API Key"
    }));
}

#[tokio::test]
async fn test_groq_rejects_blank_and_malformed_bodies() {
    let delegates = Delegates::start().await;
    let server = delegates.server().await;

    let blank = server
        .post("/api/groq")
        .json(&json!({ "message": "   " }))
        .await;
    blank.assert_status(StatusCode::BAD_REQUEST);
    blank.assert_json(&json!({ "error": "message is required" }));

    let missing = server.post("/api/groq").json(&json!({ "text": "hi" })).await;
    missing.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = missing.json();
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));

    let not_json = server.post("/api/groq").text("message=hi").await;
    not_json.assert_status(StatusCode::BAD_REQUEST);

    assert!(delegates.llm.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_health_and_docs_are_served() {
    let delegates = Delegates::start().await;
    let server = delegates.server().await;

    let health = server.get("/health").await;
    health.assert_status(StatusCode::OK);
    health.assert_json(&json!({ "status": "ok" }));

    let openapi = server.get("/api-docs/openapi.json").await;
    openapi.assert_status(StatusCode::OK);
    let doc: Value = openapi.json();
    for route in ["/extract", "/extract_nutrition_label", "/api/groq", "/health"] {
        assert!(doc["paths"].get(route).is_some(), "{} is documented", route);
    }

    server.get("/metrics").await.assert_status(StatusCode::OK);
}
