use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use measureminds::comparison::{comparison_prompt, ComparisonError, ComparisonProvider, OpenAiClient};
use measureminds::config::ComparisonConfig;
use measureminds::conversion::convert;
use measureminds::tools::converter::{compare_measurement, COMPARISON_FAILED_MESSAGE};

fn client_for(server: &MockServer) -> OpenAiClient {
    let config = ComparisonConfig {
        api_key: Some("test-key".to_string()),
        model: "gpt-3.5-turbo".to_string(),
        base_url: format!("{}/v1", server.base_url()),
        timeout: Duration::from_secs(5),
    };
    OpenAiClient::new(&config).unwrap()
}

fn chat_response(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 30, "completion_tokens": 12, "total_tokens": 42 }
    })
}

#[tokio::test]
async fn test_compare_sends_prompt_and_returns_text() {
    let server = MockServer::start_async().await;
    let conversion = convert("length", "meters", "feet", "10").unwrap();
    let prompt = comparison_prompt(&conversion);

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer test-key")
                .json_body(json!({
                    "model": "gpt-3.5-turbo",
                    "messages": [{ "role": "user", "content": prompt.clone() }],
                    "max_tokens": 50
                }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(chat_response(" A giraffe is about 18 feet tall. "));
        })
        .await;

    let client = client_for(&server);
    let text = client.compare(&prompt).await.unwrap();

    mock.assert_async().await;
    assert_eq!(text, "A giraffe is about 18 feet tall.");
}

#[tokio::test]
async fn test_compare_reports_api_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(429)
                .header("content-type", "application/json")
                .json_body(json!({
                    "error": { "message": "Rate limit reached", "type": "requests" }
                }));
        })
        .await;

    let err = client_for(&server).compare("prompt").await.unwrap_err();
    match err {
        ComparisonError::Api { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Rate limit reached");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_compare_rejects_empty_choices() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "choices": [] }));
        })
        .await;

    let err = client_for(&server).compare("prompt").await.unwrap_err();
    assert!(matches!(err, ComparisonError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_tool_keeps_conversion_when_service_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(500).body("internal error");
        })
        .await;

    let client = client_for(&server);
    let response = compare_measurement(Some(&client), "temperature", "Celsius", "Fahrenheit", "100").await;

    assert!(response.result.ok);
    assert_eq!(response.result.conversion.as_ref().unwrap().display, "212.00");
    assert_eq!(response.comparison_error.as_deref(), Some(COMPARISON_FAILED_MESSAGE));
}

#[tokio::test]
async fn test_tool_returns_comparison() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(chat_response("That's about the weight of a small dog."));
        })
        .await;

    let client = client_for(&server);
    let response = compare_measurement(Some(&client), "weight", "kilograms", "pounds", "5").await;

    assert_eq!(
        response.comparison.as_deref(),
        Some("That's about the weight of a small dog.")
    );
    assert_eq!(response.disclaimer, Some("AI can make mistakes."));
}
