//! Integration tests for the chatbot completion fn.
//!
//! Uses wiremock for the chatbot endpoint. Covers the request shape, answer
//! extraction, and every transport failure that must fold into
//! `metadata.error` instead of an error.

use std::time::Duration;

use chateval_core::config::ChatbotConfig;
use chateval_core::providers::completion::{ChatBotCompletionFn, CompletionFn};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bot(mock_server: &MockServer, timeout_secs: u64) -> ChatBotCompletionFn {
    let cfg = ChatbotConfig {
        endpoint: format!("{}/get-course-info", mock_server.uri()),
        timeout_secs,
    };
    ChatBotCompletionFn::new(&cfg).expect("failed to create client")
}

#[tokio::test]
async fn test_posts_query_and_trims_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/get-course-info"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "query": "What is 2+2?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "  4\n" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let res = bot(&mock_server, 15).complete("What is 2+2?").await;
    assert_eq!(res.completion, "4");
    assert_eq!(res.metadata.error, None);
}

#[tokio::test]
async fn test_missing_response_field_is_empty_answer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "4" })))
        .mount(&mock_server)
        .await;

    let res = bot(&mock_server, 15).complete("What is 2+2?").await;
    assert_eq!(res.completion, "");
    assert!(!res.is_error());
}

#[tokio::test]
async fn test_server_error_is_captured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1) // no retry
        .mount(&mock_server)
        .await;

    let res = bot(&mock_server, 15).complete("hello").await;
    let err = res.metadata.error.as_deref().expect("error captured");
    assert!(err.contains("503"), "status should be described: {err}");
    assert!(res.completion.starts_with("Error: "));
}

#[tokio::test]
async fn test_client_error_is_captured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let res = bot(&mock_server, 15).complete("hello").await;
    assert!(res.is_error());
    assert!(res.completion.contains("404"));
}

#[tokio::test]
async fn test_non_json_body_is_captured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let res = bot(&mock_server, 15).complete("hello").await;
    assert!(res.is_error());
    assert!(res.completion.starts_with("Error: "));
}

#[tokio::test]
async fn test_timeout_is_bounded_and_captured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "late" }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let started = std::time::Instant::now();
    let res = bot(&mock_server, 1).complete("hello").await;
    assert!(started.elapsed() < Duration::from_secs(4));
    assert!(res.is_error());
    assert!(res.completion.contains("Error:"));
}
