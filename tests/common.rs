//! Test helper utilities for openai-keycheck integration tests
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use openai_keycheck::CheckSettings;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const VALID_TEST_KEY: &str = "sk-test-1234567890abcdef";

/// Settings aimed at a mock server, with short timeouts.
pub fn settings_for(server: &MockServer, api_key: Option<&str>) -> CheckSettings {
    CheckSettings {
        api_key: api_key.map(str::to_string),
        base_url: server.uri(),
        completion_timeout: Duration::from_secs(2),
        models_timeout: Duration::from_secs(2),
        ..CheckSettings::default()
    }
}

pub fn chat_completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-3.5-turbo-0125",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "length"
        }],
        "usage": {
            "prompt_tokens": 12,
            "completion_tokens": 3,
            "total_tokens": 15
        }
    })
}

pub fn models_body(ids: &[&str]) -> serde_json::Value {
    let data: Vec<_> = ids
        .iter()
        .map(|id| serde_json::json!({"id": id, "object": "model", "owned_by": "openai"}))
        .collect();
    serde_json::json!({"object": "list", "data": data})
}

pub fn openai_error_body(message: &str, code: &str) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "message": message,
            "type": "invalid_request_error",
            "param": null,
            "code": code
        }
    })
}

pub async fn mount_completion(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(template)
        .mount(server)
        .await;
}

pub async fn mount_models(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Fail the test (on server drop) if any request reaches `server`.
pub async fn expect_no_requests(server: &MockServer) {
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}
