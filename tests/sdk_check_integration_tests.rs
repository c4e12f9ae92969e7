//! Integration Tests for the client-library key check
//!
//! UNIT UNDER TEST: check::sdk::run against a mock OpenAI server
//!
//! BUSINESS RESPONSIBILITY:
//!   - Fails fast, without network traffic, on missing or malformed keys
//!   - Passes when the chat completion succeeds, whatever the model listing does
//!   - Describes API failures in terms an operator can act on
//!
//! TEST COVERAGE:
//!   - Missing key, malformed key (zero requests)
//!   - 200 with content, 401, 429
//!   - Model listing failure and timeout after a successful completion

mod common;

use common::*;
use openai_keycheck::check::sdk;
use openai_keycheck::Reporter;
use std::time::Duration;
use wiremock::{MockServer, ResponseTemplate};

#[tokio::test]
async fn test_missing_key_fails_without_network() {
    let server = MockServer::start().await;
    expect_no_requests(&server).await;
    let mut report = Reporter::buffered();

    let passed = sdk::run(&settings_for(&server, None), &mut report).await;

    assert!(!passed);
    let output = report.output();
    assert!(output.starts_with("🔍 Testing OpenAI API Key..."));
    assert!(output.contains("❌ OPENAI_API_KEY not found"));
    assert!(output.contains("Please set your OpenAI API key:"));
}

#[tokio::test]
async fn test_malformed_key_fails_without_network() {
    let server = MockServer::start().await;
    expect_no_requests(&server).await;
    let mut report = Reporter::buffered();

    let passed = sdk::run(&settings_for(&server, Some("abc123")), &mut report).await;

    assert!(!passed);
    assert!(report
        .output()
        .contains("❌ API key format appears invalid (should start with 'sk-')"));
}

#[tokio::test]
async fn test_success_surfaces_response_content() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        ResponseTemplate::new(200).set_body_json(chat_completion_body("Hello")),
    )
    .await;
    mount_models(
        &server,
        ResponseTemplate::new(200).set_body_json(models_body(&[
            "gpt-4",
            "text-embedding-ada-002",
            "gpt-3.5-turbo-0125",
        ])),
    )
    .await;
    let mut report = Reporter::buffered();

    let passed = sdk::run(&settings_for(&server, Some(VALID_TEST_KEY)), &mut report).await;

    assert!(passed);
    let output = report.output();
    assert!(output.contains("✅ API key found: sk-test-12..."));
    assert!(output.contains("✅ OpenAI client initialized"));
    assert!(output.contains("✅ Response received: Hello"));
    assert!(output.contains("✅ Available models: 3 models found"));
    assert!(output.contains("✅ Common models available: gpt-4, gpt-3.5-turbo-0125"));
    assert!(output.contains("🎉 OpenAI API test completed successfully!"));
    assert!(!output.contains(VALID_TEST_KEY), "full key must never be printed");
}

#[tokio::test]
async fn test_unauthorized_reports_invalid_key() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        ResponseTemplate::new(401)
            .set_body_json(openai_error_body("Incorrect API key provided", "invalid_api_key")),
    )
    .await;
    let mut report = Reporter::buffered();

    let passed = sdk::run(&settings_for(&server, Some(VALID_TEST_KEY)), &mut report).await;

    assert!(!passed);
    let output = report.output();
    assert!(output.contains("❌ API connection failed: Error code: 401"));
    assert!(output.contains("Invalid API key"));
}

#[tokio::test]
async fn test_rate_limited_reports_quota() {
    let server = MockServer::start().await;
    mount_completion(&server, ResponseTemplate::new(429)).await;
    let mut report = Reporter::buffered();

    let passed = sdk::run(&settings_for(&server, Some(VALID_TEST_KEY)), &mut report).await;

    assert!(!passed);
    assert!(report
        .output()
        .contains("Rate limit exceeded or out of credits"));
}

#[tokio::test]
async fn test_model_list_failure_still_passes() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        ResponseTemplate::new(200).set_body_json(chat_completion_body("Hello")),
    )
    .await;
    mount_models(&server, ResponseTemplate::new(500).set_body_string("oops")).await;
    let mut report = Reporter::buffered();

    let passed = sdk::run(&settings_for(&server, Some(VALID_TEST_KEY)), &mut report).await;

    assert!(passed);
    let output = report.output();
    assert!(output.contains("⚠️  Model list access failed: Error code: 500 - oops"));
    assert!(output.contains("This is not critical - your API key is working!"));
}

#[tokio::test]
async fn test_model_list_timeout_still_passes() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        ResponseTemplate::new(200).set_body_json(chat_completion_body("Hello")),
    )
    .await;
    mount_models(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(models_body(&["gpt-4"]))
            .set_delay(Duration::from_secs(3)),
    )
    .await;
    let mut settings = settings_for(&server, Some(VALID_TEST_KEY));
    settings.models_timeout = Duration::from_secs(1);
    let mut report = Reporter::buffered();

    let passed = sdk::run(&settings, &mut report).await;

    assert!(passed);
    assert!(report
        .output()
        .contains("⚠️  Model list access failed: Request timed out after 1s"));
}
