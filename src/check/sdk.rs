//! Key check through the typed OpenAI client.
//!
//! Failures are reported with the error's own description. The binary maps
//! the result to exit status 0/1 so it can be used from scripts.

use super::{
    report_common_models, report_completed, resolve_api_key, Reporter, PROBE_MAX_TOKENS,
    PROBE_TEMPERATURE,
};
use crate::config::CheckSettings;
use crate::error::CheckError;
use crate::logging::log_info;
use crate::openai::{ChatMessage, ChatRequest, OpenAIApi, OpenAIClient};
use std::io::Write;

pub const PROBE_PROMPT: &str = "Hello, this is a test message.";

const KEY_PREVIEW_LEN: usize = 10;

/// The fixed chat completion used to prove connectivity.
pub fn probe_request(model: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::user(PROBE_PROMPT)],
        max_tokens: PROBE_MAX_TOKENS,
        temperature: PROBE_TEMPERATURE,
    }
}

/// Run the full check against the API described by `settings`.
pub async fn run<W: Write>(settings: &CheckSettings, report: &mut Reporter<W>) -> bool {
    report.probe("Testing OpenAI API Key...");

    if resolve_api_key(settings, KEY_PREVIEW_LEN, report).is_none() {
        return false;
    }

    let client = match OpenAIClient::new(settings) {
        Ok(client) => client,
        Err(e) => {
            report.fail(format_args!("API connection failed: {e}"));
            return false;
        }
    };
    report.ok("OpenAI client initialized");

    run_with_client(&client, settings, report).await
}

/// Network part of the check, for any [`OpenAIApi`] implementation.
pub async fn run_with_client<A, W>(
    api: &A,
    settings: &CheckSettings,
    report: &mut Reporter<W>,
) -> bool
where
    A: OpenAIApi + ?Sized,
    W: Write,
{
    report.progress("Testing API connection...");

    let request = probe_request(&settings.model);
    match api.create_chat_completion(&request).await {
        Ok(response) => match response.first_content() {
            Some(content) => {
                report.ok("API connection successful!");
                report.ok(format_args!("Response received: {content}"));
            }
            None => {
                report.fail(CheckError::empty_response());
                return false;
            }
        },
        Err(CheckError::EmptyResponse) => {
            report.fail(CheckError::EmptyResponse);
            return false;
        }
        Err(e) => {
            log_info!(status = ?e.status_code(), "Chat completion failed");
            report.fail(format_args!("API connection failed: {e}"));
            return false;
        }
    }

    // Connectivity is proven at this point; the listing only adds detail.
    report.progress("Testing model list access...");
    match api.list_models().await {
        Ok(models) => {
            report.ok(format_args!(
                "Available models: {} models found",
                models.data.len()
            ));
            report_common_models(models.ids(), report);
        }
        Err(e) => {
            report.warn(format_args!("Model list access failed: {e}"));
            report.line("This is not critical - your API key is working!");
        }
    }

    log_info!(model = %settings.model, "OpenAI key check passed");
    report_completed(report);
    true
}
