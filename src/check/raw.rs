//! Key check with hand-built HTTP requests.
//!
//! Headers and JSON bodies are assembled directly, and failures are reported
//! by status code. Meant for manual runs: the binary waits for Enter and exits
//! 0 whatever the outcome.

use super::{
    report_common_models, report_completed, resolve_api_key, Reporter, PROBE_MAX_TOKENS,
    PROBE_TEMPERATURE,
};
use crate::config::CheckSettings;
use crate::error::CheckError;
use crate::logging::{log_debug, log_info};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};
use std::io::Write;
use std::time::Duration;

pub const PROBE_PROMPT: &str = "Say hello";

pub const BANNER_TITLE: &str = "OpenAI API Key Test (raw HTTP)";

const KEY_PREVIEW_LEN: usize = 15;

/// The fixed chat completion body used to prove connectivity.
pub fn probe_body(model: &str) -> Value {
    json!({
        "model": model,
        "messages": [
            {
                "role": "user",
                "content": PROBE_PROMPT
            }
        ],
        "max_tokens": PROBE_MAX_TOKENS,
        "temperature": PROBE_TEMPERATURE
    })
}

/// Run the full check against the API described by `settings`.
pub async fn run<W: Write>(settings: &CheckSettings, report: &mut Reporter<W>) -> bool {
    report.banner(BANNER_TITLE);
    report.probe("Testing OpenAI API Key...");

    let Some(api_key) = resolve_api_key(settings, KEY_PREVIEW_LEN, report) else {
        return false;
    };
    let bearer = format!("Bearer {api_key}");
    let client = reqwest::Client::new();

    report.progress("Testing API connection...");
    report.line("Making API request...");

    let result = client
        .post(settings.chat_completions_url())
        .header(AUTHORIZATION, bearer.as_str())
        .header(CONTENT_TYPE, "application/json")
        .json(&probe_body(&settings.model))
        .timeout(settings.completion_timeout)
        .send()
        .await;

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            let err = CheckError::from_transport(e, settings.completion_timeout);
            report.fail(format_args!("API connection failed: {err}"));
            return false;
        }
    };

    let status = response.status();
    log_debug!(status = %status, "Chat completion status");

    if !status.is_success() {
        report.fail(format_args!(
            "API request failed with status: {}",
            status.as_u16()
        ));
        match status.as_u16() {
            401 => report.line("Error 401: Invalid API key"),
            429 => report.line("Error 429: Rate limit or out of credits"),
            _ => {
                let body = response.text().await.unwrap_or_default();
                report.line(format_args!("Response: {body}"));
            }
        }
        return false;
    }

    let body: Value = match response.json().await {
        Ok(body) => body,
        Err(e) => {
            let err = body_error(e, settings.completion_timeout);
            report.fail(format_args!("API connection failed: {err}"));
            return false;
        }
    };

    match first_message_content(&body) {
        Some(message) => {
            report.ok("SUCCESS! OpenAI API is working!");
            report.ok(format_args!("Response: {message}"));
        }
        None => {
            report.fail("FAILED: No response received");
            return false;
        }
    }

    report.progress("Testing model list access...");

    let result = client
        .get(settings.models_url())
        .header(AUTHORIZATION, bearer.as_str())
        .header(CONTENT_TYPE, "application/json")
        .timeout(settings.models_timeout)
        .send()
        .await;

    match result {
        Ok(response) if response.status().is_success() => match response.json::<Value>().await {
            Ok(models) => report_models(&models, report),
            Err(e) => {
                let err = body_error(e, settings.models_timeout);
                report.warn(format_args!("Model list access failed: {err}"));
            }
        },
        Ok(response) => {
            report.warn(format_args!(
                "Model list access failed: {}",
                response.status().as_u16()
            ));
        }
        Err(e) => {
            let err = CheckError::from_transport(e, settings.models_timeout);
            report.warn(format_args!("Model list access failed: {err}"));
            report.line("This is not critical - your API key is working!");
        }
    }

    log_info!(model = %settings.model, "OpenAI key check passed");
    report_completed(report);
    true
}

/// Classify a failure while reading a 2xx body.
///
/// The per-call timeout also covers the body, so a stall there is still a
/// timeout rather than a decoding problem.
fn body_error(err: reqwest::Error, timeout: Duration) -> CheckError {
    if err.is_timeout() {
        return CheckError::from_transport(err, timeout);
    }
    CheckError::response_parsing_error(err.to_string())
}

/// `choices[0].message.content`, when `choices` is a non-empty array.
///
/// A choice without string content still counts as a response.
fn first_message_content(body: &Value) -> Option<&str> {
    let first = body.get("choices")?.as_array()?.first()?;
    Some(
        first
            .pointer("/message/content")
            .and_then(Value::as_str)
            .unwrap_or_default(),
    )
}

fn report_models<W: Write>(models: &Value, report: &mut Reporter<W>) {
    let Some(data) = models.get("data").and_then(Value::as_array) else {
        return;
    };
    if data.is_empty() {
        return;
    }

    report.ok(format_args!("Available models: {} models found", data.len()));
    let ids = data
        .iter()
        .map(|model| model.get("id").and_then(Value::as_str).unwrap_or_default());
    report_common_models(ids, report);
}
