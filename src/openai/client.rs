//! HTTP client for the OpenAI endpoints used by the checks
//!
//! One attempt per call: no retries, no backoff. Each call carries its own
//! timeout taken from [`CheckSettings`].

use super::types::{ChatRequest, ChatResponse, ModelList};
use crate::config::CheckSettings;
use crate::error::{CheckError, CheckResult};
use crate::logging::{log_debug, log_error};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

/// The two API calls a key check makes.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait OpenAIApi: Send + Sync {
    /// `POST /v1/chat/completions`
    async fn create_chat_completion(&self, request: &ChatRequest) -> CheckResult<ChatResponse>;

    /// `GET /v1/models`
    async fn list_models(&self) -> CheckResult<ModelList>;
}

/// Build the bearer auth and JSON content-type headers.
///
/// Fails when the key contains bytes that are not valid in a header value.
pub fn build_auth_headers(api_key: &str) -> CheckResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
        CheckError::configuration_error(format!("Invalid API key format: {e}"))
    })?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);

    Ok(headers)
}

/// reqwest-backed [`OpenAIApi`]
#[derive(Debug)]
pub struct OpenAIClient {
    client: reqwest::Client,
    headers: HeaderMap,
    chat_url: String,
    models_url: String,
    completion_timeout: Duration,
    models_timeout: Duration,
}

impl OpenAIClient {
    /// Create a client for the key and API root in `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::MissingApiKey`] when no key is configured and
    /// [`CheckError::ConfigurationError`] when the key can't be sent as a
    /// header.
    pub fn new(settings: &CheckSettings) -> CheckResult<Self> {
        let api_key = settings
            .api_key
            .as_deref()
            .ok_or_else(CheckError::missing_api_key)?;
        let headers = build_auth_headers(api_key)?;

        log_debug!(
            base_url = %settings.base_url,
            completion_timeout_secs = settings.completion_timeout.as_secs(),
            models_timeout_secs = settings.models_timeout.as_secs(),
            "Creating OpenAI client"
        );

        Ok(Self {
            client: reqwest::Client::new(),
            headers,
            chat_url: settings.chat_completions_url(),
            models_url: settings.models_url(),
            completion_timeout: settings.completion_timeout,
            models_timeout: settings.models_timeout,
        })
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
        timeout: Duration,
    ) -> CheckResult<reqwest::Response> {
        let start = Instant::now();
        let response = request
            .headers(self.headers.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                log_error!(url = %url, error = %e, "HTTP request failed");
                CheckError::from_transport(e, timeout)
            })?;

        log_debug!(
            url = %url,
            status = %response.status(),
            duration_ms = start.elapsed().as_millis() as u64,
            "OpenAI response received"
        );

        if !response.status().is_success() {
            return Err(handle_error_response(response).await);
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl OpenAIApi for OpenAIClient {
    async fn create_chat_completion(&self, request: &ChatRequest) -> CheckResult<ChatResponse> {
        log_debug!(
            model = %request.model,
            message_count = request.messages.len(),
            max_tokens = request.max_tokens,
            "Sending chat completion"
        );

        let builder = self.client.post(&self.chat_url).json(request);
        let response = self
            .send(builder, &self.chat_url, self.completion_timeout)
            .await?;
        let parsed: ChatResponse = parse_success_response(response, self.completion_timeout).await?;

        if let Some(usage) = &parsed.usage {
            log_debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Chat completion usage"
            );
        }

        if parsed.choices.is_empty() {
            return Err(CheckError::empty_response());
        }
        Ok(parsed)
    }

    async fn list_models(&self) -> CheckResult<ModelList> {
        let builder = self.client.get(&self.models_url);
        let response = self
            .send(builder, &self.models_url, self.models_timeout)
            .await?;
        parse_success_response(response, self.models_timeout).await
    }
}

/// Map a non-success response to a [`CheckError`]
async fn handle_error_response(response: reqwest::Response) -> CheckError {
    let status = response.status();
    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok());
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    match status.as_u16() {
        401 => {
            let message = match api_error_message(&error_text) {
                Some(detail) => format!("Invalid API key or authentication failed ({detail})"),
                None => "Invalid API key or authentication failed".to_string(),
            };
            CheckError::authentication_failed(message)
        }
        429 => CheckError::rate_limit_exceeded(retry_after.unwrap_or(60)),
        code => CheckError::api_error(code, error_text),
    }
}

/// `error.message` from an OpenAI error body
fn api_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

async fn parse_success_response<T: DeserializeOwned>(
    response: reqwest::Response,
    timeout: Duration,
) -> CheckResult<T> {
    let raw_body = response
        .text()
        .await
        .map_err(|e| CheckError::from_transport(e, timeout))?;

    serde_json::from_str(&raw_body).map_err(|e| {
        log_error!(error = %e, raw_body = %raw_body, "Failed to parse response");
        CheckError::response_parsing_error(format!("Invalid response: {e}"))
    })
}
