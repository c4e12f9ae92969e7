//! Error types for key checks.
//!
//! Every failure ends up as a line of text for the operator, so each
//! variant's `Display` output is meant to be printed as-is after
//! `❌ API connection failed: `.
//!
//! # Fatal vs informational
//!
//! A failure on the chat completion ends the run. A failure on the model
//! listing is only a warning. [`CheckError::is_fatal`] reports which errors
//! can never be downgraded (missing or malformed keys); the caller decides for
//! network errors based on which step raised them.
//!
//! ```rust
//! use openai_keycheck::{CheckError, CheckResult};
//!
//! fn require_key(key: Option<String>) -> CheckResult<String> {
//!     key.ok_or_else(CheckError::missing_api_key)
//! }
//!
//! assert!(require_key(None).is_err());
//! ```

use crate::logging::{log_debug, log_error, log_warn};
use std::time::Duration;
use thiserror::Error;

/// Convenient result type for key check operations.
pub type CheckResult<T> = std::result::Result<T, CheckError>;

/// Errors that can occur while checking an API key.
///
/// | Variant | Raised by | Fatal |
/// |---------|-----------|-------|
/// | `MissingApiKey` | configuration | Yes |
/// | `InvalidKeyFormat` | local shape check | Yes |
/// | `ConfigurationError` | client setup | Yes |
/// | `RequestFailed` | transport | depends on step |
/// | `Timeout` | transport | depends on step |
/// | `AuthenticationFailed` | HTTP 401 | depends on step |
/// | `RateLimitExceeded` | HTTP 429 | depends on step |
/// | `ApiError` | other non-2xx | depends on step |
/// | `ResponseParsingError` | body decoding | depends on step |
/// | `EmptyResponse` | 2xx without choices | depends on step |
#[derive(Error, Debug)]
pub enum CheckError {
    /// `OPENAI_API_KEY` is not set in the environment or the `.env` file.
    #[error("OPENAI_API_KEY not found")]
    MissingApiKey,

    /// The key does not start with the expected `sk-` prefix.
    #[error("API key format appears invalid (should start with '{expected_prefix}')")]
    InvalidKeyFormat {
        /// The prefix every well-formed key carries.
        expected_prefix: &'static str,
    },

    /// The client could not be built from the supplied settings.
    #[error("Client configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The HTTP request could not be completed.
    #[error("Request failed: {message}")]
    RequestFailed {
        /// Description of the failure.
        message: String,
        /// The underlying transport error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The server did not answer within the per-call timeout.
    #[error("Request timed out after {timeout:?}")]
    Timeout {
        /// The timeout that was exceeded.
        timeout: Duration,
    },

    /// HTTP 401 from the API.
    #[error("Error code: 401 - {message}")]
    AuthenticationFailed {
        /// Details about the authentication failure.
        message: String,
    },

    /// HTTP 429 from the API. OpenAI also uses this status for exhausted quota.
    #[error("Error code: 429 - Rate limit exceeded or out of credits, retry after {retry_after_seconds}s")]
    RateLimitExceeded {
        /// Value of the `retry-after` header, or 60 when absent.
        retry_after_seconds: u64,
    },

    /// Any other non-success status.
    #[error("Error code: {status} - {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A 2xx response whose body could not be decoded.
    #[error("Response parsing failed: {message}")]
    ResponseParsingError {
        /// Details about the parsing failure.
        message: String,
    },

    /// A 2xx chat completion with an empty `choices` list.
    #[error("No response received from API")]
    EmptyResponse,
}

impl CheckError {
    /// Whether this error always ends the run, regardless of which step hit it.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey | Self::InvalidKeyFormat { .. } | Self::ConfigurationError { .. }
        )
    }

    /// HTTP status carried by this error, if it came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::AuthenticationFailed { .. } => Some(401),
            Self::RateLimitExceeded { .. } => Some(429),
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    pub fn missing_api_key() -> Self {
        log_warn!(error_type = "missing_api_key", "OPENAI_API_KEY is not set");
        Self::MissingApiKey
    }

    pub fn invalid_key_format(expected_prefix: &'static str) -> Self {
        log_warn!(
            error_type = "invalid_key_format",
            expected_prefix = expected_prefix,
            "API key failed the local shape check"
        );
        Self::InvalidKeyFormat { expected_prefix }
    }

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Client configuration invalid"
        );
        Self::ConfigurationError { message }
    }

    pub fn request_failed(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "request_failed",
            message = %message,
            has_source = source.is_some(),
            "OpenAI request failed"
        );
        Self::RequestFailed { message, source }
    }

    pub fn timeout(timeout: Duration) -> Self {
        log_warn!(
            error_type = "timeout",
            timeout_ms = timeout.as_millis() as u64,
            "OpenAI request timed out"
        );
        Self::Timeout { timeout }
    }

    pub fn authentication_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "authentication_failed",
            message = %message,
            "OpenAI authentication failed"
        );
        Self::AuthenticationFailed { message }
    }

    pub fn rate_limit_exceeded(retry_after_seconds: u64) -> Self {
        log_warn!(
            error_type = "rate_limit_exceeded",
            retry_after_seconds = retry_after_seconds,
            "OpenAI rate limit or quota exceeded"
        );
        Self::RateLimitExceeded {
            retry_after_seconds,
        }
    }

    pub fn api_error(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        log_error!(
            error_type = "api_error",
            status = status,
            body = %body,
            "OpenAI API returned an error status"
        );
        Self::ApiError { status, body }
    }

    pub fn response_parsing_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "response_parsing_error",
            message = %message,
            "OpenAI response format invalid"
        );
        Self::ResponseParsingError { message }
    }

    pub fn empty_response() -> Self {
        log_debug!(error_type = "empty_response", "Chat completion had no choices");
        Self::EmptyResponse
    }
}

impl CheckError {
    /// Classify a reqwest failure for a call made with `timeout`.
    ///
    /// Timeouts keep their own variant so the report can say so; everything
    /// else is a transport failure.
    pub fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            return Self::timeout(timeout);
        }
        Self::request_failed(err.to_string(), Some(Box::new(err)))
    }
}
