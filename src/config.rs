//! Configuration loading for the key checks.
//!
//! Values come from the process environment, optionally seeded from a local
//! dotenv-style file. The file format is minimal: `KEY=VALUE` lines, `#`
//! comments, blank lines ignored, no quoting or escaping, and the first `=`
//! delimits. Variables already present in the environment always win over
//! the file.

use crate::logging::{log_debug, log_info};
use std::path::Path;
use std::time::Duration;

/// Dotenv file read by [`load_env_file`], relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const OPENAI_BASE_URL_VAR: &str = "OPENAI_BASE_URL";
pub const ANYTHINGLLM_API_KEY_VAR: &str = "ANYTHINGLLM_API_KEY";
pub const ANYTHINGLLM_BASE_URL_VAR: &str = "ANYTHINGLLM_BASE_URL";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_ANYTHINGLLM_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_CHECK_MODEL: &str = "gpt-3.5-turbo";

/// Split one dotenv line into a trimmed `(key, value)` pair.
///
/// Returns `None` for blank lines, `#` comments, lines without `=`, and lines
/// whose key or value could not be stored in the process environment.
pub fn parse_env_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once('=')?;
    let (key, value) = (key.trim(), value.trim());

    if key.is_empty() || key.contains('\0') || value.contains('\0') {
        return None;
    }

    Some((key, value))
}

/// Load [`DEFAULT_ENV_FILE`] into the process environment.
///
/// See [`load_env_from`]. Returns the number of variables that were set.
pub fn load_env_file() -> usize {
    load_env_from(DEFAULT_ENV_FILE)
}

/// Load a dotenv file into the process environment.
///
/// Only variables that are not already defined are set, so calling this
/// repeatedly is harmless and the surrounding environment always takes
/// precedence. A missing or unreadable file is a no-op.
pub fn load_env_from(path: impl AsRef<Path>) -> usize {
    let path = path.as_ref();

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            log_debug!(
                path = %path.display(),
                error = %e,
                "No env file loaded"
            );
            return 0;
        }
    };

    let mut applied = 0;
    for (key, value) in contents.lines().filter_map(parse_env_line) {
        if std::env::var_os(key).is_some() {
            continue;
        }
        std::env::set_var(key, value);
        applied += 1;
    }

    log_info!(
        path = %path.display(),
        variables_set = applied,
        "Loaded env file"
    );

    applied
}

/// Get the OpenAI API key from the environment or the `.env` file.
///
/// Returns `None` when the key is not set anywhere. An empty value counts as
/// unset.
pub fn get_openai_api_key() -> Option<String> {
    load_env_file();
    non_empty_var(OPENAI_API_KEY_VAR)
}

/// AnythingLLM connection settings.
///
/// Not used by the checks themselves; exposed for other tooling that shares
/// the same `.env` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnythingLlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

/// Get the AnythingLLM configuration from the environment or the `.env` file.
pub fn get_anythingllm_config() -> AnythingLlmConfig {
    load_env_file();
    AnythingLlmConfig {
        api_key: non_empty_var(ANYTHINGLLM_API_KEY_VAR),
        base_url: non_empty_var(ANYTHINGLLM_BASE_URL_VAR)
            .unwrap_or_else(|| DEFAULT_ANYTHINGLLM_BASE_URL.to_string()),
    }
}

/// Everything a check run needs, passed by value into the runner.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckSettings {
    pub api_key: Option<String>,
    /// API root without the `/v1` suffix.
    pub base_url: String,
    pub model: String,
    pub completion_timeout: Duration,
    pub models_timeout: Duration,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_CHECK_MODEL.to_string(),
            completion_timeout: Duration::from_secs(30),
            models_timeout: Duration::from_secs(10),
        }
    }
}

impl CheckSettings {
    /// Load settings from the environment, seeding it from `.env` first.
    pub fn from_env() -> Self {
        let api_key = get_openai_api_key();

        let mut settings = Self {
            api_key,
            ..Self::default()
        };
        if let Some(base_url) = non_empty_var(OPENAI_BASE_URL_VAR) {
            settings.base_url = base_url;
        }

        log_debug!(
            has_api_key = settings.api_key.is_some(),
            base_url = %settings.base_url,
            model = %settings.model,
            "Check settings loaded"
        );

        settings
    }

    /// Settings for an explicit key, mainly useful in tests.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Point the checks at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }

    pub fn models_url(&self) -> String {
        format!("{}/v1/models", self.base_url.trim_end_matches('/'))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
