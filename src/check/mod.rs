//! Connectivity checks for an OpenAI API key.
//!
//! Two variants share the same sequence of steps:
//!
//! 1. resolve the key and check its shape locally
//! 2. send a tiny chat completion (required)
//! 3. list models (best effort, never changes the result)
//!
//! - `sdk` goes through the typed [`OpenAIClient`](crate::openai::OpenAIClient)
//!   and reports errors by their description
//! - `raw` builds the requests by hand and reports by HTTP status

pub mod raw;
pub mod report;
pub mod sdk;

pub use report::Reporter;

use crate::config::CheckSettings;
use crate::error::{CheckError, CheckResult};
use std::io::Write;

/// Prefix every well-formed OpenAI key starts with.
pub const KEY_PREFIX: &str = "sk-";

/// Substrings that mark a model id as worth showing.
pub const COMMON_MODELS: [&str; 4] = ["gpt-4", "gpt-4o", "gpt-4o-mini", "gpt-3.5-turbo"];

/// How many common models are printed.
pub const MAX_COMMON_MODELS_SHOWN: usize = 3;

pub(crate) const PROBE_MAX_TOKENS: u32 = 10;
pub(crate) const PROBE_TEMPERATURE: f64 = 0.0;

/// Local shape check. Says nothing about whether the key is accepted.
pub fn validate_key_shape(api_key: &str) -> CheckResult<()> {
    if api_key.starts_with(KEY_PREFIX) {
        Ok(())
    } else {
        Err(CheckError::invalid_key_format(KEY_PREFIX))
    }
}

/// First `visible` characters of the key followed by `...`.
pub fn key_preview(api_key: &str, visible: usize) -> String {
    let shown: String = api_key.chars().take(visible).collect();
    format!("{shown}...")
}

/// Model ids containing any [`COMMON_MODELS`] substring, in input order.
pub fn common_models<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    ids.into_iter()
        .filter(|id| COMMON_MODELS.iter().any(|common| id.contains(common)))
        .collect()
}

/// Print up to [`MAX_COMMON_MODELS_SHOWN`] common models, if any matched.
pub(crate) fn report_common_models<'a, W: Write>(
    ids: impl IntoIterator<Item = &'a str>,
    report: &mut Reporter<W>,
) {
    let found = common_models(ids);
    if found.is_empty() {
        return;
    }
    let shown: Vec<&str> = found.into_iter().take(MAX_COMMON_MODELS_SHOWN).collect();
    report.ok(format_args!("Common models available: {}", shown.join(", ")));
}

/// Steps shared by both variants before any network call.
///
/// Prints guidance and returns `None` when the key is missing or malformed.
pub(crate) fn resolve_api_key<W: Write>(
    settings: &CheckSettings,
    preview_len: usize,
    report: &mut Reporter<W>,
) -> Option<String> {
    let Some(api_key) = settings.api_key.clone().filter(|key| !key.is_empty()) else {
        report.fail(CheckError::missing_api_key());
        report.line("Please set your OpenAI API key:");
        report.line("1. Create a .env file from env.example");
        report.line("2. Or set environment variable: OPENAI_API_KEY=your_api_key_here");
        return None;
    };

    if let Err(e) = validate_key_shape(&api_key) {
        report.fail(e);
        return None;
    }

    report.ok(format_args!("API key found: {}", key_preview(&api_key, preview_len)));
    Some(api_key)
}

pub(crate) fn report_completed<W: Write>(report: &mut Reporter<W>) {
    report.blank();
    report.line("🎉 OpenAI API test completed successfully!");
}
