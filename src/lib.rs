//! # openai-keycheck
//!
//! Diagnostic checks that verify an OpenAI API key works.
//!
//! A check resolves the key from the environment (optionally seeded from a
//! local `.env` file), rejects keys that don't look like `sk-...`, sends a
//! tiny chat completion and then, best effort, lists the available models.
//!
//! Two variants ship as binaries:
//!
//! - `test-openai` uses the typed [`OpenAIClient`] and exits 0/1
//! - `test-openai-simple` builds raw HTTP requests, reports by status code,
//!   waits for Enter and always exits 0
//!
//! ## Example
//!
//! ```rust,no_run
//! use openai_keycheck::{check, CheckSettings, Reporter};
//!
//! # async fn example() {
//! let settings = CheckSettings::from_env();
//! let mut report = Reporter::stdout();
//! let passed = check::sdk::run(&settings, &mut report).await;
//! report.verdict(passed);
//! # }
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

pub mod logging;

pub mod check;
pub mod config;
pub mod error;
pub mod openai;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use check::Reporter;
pub use config::{
    get_anythingllm_config, get_openai_api_key, load_env_file, load_env_from, AnythingLlmConfig,
    CheckSettings,
};
pub use error::{CheckError, CheckResult};
pub use openai::{OpenAIApi, OpenAIClient};
