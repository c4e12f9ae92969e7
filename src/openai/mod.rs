//! Typed access to the two OpenAI endpoints the checks use.
//!
//! - `types` - request/response structures for chat completions and models
//! - `client` - [`OpenAIApi`] trait and its reqwest-backed implementation

pub mod client;
pub mod types;

pub use client::{build_auth_headers, OpenAIApi, OpenAIClient};
pub use types::*;
