//! Test fixtures shared by the unit test modules.

use crate::openai::{ChatChoice, ChatResponse, ModelEntry, ModelList, ResponseMessage};
use std::path::{Path, PathBuf};

pub const VALID_TEST_KEY: &str = "sk-test-1234567890abcdef";

pub fn chat_response(content: &str) -> ChatResponse {
    ChatResponse {
        choices: vec![ChatChoice {
            message: ResponseMessage {
                role: "assistant".to_string(),
                content: content.to_string(),
            },
            finish_reason: Some("stop".to_string()),
        }],
        usage: None,
    }
}

pub fn model_list(ids: &[&str]) -> ModelList {
    ModelList {
        data: ids
            .iter()
            .map(|id| ModelEntry {
                id: id.to_string(),
                owned_by: Some("openai".to_string()),
            })
            .collect(),
    }
}

/// Write `contents` to a `.env` file inside `dir` and return its path.
pub fn write_env_file(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join(".env");
    std::fs::write(&path, contents).expect("write env fixture");
    path
}

/// Snapshot of the whole process environment, for "unchanged" assertions.
pub fn env_snapshot() -> Vec<(std::ffi::OsString, std::ffi::OsString)> {
    let mut vars: Vec<_> = std::env::vars_os().collect();
    vars.sort();
    vars
}

/// Run `f` with the working directory switched to `dir`.
///
/// Callers must be `#[serial]`: the working directory is process-wide.
pub fn in_dir<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
    let previous = std::env::current_dir().expect("current dir");
    std::env::set_current_dir(dir).expect("enter temp dir");
    let result = f();
    std::env::set_current_dir(previous).expect("restore current dir");
    result
}
