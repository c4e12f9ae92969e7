//! OpenAI API key check through the typed client.
//!
//! Exits 0 when the key works and 1 otherwise.
//!
//! ```bash
//! export OPENAI_API_KEY="sk-..."   # or put it in .env
//! cargo run --bin test-openai
//! ```

use openai_keycheck::check::sdk;
use openai_keycheck::logging::init_tracing;
use openai_keycheck::{CheckSettings, Reporter};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let mut report = Reporter::stdout();
    report.banner("OpenAI API Key Test Script");

    let settings = CheckSettings::from_env();
    let success = sdk::run(&settings, &mut report).await;
    report.verdict(success);

    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
