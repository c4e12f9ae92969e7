//! OpenAI API key check with raw HTTP requests.
//!
//! Intended to be double-clicked or run by hand: it waits for Enter before
//! exiting and always exits 0, even when the check fails.
//!
//! ```bash
//! cargo run --bin test-openai-simple
//! ```

use anyhow::Context;
use openai_keycheck::check::raw;
use openai_keycheck::logging::{init_tracing, log_warn};
use openai_keycheck::{CheckSettings, Reporter};
use std::io::{self, Stdout};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    let mut report = Reporter::stdout();
    let settings = CheckSettings::from_env();
    let success = raw::run(&settings, &mut report).await;
    report.verdict(success);

    if let Err(e) = acknowledge(&mut report) {
        log_warn!(error = %e, "Exiting without acknowledgment");
    }
}

fn acknowledge(report: &mut Reporter<Stdout>) -> anyhow::Result<()> {
    report
        .wait_for_enter(io::stdin().lock())
        .context("failed to read acknowledgment from stdin")
}
