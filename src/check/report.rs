//! Operator-facing output for the checks.
//!
//! Diagnostics are the product of a check run, so they go to a writer rather
//! than the tracing subscriber. Binaries use stdout; tests capture a buffer.

use crate::logging::log_debug;
use std::fmt::Display;
use std::io::{self, BufRead, Write};

const BANNER_WIDTH: usize = 50;

pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Reporter<Vec<u8>> {
    pub fn buffered() -> Self {
        Self::new(Vec::new())
    }

    /// Everything written so far.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write one line. A console that can't be written to is not worth
    /// failing the check over.
    pub fn line(&mut self, text: impl Display) {
        if let Err(e) = writeln!(self.out, "{text}") {
            log_debug!(error = %e, "Failed to write report line");
        }
    }

    pub fn blank(&mut self) {
        self.line("");
    }

    pub fn banner(&mut self, title: &str) {
        let rule = "=".repeat(BANNER_WIDTH);
        self.line(&rule);
        self.line(title);
        self.line(&rule);
    }

    pub fn probe(&mut self, text: impl Display) {
        self.line(format_args!("🔍 {text}"));
    }

    pub fn progress(&mut self, text: impl Display) {
        self.line(format_args!("🔄 {text}"));
    }

    pub fn ok(&mut self, text: impl Display) {
        self.line(format_args!("✅ {text}"));
    }

    pub fn fail(&mut self, text: impl Display) {
        self.line(format_args!("❌ {text}"));
    }

    pub fn warn(&mut self, text: impl Display) {
        self.line(format_args!("⚠️  {text}"));
    }

    /// Closing line printed by both binaries.
    pub fn verdict(&mut self, success: bool) {
        self.blank();
        if success {
            self.ok("All tests passed! Your OpenAI API key is working correctly.");
        } else {
            self.fail("Tests failed. Please check your API key and try again.");
        }
    }

    /// Prompt and block until the operator presses Enter (or input closes).
    pub fn wait_for_enter<R: BufRead>(&mut self, mut input: R) -> io::Result<()> {
        write!(self.out, "\nPress Enter to exit...")?;
        self.out.flush()?;
        let mut discard = String::new();
        input.read_line(&mut discard)?;
        Ok(())
    }
}
