//! Logging utilities for openai-keycheck
//!
//! Re-exports tracing macros with log_* naming convention, plus the subscriber
//! setup shared by the diagnostic binaries.

pub use tracing::{debug as log_debug, error as log_error, info as log_info, warn as log_warn};

use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is not set.
///
/// Kept at `warn` so structured logs don't interleave with the printed report.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Install a stderr fmt subscriber honouring `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
