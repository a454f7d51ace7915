//! User interface module - output of versions, reports and warnings.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Wiring of `tracing` diagnostics to stderr

use tracing_subscriber::EnvFilter;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_enforcement, display_error, display_report, display_success,
    display_version,
};

/// Install the diagnostic log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise only warnings are shown, or everything down to
/// debug when `verbose` is set. Logs go to stderr so stdout stays parseable.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "git_semver=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second install (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
