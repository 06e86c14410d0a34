//! Logging configuration for soccer-sql.
//!
//! Result sets are printed to stdout, so logs always go to stderr.

use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset and `--verbose` is not given.
pub const DEFAULT_LEVEL: &str = "warn";

/// Level used with `--verbose`.
pub const VERBOSE_LEVEL: &str = "debug";

/// Initializes logging to stderr.
///
/// `RUST_LOG` takes precedence; otherwise `default_level` is used.
pub fn init_stderr_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(default_level))
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the env filter, falling back to `default_level`.
fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Returns the default level for the given verbosity flag.
pub fn level_for(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_LEVEL
    } else {
        DEFAULT_LEVEL
    }
}
