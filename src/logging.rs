//! Diagnostic logging.
//!
//! Logs go to stderr so stdout stays clean for command output. The filter
//! comes from `TWEETSTORM_LOG` (same syntax as `RUST_LOG`) and otherwise
//! defaults to `warn`, or `debug` with `--verbose`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "TWEETSTORM_LOG";

/// Returns the default filter directive.
#[must_use]
pub const fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Builds the filter from `TWEETSTORM_LOG`, or the default level.
#[must_use]
pub fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level(verbose)))
}

/// Installs the global subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
