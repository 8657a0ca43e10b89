//! Logging setup.
//!
//! Logs go to stderr so that stdout only carries the run summary. The filter is taken from
//! `REMAP_LOG`, then `RUST_LOG`, and otherwise defaults to `warn` (`debug` with `--verbose`).

use std::env;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber.
///
/// Does nothing if a subscriber is already installed.
pub fn init(verbose: bool) {
    let _ = fmt()
        .with_env_filter(create_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn create_filter(verbose: bool) -> EnvFilter {
    for var in ["REMAP_LOG", "RUST_LOG"] {
        if let Ok(spec) = env::var(var) {
            match EnvFilter::try_new(&spec) {
                Ok(filter) => return filter,
                Err(e) => eprintln!("Warning: ignoring invalid {var}={spec}: {e}"),
            }
        }
    }
    EnvFilter::new(default_directive(verbose))
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}
