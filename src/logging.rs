//! Logging configuration for the `lightbnb` binary.
//!
//! Logs always go to stderr so that stdout carries nothing but JSON rows.

use tracing_subscriber::EnvFilter;

/// Initializes stderr logging.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects between `debug`
/// (which includes every generated statement) and `info`.
pub fn init_stderr_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose))),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Returns the filter directive used when `RUST_LOG` is unset.
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "lightbnb=debug,lightbnb_store=debug,info"
    } else {
        "info"
    }
}
