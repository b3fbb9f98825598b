//! Diagnostic logging via `tracing`.
//!
//! Events go to stderr so they never mix with a value printed by `get`.
//! Secret values, envelopes and passphrases are never recorded.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with
/// `--verbose`.  Calling this twice is harmless.
pub fn init(verbose: bool) {
    let fallback = if verbose { "deevault=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
