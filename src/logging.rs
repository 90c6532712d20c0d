//! Tracing subscriber setup for stderr diagnostics.

use tracing_subscriber::EnvFilter;

/// Initialise the global [`tracing`] subscriber.
///
/// All diagnostics go to stderr so the generated manifest on stdout stays
/// clean. The default level is `info` (`debug` with `--verbose`); a `RUST_LOG`
/// filter overrides both. Must be called once at program startup, before any
/// logging.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
