//! Diagnostic logging setup for the command-line front end.
//!
//! User-facing status lines are printed directly with `colored`; this only
//! covers the `tracing` events emitted by the library.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `fluttergen=debug`.
pub const LOG_ENV: &str = "FLUTTERGEN_LOG";

/// Install a stderr subscriber. `FLUTTERGEN_LOG` wins over `verbose`.
///
/// Compiler warnings already reach the user as `warning:` lines, so their
/// `warn` events only show up with `-v` or an explicit filter.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (tests driving `main` helpers) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
