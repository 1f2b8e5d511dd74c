//! Logging setup
//!
//! Logs always go to stderr so they never interleave with diff output.
//! `RUST_LOG` overrides the verbosity flags.

use tracing_subscriber::EnvFilter;

/// Default filter for the given `-v` count. The TUI owns the terminal, so it
/// stays silent unless `RUST_LOG` asks otherwise.
pub fn default_directive(verbose: u8, interactive: bool) -> &'static str {
    match (interactive, verbose) {
        (true, _) => "off",
        (false, 0) => "warn",
        (false, 1) => "linediff=debug,linediff_core=debug",
        (false, _) => "linediff=trace,linediff_core=trace",
    }
}

pub fn init(verbose: u8, interactive: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, interactive)));

    // A subscriber may already be installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
