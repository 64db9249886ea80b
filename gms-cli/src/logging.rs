//! Tracing subscriber setup
//!
//! Verbosity comes from `RUST_LOG` (for example `RUST_LOG=gms_core=debug`);
//! without it only warnings are shown. Output goes to stderr so it never
//! mixes with listings on stdout.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A second init (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
