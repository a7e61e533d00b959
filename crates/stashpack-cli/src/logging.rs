//! Log subscriber setup

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` raises the level above the
/// configured one. Output goes to stderr so stdout stays for results.
pub fn init(verbosity: u8, configured_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity, configured_level)));

    // A second init (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn level_for(verbosity: u8, configured_level: &str) -> &str {
    match verbosity {
        0 => configured_level,
        1 => "debug",
        _ => "trace",
    }
}
