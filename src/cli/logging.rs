//! Logging initialization

use tracing_subscriber::EnvFilter;

/// Initialize logging based on debug flag
///
/// Logs go to stderr so rendered output on stdout stays clean. `RUST_LOG`
/// takes precedence over the flag.
pub fn init_logging(debug: bool) {
    let default_level = default_directive(debug);

    let result = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(debug)
        .with_file(debug)
        .with_line_number(debug)
        .try_init();

    // A subscriber may already be installed when running under a test harness
    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}

/// Filter used when `RUST_LOG` is unset
///
/// Progress lines from this crate are shown at info; dependencies stay at warn.
fn default_directive(debug: bool) -> &'static str {
    if debug { "debug" } else { "warn,argo_aoa=info" }
}
