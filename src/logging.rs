// Log output control: verbosity levels mapped onto tracing filters
use tracing_subscriber::EnvFilter;

/// Filter directive for a verbosity level (0=summary, 1=basic, 2=full)
pub fn level_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `verbosity`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_directive(verbosity)));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity > 1)
        .try_init()
        .is_ok();

    if installed && verbosity > 0 {
        tracing::debug!("📢 Verbosity level: {} (0=summary, 1=basic, 2=full)", verbosity);
    }
}
