/// Logging setup
///
/// The filter is read from `GALLERY_LOG` (same syntax as `RUST_LOG`),
/// defaulting to `info`.
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "GALLERY_LOG";

/// Install the global subscriber. Calling it again is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
