//! Log filter selection.

use tracing_subscriber::EnvFilter;

/// Filter for the subscriber: `--log-level` when given, then `RUST_LOG`,
/// then `info`.
pub fn log_filter(log_level: Option<&str>) -> EnvFilter {
    match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    }
}
