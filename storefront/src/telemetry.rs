// storefront/src/telemetry.rs

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` when it is set and parses, otherwise `default_directive` (e.g. "info").
pub fn env_filter(default_directive: &str) -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}
