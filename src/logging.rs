use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber for progress output. `RUST_LOG` wins over
/// the configured level.
pub fn init_tracing(log_level: &str) -> Result<()> {
    fmt()
        .with_env_filter(progress_filter(log_level))
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

fn progress_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}
