//! Structured logging to stderr using `tracing`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::error::{GeneratorError, Result};

/// Build the filter: `RUST_LOG` wins, then `--verbose`, then the configured level.
pub fn build_env_filter(level: &str, verbose: bool) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let level = if verbose { "debug" } else { level };
    EnvFilter::try_new(level)
        .map_err(|e| GeneratorError::config(format!("Invalid log level '{}': {}", level, e)))
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init_logging(level: &str, verbose: bool) -> Result<()> {
    let filter = build_env_filter(level, verbose)?;
    let _ = Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
    Ok(())
}
