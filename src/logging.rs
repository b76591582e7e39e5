use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{AppError, AppResult};

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
/// Logs go to stderr so stdout carries only the commit message.
pub fn init_tracing(level: &str) -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|err| AppError::Configuration(format!("invalid log level '{level}': {err}")))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|err| AppError::Configuration(format!("failed to initialise logging: {err}")))
}
