//! Logging bootstrap for the product API.
//!
//! Level and output shape come from the `[logging]` config section: `level`
//! seeds the filter when `RUST_LOG` is unset, and `format = "json"` switches
//! the human-readable formatter to line-delimited JSON for log shippers.

use crate::config::Config;
use crate::error::AppError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

pub fn init_logging(config: &Config) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let json_output = config.logging.format.as_str() == "json";
    let formatter = if json_output {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().pretty().boxed()
    };

    registry()
        .with(filter)
        .with(formatter)
        .try_init()
        .map_err(|e| AppError::Internal(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}
