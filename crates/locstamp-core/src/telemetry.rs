//! Structured logging initialisation.
//!
//! `RUST_LOG` overrides the caller-supplied level when set
//! (ex: `"info"`, `"debug,locstamp_verify=trace"`).

use crate::error::LocstampError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines for local development
    Human,
    /// Newline-delimited JSON for log aggregation
    Json,
}

/// Installs the global subscriber. Fails if one is already set.
pub fn init_logging(format: LogFormat, level: &str) -> Result<(), LocstampError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let installed = match format {
        LogFormat::Human => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true))
            .try_init(),
    };

    installed.map_err(|e| LocstampError::Config(format!("logging: {}", e)))
}
