//! Tracing subscriber setup

use crate::config::LoggingConfig;
use crate::error::{BridgeError, BridgeResult};
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install the global subscriber
///
/// `RUST_LOG` wins over `config.level`. Calling this more than once is a
/// no-op; a subscriber installed by someone else is left in place.
///
/// # Errors
/// - `BridgeError::Telemetry` if the configured level is not a valid filter
pub fn init(config: &LoggingConfig) -> BridgeResult<()> {
    if INITIALIZED.get().is_some() {
        return Ok(());
    }

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| BridgeError::Telemetry(format!("invalid log level {:?}: {e}", config.level)))?,
    };

    let result = if config.json {
        Registry::default()
            .with(filter)
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .try_init()
    } else {
        Registry::default()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("global tracing subscriber already set, keeping it");
    }
    let _ = INITIALIZED.set(());
    Ok(())
}
