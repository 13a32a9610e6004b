//! Log output for applications that do not install their own subscriber.
//!
//! The engines only emit `tracing` events (`debug` for state changes, `trace`
//! for recomputed views); nothing is printed until a subscriber is installed.

use tracing_subscriber::EnvFilter;

use crate::error::{Result, ViewStateError};
use crate::settings::Settings;

/// Installs a formatting subscriber. `RUST_LOG` wins over `default_filter`.
/// Fails, instead of panicking, when a global subscriber already exists.
pub fn init(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| ViewStateError::Logging(e.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| ViewStateError::Logging(e.to_string()))
}

pub fn init_from(settings: &Settings) -> Result<()> {
    init(&settings.log_filter)
}
