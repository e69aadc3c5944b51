//! Tracing subscriber setup.

use crate::config::{LogFormat, LoggingConfig};
use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, Layer, filter::ParseError, layer::SubscriberExt, util::SubscriberInitExt,
    util::TryInitError,
};

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured level is not a valid filter directive.
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),
    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(#[from] TryInitError),
}

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over [`LoggingConfig::level`] when set.
///
/// # Errors
///
/// Returns [`TelemetryError`] for an invalid filter or when a subscriber is
/// already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(config, std::env::var("RUST_LOG").ok())?;

    let fmt_layer = match config.format {
        LogFormat::Plain => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()?;
    Ok(())
}

fn build_filter(config: &LoggingConfig, rust_log: Option<String>) -> Result<EnvFilter, ParseError> {
    match rust_log.filter(|value| !value.trim().is_empty()) {
        Some(directives) => EnvFilter::try_new(directives),
        None => EnvFilter::try_new(&config.level),
    }
}
