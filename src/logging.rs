//! Logging initialization for identity-gateway
//!
//! Sets up the global tracing subscriber with a JSON formatter and a level
//! filter taken from configuration.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Logging error types
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to install the global subscriber
    #[error("Failed to initialize logging: {0}")]
    Init(String),
}

/// Parse a configured log level string, defaulting to info
pub fn parse_level(log_level: &str) -> Level {
    match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Initialize the tracing subscriber
///
/// Installs a process-global subscriber; calling this twice returns an error
/// from the underlying registry.
pub fn init_tracing(log_level: &str) -> Result<(), LoggingError> {
    let filter = tracing_subscriber::filter::LevelFilter::from_level(parse_level(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))
}
