//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the campus events backend.

use tracing::{debug, error, info, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{CampusError, Result};

/// File name prefix for the daily rolling log
const LOG_FILE_PREFIX: &str = "campus-events.log";

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| CampusError::Config(format!("Invalid log filter: {}", e)))?;

    let stdout_layer = if config.json {
        tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(std::io::stdout).boxed()
    };

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CampusError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Level a failed store operation is logged at: client errors (conflicts,
/// missing rows, bad input) are expected and logged as warnings
pub fn failure_level(err: &CampusError) -> Level {
    if err.is_client_error() {
        Level::WARN
    } else {
        Level::ERROR
    }
}

/// Log a store operation with its outcome
pub fn log_store_operation(operation: &str, entity: &str, duration_ms: u64, failure: Option<&CampusError>) {
    match failure {
        None => debug!(
            operation = operation,
            entity = entity,
            duration_ms = duration_ms,
            "Store operation completed"
        ),
        Some(err) if failure_level(err) == Level::WARN => warn!(
            operation = operation,
            entity = entity,
            duration_ms = duration_ms,
            error = %err,
            "Store operation rejected"
        ),
        Some(err) => error!(
            operation = operation,
            entity = entity,
            duration_ms = duration_ms,
            error = %err,
            severity = %err.severity(),
            "Store operation failed"
        ),
    }
}

/// Log a generated report
pub fn log_report_generated(report: &str, rows: usize, duration_ms: u64) {
    info!(
        report = report,
        rows = rows,
        duration_ms = duration_ms,
        "Report generated"
    );
}
