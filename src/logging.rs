//! Logging utilities for oiplot.
//!
//! Structured logging replaces the progress print statements of earlier
//! tooling, so runs can be traced and timed in batch environments.

use std::time::Instant;
use tracing::{error, info, warn};

/// Initialize the tracing subscriber with the given log level.
///
/// A `RUST_LOG` environment variable takes precedence over the configured
/// level.
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Log a start message for a significant operation
pub fn log_operation_start(operation: &str, details: Option<&str>) {
    if let Some(details) = details {
        info!(
            operation = operation,
            details = details,
            "Starting operation"
        );
    } else {
        info!(operation = operation, "Starting operation");
    }
}

/// Log the completion of a significant operation
pub fn log_operation_end(operation: &str, start_time: Instant, success: bool) {
    let duration = start_time.elapsed();
    let duration_ms = duration.as_secs_f64() * 1000.0;

    if success {
        info!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed successfully"
        );
    } else {
        warn!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed with warnings"
        );
    }
}

/// Log an error with context
pub fn log_error(error: &crate::error::OiplotError, context: &str) {
    error!(
        error = %error,
        context = context,
        "Error occurred"
    );
}
