//! Logging utilities for gridder.
//!
//! Structured `tracing` events for the command-line tool, so runs can be
//! followed and compared from their logs.

use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::geometry::GridGeometry;
use crate::output::OutputType;

/// Initialize the tracing subscriber with the given log level
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
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
    let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

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
            "Operation did not complete"
        );
    }
}

/// Log an operation with timing and result in a single statement
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let run_id = Uuid::new_v4();

    debug!(
        operation = operation,
        run_id = %run_id,
        "Starting operation"
    );

    let result = f();

    info!(
        operation = operation,
        run_id = %run_id,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log what is about to be gridded
pub fn log_grid_stats(
    algorithm: &str,
    point_count: usize,
    geometry: &GridGeometry,
    output_type: OutputType,
    threads: usize,
) {
    info!(
        operation = "grid",
        algorithm = algorithm,
        points = point_count,
        columns = geometry.columns,
        rows = geometry.rows,
        x_min = geometry.x_min,
        x_max = geometry.x_max,
        y_min = geometry.y_min,
        y_max = geometry.y_max,
        output_type = %output_type,
        output_mb = (geometry.cell_count() * output_type.size_bytes()) as f64 / (1024.0 * 1024.0),
        threads = threads,
        "Grid requested"
    );
}

/// Log an error with context
pub fn log_error(error: &crate::error::GridError, context: &str) {
    error!(
        error = %error,
        context = context,
        error_type = std::any::type_name_of_val(error),
        "Error occurred"
    );
}

/// Generate a unique run ID
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_generate_run_id() {
        let id1 = generate_run_id();
        let id2 = generate_run_id();

        assert!(!id1.is_empty());
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_log_timed_operation() {
        let result = log_timed_operation("test_operation", || {
            std::thread::sleep(Duration::from_millis(1));
            42
        });

        assert_eq!(result, 42);
    }

    #[test]
    fn test_log_helpers_do_not_panic() {
        let geometry = GridGeometry::new(0.0, 1.0, 0.0, 1.0, 2, 2);
        log_grid_stats("invdist", 3, &geometry, OutputType::Float32, 1);
        log_operation_start("grid", Some("test"));
        log_operation_end("grid", Instant::now(), false);
        log_error(&crate::error::GridError::UserInterrupt, "test");
    }
}
