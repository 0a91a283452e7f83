//! Logging utilities module
//!
//! This module provides centralized logging functionality and utilities.

use crate::domain::health::ServiceStatus;
use crate::shared::error::{AppError, AppResult};
use tracing::{debug, info, warn};

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging with the specified configuration
    ///
    /// `RUST_LOG` takes precedence over `level` when set.
    pub fn initialize(level: &str, format: &str) -> AppResult<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level));

        let builder = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false);

        let result = if format.eq_ignore_ascii_case("json") {
            tracing::subscriber::set_global_default(builder.json().finish())
        } else {
            tracing::subscriber::set_global_default(builder.finish())
        };

        result.map_err(|e| AppError::Internal(format!("Failed to initialize logging: {}", e)))
    }

    /// Log a dependency status transition
    pub fn log_status_transition(
        service: &str,
        old_status: ServiceStatus,
        new_status: ServiceStatus,
    ) {
        if old_status == ServiceStatus::Healthy {
            warn!(
                service = %service,
                old_status = %old_status,
                new_status = %new_status,
                "Service status changed"
            );
        } else {
            info!(
                service = %service,
                old_status = %old_status,
                new_status = %new_status,
                "Service status changed"
            );
        }
    }

    /// Log a probe failure
    pub fn log_probe_failure(service: &str, reason: &str, duration_ms: u64) {
        warn!(
            service = %service,
            reason = %reason,
            duration_ms = %duration_ms,
            "Health probe failed"
        );
    }

    /// Log a request answered by the degradation layer
    pub fn log_interception(method: &str, path: &str, outcome: &str) {
        debug!(
            method = %method,
            path = %path,
            outcome = %outcome,
            "Request intercepted in degraded mode"
        );
    }

    /// Generate a unique request ID
    pub fn generate_request_id() -> String {
        format!("req_{}", uuid::Uuid::new_v4().simple())
    }
}
