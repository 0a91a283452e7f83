//! Error handling module
//!
//! This module provides centralized error handling for the application.

use serde_json::{json, Value};
use thiserror::Error;
use warp::http::StatusCode;

/// Application error types
#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A dependency health check failed or timed out
    #[error("Probe for {service} failed: {reason}")]
    Probe { service: String, reason: String },

    /// A mutating request arrived while a required dependency is down
    #[error("{dependency} unavailable, this operation requires it")]
    DependencyUnavailable { dependency: String },

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("JSON serialization error: {0}")]
    Json(String),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Request too large: {size} bytes exceeds limit of {limit} bytes")]
    RequestTooLarge { size: u64, limit: u64 },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Build a probe failure for the named service
    pub fn probe(service: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        AppError::Probe {
            service: service.into(),
            reason: reason.to_string(),
        }
    }

    /// Get HTTP status code for this error
    pub fn http_status_code(&self) -> StatusCode {
        match self {
            AppError::DependencyUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Probe { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Validation(_) | AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimit => StatusCode::TOO_MANY_REQUESTS,
            AppError::RequestTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body returned to HTTP callers
    pub fn to_response_body(&self) -> Value {
        match self {
            AppError::DependencyUnavailable { .. } => json!({
                "detail": self.to_string(),
                "degraded": true,
            }),
            // Configuration and internal details stay in the logs
            AppError::Config(_) | AppError::Internal(_) => json!({
                "detail": "Internal server error",
            }),
            _ => json!({ "detail": self.to_string() }),
        }
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;

impl warp::reject::Reject for AppError {}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err.to_string())
    }
}

impl From<prometheus::Error> for AppError {
    fn from(err: prometheus::Error) -> Self {
        AppError::Internal(format!("metrics registry: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}
