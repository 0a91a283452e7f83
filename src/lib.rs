//! Resilience Gateway - degradation layer for multi-tenant backends
//!
//! Tracks the health of external dependencies, probes them in the background
//! and, while the primary datastore is down, answers covered reads from a
//! static fallback table and refuses writes with a typed 503 instead of
//! letting them fail deep inside business logic.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod middleware;
pub mod shared;

#[cfg(test)]
mod tests;

pub use application::services::{DegradationController, HealthMonitor, HealthProbe, ServiceRegistry};
pub use application::use_cases::{HealthCheckUseCase, RequestInterceptor};
pub use config::AppConfig;
pub use infrastructure::http::{AppState, HttpServer, RouteBuilder};
pub use shared::error::{AppError, AppResult};

/// Application result type
pub type Result<T> = std::result::Result<T, shared::error::AppError>;
