//! Use cases - Operations exposed to the HTTP layer

pub mod health_check;
pub mod intercept;

pub use health_check::{HealthCheckUseCase, ReadinessReport, ServiceSnapshot, StatusReport};
pub use intercept::RequestInterceptor;
