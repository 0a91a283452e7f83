//! HTTP route handlers module
//!
//! Handlers grouped by endpoint type.

pub mod health;
pub mod metrics;
pub mod proxy;

pub use health::{handle_liveness_request, handle_readiness_request, handle_status_request};
pub use metrics::handle_prometheus_request;
pub use proxy::handle_proxy_request;
