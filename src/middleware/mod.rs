//! Request middleware
//!
//! Stages that run ahead of the business layer, in configured order.

pub mod degradation;
pub mod pipeline;
pub mod rate_limit;

pub use degradation::DegradationGuard;
pub use pipeline::{pipeline_filter, MiddlewarePipeline, RequestHead, RequestStage};
pub use rate_limit::RateLimitStage;
