use crate::config::app_config::RateLimitConfig;
use crate::infrastructure::http::ResponseFormatter;
use crate::middleware::pipeline::{RequestHead, RequestStage};
use crate::shared::error::{AppError, AppResult};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use tracing::debug;
use warp::reply::Response;

/// Global request limiter answering 429 once the quota is spent
pub struct RateLimitStage {
    limiter: DefaultDirectRateLimiter,
}

impl RateLimitStage {
    pub fn new(config: &RateLimitConfig) -> AppResult<Self> {
        let per_minute = NonZeroU32::new(config.requests_per_minute)
            .ok_or_else(|| AppError::Config("requests_per_minute must be positive".to_string()))?;
        let burst = NonZeroU32::new(config.burst_size)
            .ok_or_else(|| AppError::Config("burst_size must be positive".to_string()))?;

        Ok(Self {
            limiter: RateLimiter::direct(Quota::per_minute(per_minute).allow_burst(burst)),
        })
    }
}

impl RequestStage for RateLimitStage {
    fn name(&self) -> &'static str {
        "rate_limit"
    }

    fn handle(&self, head: &RequestHead) -> Option<Response> {
        if self.limiter.check().is_ok() {
            return None;
        }

        debug!(method = %head.method, path = %head.path, "Rate limit exceeded");
        Some(ResponseFormatter::from_app_error(&AppError::RateLimit))
    }
}
