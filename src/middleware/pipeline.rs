//! Ordered request pipeline
//!
//! Stages see only the request head. The first stage that answers ends the
//! request; when every stage continues, the filter rejects with `not_found`
//! so the request falls through to the business layer with its body intact.

use crate::{
    application::use_cases::RequestInterceptor,
    config::AppConfig,
    domain::fallback::resolve_dot_segments,
    infrastructure::adapters::MonitoringAdapter,
    middleware::{degradation::DegradationGuard, rate_limit::RateLimitStage},
    shared::error::{AppError, AppResult},
};
use std::sync::Arc;
use warp::http::Method;
use warp::path::FullPath;
use warp::reply::Response;
use warp::Filter;

/// Method and path of an incoming request
///
/// The path has its dot segments resolved, matching what the business layer
/// is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    pub method: String,
    pub path: String,
}

impl RequestHead {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
        }
    }
}

/// One step of the pipeline: answer the request, or let it continue
pub trait RequestStage: Send + Sync {
    fn name(&self) -> &'static str;

    /// `Some` ends the request with this response
    fn handle(&self, head: &RequestHead) -> Option<Response>;
}

/// Stages in configured order
pub struct MiddlewarePipeline {
    stages: Vec<Arc<dyn RequestStage>>,
}

impl MiddlewarePipeline {
    pub fn new(stages: Vec<Arc<dyn RequestStage>>) -> Self {
        Self { stages }
    }

    /// Build the stages named in `pipeline.stages`
    ///
    /// A disabled rate limiter is left out rather than run as a no-op.
    pub fn from_config(
        config: &AppConfig,
        interceptor: Arc<RequestInterceptor>,
        monitoring: Option<Arc<MonitoringAdapter>>,
    ) -> AppResult<Self> {
        let mut stages: Vec<Arc<dyn RequestStage>> =
            Vec::with_capacity(config.pipeline.stages.len());

        for name in &config.pipeline.stages {
            match name.as_str() {
                "degradation" => {
                    let mut guard = DegradationGuard::new(interceptor.clone());
                    if let Some(monitoring) = &monitoring {
                        guard = guard.with_monitoring(monitoring.clone());
                    }
                    stages.push(Arc::new(guard));
                }
                "rate_limit" => {
                    if config.rate_limit.enabled {
                        stages.push(Arc::new(RateLimitStage::new(&config.rate_limit)?));
                    }
                }
                other => {
                    return Err(AppError::Config(format!("Unknown pipeline stage: {}", other)));
                }
            }
        }

        Ok(Self::new(stages))
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Run stages in order; the first response wins
    pub fn evaluate(&self, head: &RequestHead) -> Option<Response> {
        self.stages.iter().find_map(|stage| stage.handle(head))
    }
}

/// Warp filter running the pipeline
pub fn pipeline_filter(
    pipeline: Arc<MiddlewarePipeline>,
) -> impl Filter<Extract = (Response,), Error = warp::Rejection> + Clone {
    warp::method()
        .and(warp::path::full())
        .and(warp::any().map(move || pipeline.clone()))
        .and_then(run_pipeline)
}

async fn run_pipeline(
    method: Method,
    path: FullPath,
    pipeline: Arc<MiddlewarePipeline>,
) -> Result<Response, warp::Rejection> {
    let head = RequestHead::new(method.as_str(), resolve_dot_segments(path.as_str()));
    pipeline.evaluate(&head).ok_or_else(warp::reject::not_found)
}
