//! Degradation guard stage
//!
//! Turns interceptor decisions into HTTP responses: canned JSON for covered
//! reads, 503 for mutating requests on protected paths.

use crate::{
    application::use_cases::RequestInterceptor,
    domain::interception::InterceptOutcome,
    infrastructure::{adapters::MonitoringAdapter, http::ResponseFormatter},
    middleware::pipeline::{RequestHead, RequestStage},
    shared::{error::AppError, logging::LoggingUtils},
};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::Response;

pub struct DegradationGuard {
    interceptor: Arc<RequestInterceptor>,
    monitoring: Option<Arc<MonitoringAdapter>>,
}

impl DegradationGuard {
    pub fn new(interceptor: Arc<RequestInterceptor>) -> Self {
        Self {
            interceptor,
            monitoring: None,
        }
    }

    pub fn with_monitoring(mut self, monitoring: Arc<MonitoringAdapter>) -> Self {
        self.monitoring = Some(monitoring);
        self
    }

    fn record(&self, head: &RequestHead, outcome: &InterceptOutcome) {
        if let Some(monitoring) = &self.monitoring {
            monitoring.record_interception(outcome.label());
        }
        if *outcome != InterceptOutcome::NotDegraded {
            LoggingUtils::log_interception(&head.method, &head.path, outcome.label());
        }
    }
}

impl RequestStage for DegradationGuard {
    fn name(&self) -> &'static str {
        "degradation"
    }

    fn handle(&self, head: &RequestHead) -> Option<Response> {
        let outcome = self.interceptor.evaluate(&head.method, &head.path);
        self.record(head, &outcome);

        match outcome {
            InterceptOutcome::FallbackServed(body) => {
                Some(ResponseFormatter::json_with_status(&body, StatusCode::OK))
            }
            InterceptOutcome::Blocked { dependency } => Some(ResponseFormatter::from_app_error(
                &AppError::DependencyUnavailable { dependency },
            )),
            InterceptOutcome::NotDegraded
            | InterceptOutcome::Exempt
            | InterceptOutcome::Unmatched => None,
        }
    }
}
