//! Health routes module
//!
//! `/health/live`, `/health/ready` and `/health/status`.

use crate::{
    application::use_cases::HealthCheckUseCase,
    infrastructure::http::{
        handlers::{handle_liveness_request, handle_readiness_request, handle_status_request},
        utils::with_health_use_case,
    },
};
use std::sync::Arc;
use warp::Filter;

/// Health routes configuration
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health endpoints
    pub fn create_health_route(
        health_use_case: Arc<HealthCheckUseCase>,
    ) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
        let live = warp::path!("health" / "live")
            .and(warp::get())
            .and(with_health_use_case(health_use_case.clone()))
            .and_then(handle_liveness_request);

        let ready = warp::path!("health" / "ready")
            .and(warp::get())
            .and(with_health_use_case(health_use_case.clone()))
            .and_then(handle_readiness_request);

        let status = warp::path!("health" / "status")
            .and(warp::get())
            .and(with_health_use_case(health_use_case))
            .and_then(handle_status_request);

        live.or(ready).or(status)
    }
}
