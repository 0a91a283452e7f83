//! Health check handler module
//!
//! Liveness, readiness and status endpoints for orchestrators and operators.

use crate::application::use_cases::HealthCheckUseCase;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::Reply;

/// Always 200 while the process can answer
pub async fn handle_liveness_request(
    health_use_case: Arc<HealthCheckUseCase>,
) -> Result<impl Reply, warp::reject::Rejection> {
    Ok(warp::reply::json(&health_use_case.liveness()))
}

/// 200 while the primary dependency is healthy, 503 otherwise
pub async fn handle_readiness_request(
    health_use_case: Arc<HealthCheckUseCase>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let report = health_use_case.readiness();
    let status = StatusCode::from_u16(report.http_status_code())
        .unwrap_or(StatusCode::SERVICE_UNAVAILABLE);

    Ok(warp::reply::with_status(warp::reply::json(&report), status))
}

/// Operating mode and per-service detail
pub async fn handle_status_request(
    health_use_case: Arc<HealthCheckUseCase>,
) -> Result<impl Reply, warp::reject::Rejection> {
    Ok(warp::reply::json(&health_use_case.status()))
}
