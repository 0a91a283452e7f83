//! Metrics handler module
//!
//! Prometheus text exposition of probe, degradation and interception metrics.

use crate::infrastructure::adapters::MonitoringAdapter;
use std::sync::Arc;
use warp::Reply;

/// Handle Prometheus metrics requests
pub async fn handle_prometheus_request(
    monitoring_adapter: Arc<MonitoringAdapter>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let metrics = monitoring_adapter
        .get_prometheus_metrics()
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::with_header(
        warp::reply::with_status(metrics, warp::http::StatusCode::OK),
        "Content-Type",
        "text/plain; version=0.0.4; charset=utf-8",
    ))
}
