//! Metrics routes module
//!
//! Prometheus scrape endpoint.

use crate::infrastructure::{
    adapters::MonitoringAdapter,
    http::{handlers::handle_prometheus_request, utils::with_monitoring},
};
use std::sync::Arc;
use warp::Filter;

/// Metrics routes configuration
pub struct MetricsRoutes;

impl MetricsRoutes {
    /// Create the Prometheus metrics endpoint route
    pub fn create_prometheus_route(
        monitoring: Arc<MonitoringAdapter>,
    ) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
        warp::path("metrics")
            .and(warp::path::end())
            .and(warp::get())
            .and(with_monitoring(monitoring))
            .and_then(handle_prometheus_request)
    }
}
