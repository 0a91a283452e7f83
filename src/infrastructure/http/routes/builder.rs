//! Route builder module
//!
//! Composes health, metrics, the request pipeline and the business layer,
//! in that order, behind one rejection handler.

use crate::{
    infrastructure::http::{
        responses::handle_rejection,
        routes::{HealthRoutes, MetricsRoutes},
        server::AppState,
    },
    middleware::pipeline_filter,
};
use std::convert::Infallible;
use warp::{Filter, Rejection, Reply};

/// Route builder that orchestrates the creation of all application routes
pub struct RouteBuilder;

impl RouteBuilder {
    /// Build all application routes around `business`
    ///
    /// Health and metrics answer first and are never intercepted. Requests no
    /// pipeline stage answers reach `business` untouched.
    pub fn build_routes<B, R>(
        state: &AppState,
        business: B,
    ) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone + Send + Sync + 'static
    where
        B: Filter<Extract = (R,), Error = Rejection> + Clone + Send + Sync + 'static,
        R: Reply,
    {
        let health_route = HealthRoutes::create_health_route(state.health_use_case.clone());
        let metrics_route = MetricsRoutes::create_prometheus_route(state.monitoring.clone());
        let pipeline = pipeline_filter(state.pipeline.clone());

        health_route
            .or(metrics_route)
            .or(pipeline)
            .or(business)
            .recover(handle_rejection)
    }
}
