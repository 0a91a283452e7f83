//! Proxy routes module
//!
//! Catch-all route forwarding to the business service.

use crate::infrastructure::{
    adapters::UpstreamAdapter,
    http::{
        handlers::handle_proxy_request,
        utils::{limited_body, raw_query, with_upstream},
    },
};
use std::sync::Arc;
use warp::reply::Response;
use warp::Filter;

/// Proxy routes configuration
pub struct ProxyRoutes;

impl ProxyRoutes {
    /// Forward any request; bodies over `max_request_size` get 413
    pub fn create_proxy_route(
        upstream: Arc<UpstreamAdapter>,
        max_request_size: u64,
    ) -> impl Filter<Extract = (Response,), Error = warp::Rejection> + Clone {
        warp::method()
            .and(warp::path::full())
            .and(raw_query())
            .and(warp::header::headers_cloned())
            .and(limited_body(max_request_size))
            .and(with_upstream(upstream))
            .and_then(handle_proxy_request)
    }
}
