//! HTTP utilities - Common helper functions
//!
//! Filters that inject shared state into routes, plus the request size guard.

use crate::application::use_cases::HealthCheckUseCase;
use crate::infrastructure::adapters::{MonitoringAdapter, UpstreamAdapter};
use crate::shared::error::AppError;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use futures::{Stream, TryStreamExt};
use std::sync::Arc;
use warp::Filter;

/// Helper function to inject health use case into route
pub fn with_health_use_case(
    health_use_case: Arc<HealthCheckUseCase>,
) -> impl Filter<Extract = (Arc<HealthCheckUseCase>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || health_use_case.clone())
}

/// Helper function to inject the monitoring adapter into route
pub fn with_monitoring(
    monitoring: Arc<MonitoringAdapter>,
) -> impl Filter<Extract = (Arc<MonitoringAdapter>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || monitoring.clone())
}

/// Helper function to inject the upstream adapter into route
pub fn with_upstream(
    upstream: Arc<UpstreamAdapter>,
) -> impl Filter<Extract = (Arc<UpstreamAdapter>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || upstream.clone())
}

/// Refuse requests whose declared body exceeds `limit` before reading it
///
/// Requests without a Content-Length header pass; [`limited_body`] caps those.
pub fn body_size_guard(limit: u64) -> impl Filter<Extract = (), Error = warp::Rejection> + Clone {
    warp::header::optional::<u64>("content-length")
        .and_then(move |length: Option<u64>| async move {
            match length {
                Some(size) if size > limit => {
                    Err(warp::reject::custom(AppError::RequestTooLarge { size, limit }))
                }
                _ => Ok(()),
            }
        })
        .untuple_one()
}

/// Request body, refused with 413 once more than `limit` bytes arrive
///
/// Chunked bodies have no Content-Length, so the cap is applied while reading.
pub fn limited_body(
    limit: u64,
) -> impl Filter<Extract = (Bytes,), Error = warp::Rejection> + Clone {
    body_size_guard(limit)
        .and(warp::body::stream())
        .and_then(move |stream| read_limited(stream, limit))
}

/// Collect `stream`, stopping as soon as the total passes `limit`
pub async fn read_limited<S, B, E>(stream: S, limit: u64) -> Result<Bytes, warp::Rejection>
where
    S: Stream<Item = Result<B, E>>,
    B: Buf,
    E: std::fmt::Display,
{
    let mut stream = Box::pin(stream);
    let mut body = BytesMut::new();

    while let Some(chunk) = stream.try_next().await.map_err(|e| {
        warp::reject::custom(AppError::Validation(format!("Failed to read request body: {}", e)))
    })? {
        let size = (body.len() + chunk.remaining()) as u64;
        if size > limit {
            return Err(warp::reject::custom(AppError::RequestTooLarge { size, limit }));
        }
        body.put(chunk);
    }

    Ok(body.freeze())
}

/// Raw query string, empty when the request has none
pub fn raw_query() -> impl Filter<Extract = (String,), Error = std::convert::Infallible> + Clone {
    warp::query::raw()
        .or(warp::any().map(String::new))
        .unify()
}
