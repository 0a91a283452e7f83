//! Business-layer forwarding handler
//!
//! Replays requests the pipeline let through against the upstream business
//! service and returns its answer verbatim.

use crate::{
    domain::fallback::resolve_dot_segments,
    infrastructure::adapters::{
        upstream::is_hop_by_hop, UpstreamAdapter, UpstreamRequest, UpstreamResponse,
    },
    shared::{error::AppError, logging::LoggingUtils},
};
use bytes::Bytes;
use std::sync::Arc;
use tracing::instrument;
use warp::http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use warp::http::{Method, StatusCode};
use warp::path::FullPath;
use warp::reply::Response;
use warp::Reply;

/// Forward one request upstream
///
/// The path is sent with dot segments resolved, the same form the pipeline
/// evaluated.
#[instrument(skip(path, query, headers, body, upstream), fields(path = %path.as_str()))]
pub async fn handle_proxy_request(
    method: Method,
    path: FullPath,
    query: String,
    headers: HeaderMap,
    body: Bytes,
    upstream: Arc<UpstreamAdapter>,
) -> Result<Response, warp::reject::Rejection> {
    let request_id = headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(LoggingUtils::generate_request_id);

    let request = UpstreamRequest {
        request_id,
        method: method.as_str().to_string(),
        path: resolve_dot_segments(path.as_str()),
        query: if query.is_empty() { None } else { Some(query) },
        headers: headers
            .iter()
            .map(|(name, value)| (name.as_str().to_string(), value.as_bytes().to_vec()))
            .collect(),
        body,
    };

    let response = upstream.forward(request).await.map_err(warp::reject::custom)?;
    into_reply(response).map_err(warp::reject::custom)
}

/// Rebuild the upstream answer as a warp response
pub fn into_reply(upstream: UpstreamResponse) -> Result<Response, AppError> {
    let status = StatusCode::from_u16(upstream.status)
        .map_err(|e| AppError::Upstream(format!("invalid upstream status: {}", e)))?;

    let mut response = upstream.body.to_vec().into_response();
    *response.status_mut() = status;

    let response_headers = response.headers_mut();
    response_headers.remove(CONTENT_TYPE);
    for (name, value) in upstream.headers {
        if is_hop_by_hop(&name) {
            continue;
        }
        // Headers hyper would reject are dropped rather than failing the reply
        let name = HeaderName::from_bytes(name.as_bytes());
        let value = HeaderValue::from_bytes(&value);
        if let (Ok(name), Ok(value)) = (name, value) {
            response_headers.append(name, value);
        }
    }

    Ok(response)
}
