//! Upstream adapter for the business service
//!
//! In gateway mode the business layer runs as a separate HTTP service.
//! Requests the degradation layer lets through are forwarded unchanged.

use crate::{
    infrastructure::adapters::MonitoringAdapter,
    shared::error::{AppError, AppResult},
};
use bytes::Bytes;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Headers that describe a single connection and are never forwarded
const HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
    "content-length",
];

pub fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(name))
}

/// Request to replay against the business service
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub request_id: String,
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: Vec<(String, Vec<u8>)>,
    pub body: Bytes,
}

/// Business service answer, returned verbatim
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub headers: Vec<(String, Vec<u8>)>,
    pub body: Bytes,
}

/// Adapter for the upstream business service
pub struct UpstreamAdapter {
    client: reqwest::Client,
    base_url: String,
    monitoring: Option<Arc<MonitoringAdapter>>,
}

impl UpstreamAdapter {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            monitoring: None,
        })
    }

    pub fn with_monitoring(mut self, monitoring: Arc<MonitoringAdapter>) -> Self {
        self.monitoring = Some(monitoring);
        self
    }

    pub fn target_url(&self, path: &str, query: Option<&str>) -> String {
        match query.filter(|q| !q.is_empty()) {
            Some(query) => format!("{}{}?{}", self.base_url, path, query),
            None => format!("{}{}", self.base_url, path),
        }
    }

    /// Send the request upstream and collect the full response
    pub async fn forward(&self, request: UpstreamRequest) -> AppResult<UpstreamResponse> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| AppError::Validation(format!("Invalid HTTP method: {}", e)))?;
        let url = self.target_url(&request.path, request.query.as_deref());

        debug!(
            request_id = %request.request_id,
            method = %request.method,
            url = %url,
            "Forwarding request to business service"
        );

        let mut builder = self.client.request(method, &url);
        for (name, value) in &request.headers {
            if !is_hop_by_hop(name) {
                builder = builder.header(name.as_str(), value.as_slice());
            }
        }
        if !request.headers.iter().any(|(name, _)| name.eq_ignore_ascii_case("x-request-id")) {
            builder = builder.header("x-request-id", request.request_id.as_str());
        }

        let started = Instant::now();
        let result = builder.body(request.body).send().await;
        if let Some(monitoring) = &self.monitoring {
            monitoring.record_upstream_latency(started.elapsed());
        }

        let response = result.map_err(|e| {
            warn!(request_id = %request.request_id, error = %e, "Business service unreachable");
            AppError::Upstream(format!("business service unreachable: {}", e))
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter(|(name, _)| !is_hop_by_hop(name.as_str()))
            .map(|(name, value)| (name.as_str().to_string(), value.as_bytes().to_vec()))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| {
                AppError::Upstream(format!("failed to read business service response: {}", e))
            })?;

        Ok(UpstreamResponse { status, headers, body })
    }
}
