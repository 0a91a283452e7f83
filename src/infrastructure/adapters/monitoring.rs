//! Monitoring adapter for metrics and observability
//!
//! This adapter owns the Prometheus registry for probe results, the degraded
//! flag and degraded-mode interceptions.

use crate::shared::error::AppResult;
use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
};
use std::time::Duration;

/// Adapter for monitoring and metrics services
pub struct MonitoringAdapter {
    prometheus_registry: Registry,
    interceptions: IntCounterVec,
    probe_checks: IntCounterVec,
    probe_duration: HistogramVec,
    degraded: IntGauge,
    upstream_latency: Histogram,
}

impl MonitoringAdapter {
    /// Create a new monitoring adapter
    pub fn new() -> AppResult<Self> {
        let registry = Registry::new();

        let interceptions = IntCounterVec::new(
            Opts::new(
                "resilience_interceptions_total",
                "Requests evaluated by the degradation guard",
            ),
            &["outcome"],
        )?;
        let probe_checks = IntCounterVec::new(
            Opts::new("resilience_probe_checks_total", "Dependency probe results"),
            &["service", "result"],
        )?;
        let probe_duration = HistogramVec::new(
            HistogramOpts::new(
                "resilience_probe_duration_seconds",
                "Dependency probe duration in seconds",
            ),
            &["service"],
        )?;
        let degraded = IntGauge::new(
            "resilience_degraded",
            "1 while the primary dependency is unavailable",
        )?;
        let upstream_latency = Histogram::with_opts(HistogramOpts::new(
            "resilience_upstream_duration_seconds",
            "Time spent forwarding requests to the business layer",
        ))?;

        registry.register(Box::new(interceptions.clone()))?;
        registry.register(Box::new(probe_checks.clone()))?;
        registry.register(Box::new(probe_duration.clone()))?;
        registry.register(Box::new(degraded.clone()))?;
        registry.register(Box::new(upstream_latency.clone()))?;

        Ok(Self {
            prometheus_registry: registry,
            interceptions,
            probe_checks,
            probe_duration,
            degraded,
            upstream_latency,
        })
    }

    /// Count one degradation-guard decision
    pub fn record_interception(&self, outcome: &str) {
        self.interceptions.with_label_values(&[outcome]).inc();
    }

    /// Count one probe call
    pub fn record_probe(&self, service: &str, success: bool, duration: Duration) {
        let result = if success { "success" } else { "failure" };
        self.probe_checks.with_label_values(&[service, result]).inc();
        self.probe_duration
            .with_label_values(&[service])
            .observe(duration.as_secs_f64());
    }

    pub fn set_degraded(&self, degraded: bool) {
        self.degraded.set(i64::from(degraded));
    }

    pub fn record_upstream_latency(&self, duration: Duration) {
        self.upstream_latency.observe(duration.as_secs_f64());
    }

    pub fn interception_count(&self, outcome: &str) -> u64 {
        self.interceptions.with_label_values(&[outcome]).get()
    }

    pub fn probe_count(&self, service: &str, success: bool) -> u64 {
        let result = if success { "success" } else { "failure" };
        self.probe_checks.with_label_values(&[service, result]).get()
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.get() == 1
    }

    /// Get Prometheus metrics in text format
    pub fn get_prometheus_metrics(&self) -> AppResult<String> {
        let mut buffer = Vec::new();
        let encoder = prometheus::TextEncoder::new();
        encoder.encode(&self.prometheus_registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| {
            crate::shared::error::AppError::Internal(format!("metrics encoding: {}", e))
        })
    }
}
