//! Background health monitor
//!
//! Probes every tracked dependency on a fixed cadence and writes the results
//! into the [`ServiceRegistry`]. Probe failures never escape this module.

use crate::{
    application::services::{degradation::DegradationController, registry::ServiceRegistry},
    domain::health::ServiceStatus,
    infrastructure::adapters::MonitoringAdapter,
    shared::{error::AppResult, logging::LoggingUtils},
};
use async_trait::async_trait;
use futures::future::join_all;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Liveness check for one external dependency
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Registry key of the dependency
    fn name(&self) -> &str;

    /// Minimal round trip; `Ok` means reachable
    async fn check(&self) -> AppResult<()>;
}

/// Outcome of one probe call
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub service: String,
    pub status: ServiceStatus,
    pub duration: Duration,
    pub error: Option<String>,
}

/// Outcome of one monitor tick
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub results: Vec<ProbeResult>,
    pub degraded: bool,
}

impl CycleReport {
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_some()).count()
    }
}

/// Periodic prober feeding the service registry
pub struct HealthMonitor {
    registry: Arc<ServiceRegistry>,
    controller: Arc<DegradationController>,
    probes: Vec<Arc<dyn HealthProbe>>,
    interval: Duration,
    probe_timeout: Duration,
    monitoring: Option<Arc<MonitoringAdapter>>,
}

impl HealthMonitor {
    pub fn new(
        registry: Arc<ServiceRegistry>,
        controller: Arc<DegradationController>,
        probes: Vec<Arc<dyn HealthProbe>>,
        interval: Duration,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            controller,
            probes,
            interval,
            probe_timeout,
            monitoring: None,
        }
    }

    /// Record probe results and the degraded flag as metrics
    pub fn with_monitoring(mut self, monitoring: Arc<MonitoringAdapter>) -> Self {
        self.monitoring = Some(monitoring);
        self
    }

    /// Names of every probed dependency
    pub fn dependency_names(&self) -> Vec<String> {
        self.probes.iter().map(|p| p.name().to_string()).collect()
    }

    /// Register every probed dependency that the registry does not know yet
    ///
    /// New entries start as unavailable until their first probe succeeds.
    pub fn register_dependencies(&self) {
        for probe in &self.probes {
            if self.registry.get(probe.name()).is_none() {
                self.registry.register(probe.name(), ServiceStatus::Unavailable);
            }
        }
    }

    /// Probe every dependency once, update the registry and publish the flag
    pub async fn run_cycle(&self) -> CycleReport {
        let results =
            join_all(self.probes.iter().map(|probe| self.run_probe(probe.as_ref()))).await;

        for result in &results {
            self.registry.update(&result.service, result.status);
            if let Some(monitoring) = &self.monitoring {
                monitoring.record_probe(&result.service, result.error.is_none(), result.duration);
            }
        }

        let degraded = self.controller.publish();
        if let Some(monitoring) = &self.monitoring {
            monitoring.set_degraded(degraded);
        }

        CycleReport { results, degraded }
    }

    async fn run_probe(&self, probe: &dyn HealthProbe) -> ProbeResult {
        let started = Instant::now();
        let outcome = tokio::time::timeout(
            self.probe_timeout,
            AssertUnwindSafe(probe.check()).catch_unwind(),
        )
        .await;
        let duration = started.elapsed();

        let error = match outcome {
            Ok(Ok(Ok(()))) => None,
            Ok(Ok(Err(e))) => Some(e.to_string()),
            Ok(Err(_)) => Some("probe panicked".to_string()),
            Err(_) => Some(format!("timed out after {}ms", self.probe_timeout.as_millis())),
        };

        if let Some(reason) = &error {
            LoggingUtils::log_probe_failure(probe.name(), reason, duration.as_millis() as u64);
        }

        ProbeResult {
            service: probe.name().to_string(),
            status: ServiceStatus::from_probe(error.is_none()),
            duration,
            error,
        }
    }

    /// Run on the tokio runtime until `shutdown` is cancelled
    pub fn spawn(self: Arc<Self>, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown).await })
    }

    /// Tick loop; the first tick fires one interval from now
    ///
    /// Cancellation abandons an in-flight cycle without touching the registry.
    pub async fn run(&self, shutdown: CancellationToken) {
        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            dependencies = ?self.dependency_names(),
            interval_secs = self.interval.as_secs(),
            probe_timeout_ms = self.probe_timeout.as_millis() as u64,
            "Health monitor started"
        );

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    tokio::select! {
                        _ = shutdown.cancelled() => break,
                        report = self.run_cycle() => {
                            debug!(
                                probes = report.results.len(),
                                failures = report.failures(),
                                degraded = report.degraded,
                                "Health monitor cycle complete"
                            );
                        }
                    }
                }
            }
        }

        info!("Health monitor stopped");
    }
}
