use crate::{
    application::services::DegradationController,
    domain::health::{OperatingMode, ServiceRecord, ServiceStatus},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Readiness answer: ready iff the primary dependency is healthy
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessReport {
    /// `ready` or `not_ready`
    pub status: &'static str,
    /// Dependency name to `ok` / `unavailable`
    #[serde(flatten)]
    pub dependencies: BTreeMap<String, &'static str>,
}

impl ReadinessReport {
    /// Status and per-dependency labels both come from the one snapshot
    pub fn from_snapshot(primary: &str, snapshot: &BTreeMap<String, ServiceRecord>) -> Self {
        let ready = snapshot
            .get(primary)
            .is_some_and(|record| record.status.is_available());

        Self {
            status: if ready { "ready" } else { "not_ready" },
            dependencies: snapshot
                .iter()
                .map(|(name, record)| (name.clone(), record.status.readiness_label()))
                .collect(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }

    pub fn http_status_code(&self) -> u16 {
        if self.is_ready() {
            200
        } else {
            503
        }
    }
}

/// One dependency in the detailed status view
#[derive(Debug, Clone, Serialize)]
pub struct ServiceSnapshot {
    pub status: ServiceStatus,
    pub last_check: DateTime<Utc>,
}

/// Detailed status: full registry plus derived mode
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub mode: OperatingMode,
    pub services: BTreeMap<String, ServiceSnapshot>,
}

/// Health check use case
///
/// Reads registry state only; never performs I/O.
pub struct HealthCheckUseCase {
    controller: Arc<DegradationController>,
}

impl HealthCheckUseCase {
    pub fn new(controller: Arc<DegradationController>) -> Self {
        Self { controller }
    }

    /// Liveness is independent of dependency health
    pub fn liveness(&self) -> Value {
        json!({ "status": "alive" })
    }

    pub fn readiness(&self) -> ReadinessReport {
        let snapshot = self.controller.registry().get_status();
        ReadinessReport::from_snapshot(self.controller.primary_dependency(), &snapshot)
    }

    /// Mode is derived from the same snapshot as the service list
    pub fn status(&self) -> StatusReport {
        let snapshot = self.controller.registry().get_status();
        let degraded = !snapshot
            .get(self.controller.primary_dependency())
            .is_some_and(|record| record.status.is_available());

        let services = snapshot
            .into_iter()
            .map(|(name, record)| {
                (
                    name,
                    ServiceSnapshot {
                        status: record.status,
                        last_check: record.last_checked_at,
                    },
                )
            })
            .collect();

        StatusReport {
            mode: OperatingMode::from_degraded(degraded),
            services,
        }
    }
}
