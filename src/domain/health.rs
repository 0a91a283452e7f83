use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health status of a tracked dependency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Dependency answered its probe
    Healthy,
    /// Reachable but impaired. Not produced by the built-in probes.
    Degraded,
    /// Probe failed or timed out
    Unavailable,
}

impl ServiceStatus {
    /// Status for a probe outcome
    pub fn from_probe(success: bool) -> Self {
        if success {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Unavailable
        }
    }

    /// Only a healthy dependency counts as available
    pub fn is_available(&self) -> bool {
        matches!(self, ServiceStatus::Healthy)
    }

    /// Short readiness label: `ok` or `unavailable`
    pub fn readiness_label(&self) -> &'static str {
        if self.is_available() {
            "ok"
        } else {
            "unavailable"
        }
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceStatus::Healthy => write!(f, "healthy"),
            ServiceStatus::Degraded => write!(f, "degraded"),
            ServiceStatus::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Last known state of one dependency
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceRecord {
    pub name: String,
    pub status: ServiceStatus,
    pub last_checked_at: DateTime<Utc>,
}

impl ServiceRecord {
    pub fn new(name: impl Into<String>, status: ServiceStatus) -> Self {
        Self {
            name: name.into(),
            status,
            last_checked_at: Utc::now(),
        }
    }
}

/// Operating mode derived from the primary dependency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperatingMode {
    Full,
    Degraded,
}

impl OperatingMode {
    pub fn from_degraded(degraded: bool) -> Self {
        if degraded {
            OperatingMode::Degraded
        } else {
            OperatingMode::Full
        }
    }
}

impl std::fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperatingMode::Full => write!(f, "full"),
            OperatingMode::Degraded => write!(f, "degraded"),
        }
    }
}
