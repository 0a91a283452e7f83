use crate::application::services::registry::ServiceRegistry;
use crate::domain::health::OperatingMode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Derives the degraded flag from the primary dependency's status
///
/// The flag is always recomputed from the registry; the published copy only
/// exists to log mode changes once.
#[derive(Debug)]
pub struct DegradationController {
    registry: Arc<ServiceRegistry>,
    primary_dependency: String,
    last_published: AtomicBool,
}

impl DegradationController {
    pub fn new(registry: Arc<ServiceRegistry>, primary_dependency: impl Into<String>) -> Self {
        Self {
            registry,
            primary_dependency: primary_dependency.into(),
            last_published: AtomicBool::new(false),
        }
    }

    /// True iff the primary dependency is not healthy
    pub fn is_degraded(&self) -> bool {
        !self.registry.is_available(&self.primary_dependency)
    }

    pub fn mode(&self) -> OperatingMode {
        OperatingMode::from_degraded(self.is_degraded())
    }

    pub fn primary_dependency(&self) -> &str {
        &self.primary_dependency
    }

    pub fn registry(&self) -> &Arc<ServiceRegistry> {
        &self.registry
    }

    /// Recompute the flag and log when the mode changed since the last call
    pub fn publish(&self) -> bool {
        let degraded = self.is_degraded();
        let previous = self.last_published.swap(degraded, Ordering::AcqRel);
        if previous != degraded {
            if degraded {
                warn!(
                    dependency = %self.primary_dependency,
                    "Entering degraded mode: reads served from fallback data, writes rejected"
                );
            } else {
                info!(
                    dependency = %self.primary_dependency,
                    "Leaving degraded mode: full service restored"
                );
            }
        }
        degraded
    }
}
