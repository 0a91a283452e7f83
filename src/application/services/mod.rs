//! Application services
//! 
//! Registry, degradation flag and background monitor. These are constructed
//! once at startup and shared by handle.

pub mod degradation;
pub mod monitor;
pub mod registry;

pub use degradation::DegradationController;
pub use monitor::{CycleReport, HealthMonitor, HealthProbe, ProbeResult};
pub use registry::ServiceRegistry;
