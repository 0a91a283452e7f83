//! Infrastructure adapters module
//!
//! This module contains adapters for the monitored dependencies, the upstream
//! business service and metrics.

pub mod datastore;
pub mod monitoring;
pub mod probes;
pub mod upstream;

// Re-export all adapters
pub use datastore::DatastoreGateway;
pub use monitoring::MonitoringAdapter;
pub use probes::{HttpProbe, PostgresProbe, ProbeSet, RedisProbe};
pub use upstream::{UpstreamAdapter, UpstreamRequest, UpstreamResponse};
