//! Infrastructure layer - External concerns and adapters
//!
//! This module contains dependency probes, the upstream proxy, metrics and
//! HTTP handling.

pub mod adapters;
pub mod http;

// Re-export main adapters
pub use adapters::{DatastoreGateway, MonitoringAdapter, ProbeSet, UpstreamAdapter};
