//! Domain layer - Core degradation model
//! 
//! This module contains dependency health types, fallback routing rules and
//! interception outcomes. Nothing here performs I/O.

pub mod fallback;
pub mod fallback_data;
pub mod health;
pub mod interception;

pub use fallback::{FallbackRouteEntry, FallbackRouteTable, PassthroughRule};
pub use health::{OperatingMode, ServiceRecord, ServiceStatus};
pub use interception::{InterceptOutcome, MethodClass};
