//! Application layer - Services and use cases
//! 
//! This module wires the domain model to the dependency registry and exposes
//! the operations the HTTP layer calls.

pub mod services;
pub mod use_cases;

pub use services::*;
pub use use_cases::*;
