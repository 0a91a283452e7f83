//! Configuration management module
//!
//! This module handles loading and validation of the gateway settings.

pub mod app_config;
pub mod validation;

pub use app_config::AppConfig;
pub use validation::ConfigValidator;
