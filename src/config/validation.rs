//! Configuration validation module
//!
//! This module provides cross-field validation logic for configuration
//! beyond the basic validator crate validation.

use crate::config::app_config::{DependencyConfig, MonitorConfig, PipelineConfig};
use crate::config::AppConfig;
use crate::shared::error::AppError;
use std::collections::HashSet;

/// Request stages the pipeline knows how to build
pub const KNOWN_STAGES: &[&str] = &["rate_limit", "degradation"];

/// Key used by the readiness payload; a dependency may not shadow it
const RESERVED_DEPENDENCY_NAME: &str = "status";

/// Configuration validator for additional validation logic
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the complete configuration
    pub fn validate_config(config: &AppConfig) -> crate::Result<()> {
        Self::validate_monitor_config(&config.monitor)?;
        Self::validate_dependencies(&config.dependencies)?;
        Self::validate_primary_dependency(config)?;
        Self::validate_pipeline_config(&config.pipeline)?;
        Self::validate_logging_format(&config.logging.format)?;

        if !config.degradation.protected_prefix.starts_with('/') {
            return Err(AppError::Validation(
                "Protected prefix must start with '/'".to_string(),
            ));
        }

        Ok(())
    }

    /// A probe must finish well inside one monitor interval
    fn validate_monitor_config(monitor: &MonitorConfig) -> crate::Result<()> {
        if monitor.probe_timeout_seconds * 2 > monitor.interval_seconds {
            return Err(AppError::Validation(format!(
                "Probe timeout ({}s) must not exceed half the monitor interval ({}s)",
                monitor.probe_timeout_seconds, monitor.interval_seconds
            )));
        }
        Ok(())
    }

    fn validate_dependencies(dependencies: &[DependencyConfig]) -> crate::Result<()> {
        let mut seen = HashSet::new();

        for dependency in dependencies {
            if dependency.name.trim().is_empty() {
                return Err(AppError::Validation("Dependency name cannot be empty".to_string()));
            }
            if dependency.name == RESERVED_DEPENDENCY_NAME {
                return Err(AppError::Validation(format!(
                    "Dependency name '{}' is reserved",
                    RESERVED_DEPENDENCY_NAME
                )));
            }
            if !seen.insert(dependency.name.as_str()) {
                return Err(AppError::Validation(format!(
                    "Duplicate dependency name: {}",
                    dependency.name
                )));
            }

            let scheme = dependency.url.split("://").next().unwrap_or_default();
            if !dependency.kind.schemes().contains(&scheme) {
                return Err(AppError::Validation(format!(
                    "Dependency {} has URL scheme '{}', expected one of {:?}",
                    dependency.name,
                    scheme,
                    dependency.kind.schemes()
                )));
            }
        }

        Ok(())
    }

    fn validate_primary_dependency(config: &AppConfig) -> crate::Result<()> {
        let primary = &config.degradation.primary_dependency;
        if config.dependency(primary).is_none() {
            return Err(AppError::Validation(format!(
                "Primary dependency '{}' is not declared in dependencies",
                primary
            )));
        }
        Ok(())
    }

    fn validate_pipeline_config(pipeline: &PipelineConfig) -> crate::Result<()> {
        let mut seen = HashSet::new();

        for stage in &pipeline.stages {
            if !KNOWN_STAGES.contains(&stage.as_str()) {
                return Err(AppError::Validation(format!("Unknown pipeline stage: {}", stage)));
            }
            if !seen.insert(stage.as_str()) {
                return Err(AppError::Validation(format!("Duplicate pipeline stage: {}", stage)));
            }
        }

        if !seen.contains("degradation") {
            return Err(AppError::Validation(
                "Pipeline must include the degradation stage".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_logging_format(format: &str) -> crate::Result<()> {
        if !["json", "text"].contains(&format) {
            return Err(AppError::Validation(format!("Invalid log format: {}", format)));
        }
        Ok(())
    }
}
