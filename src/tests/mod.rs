//! Cross-module test suite
//!
//! Scenario tests that drive the registry, monitor, pipeline and health
//! routes together through `warp::test`.

pub mod common;
pub mod integration;

/// Test configuration and utilities
pub mod config {
    use crate::config::AppConfig;
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initialize test environment
    pub fn init() {
        INIT.call_once(|| {
            // Initialize tracing for tests
            let _ = tracing_subscriber::fmt()
                .with_env_filter("debug")
                .with_test_writer()
                .try_init();
        });
    }

    /// Create test configuration
    pub fn test_config() -> AppConfig {
        let mut config = AppConfig::default();

        // Configure for testing
        config.server.port = 0; // Use random port
        config.server.bind_address = "127.0.0.1".parse().unwrap();
        config.rate_limit.enabled = false;
        config.monitor.interval_seconds = 10;
        config.monitor.probe_timeout_seconds = 1;

        config
    }

    /// Test configuration with a tight global rate limit
    pub fn rate_limited_test_config(burst_size: u32) -> AppConfig {
        let mut config = test_config();
        config.rate_limit.enabled = true;
        config.rate_limit.requests_per_minute = 1;
        config.rate_limit.burst_size = burst_size;
        config
    }
}

/// Test result types
pub type TestResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Test utilities and helpers
pub mod utils {
    use serde_json::Value;
    use std::time::Duration;
    use tokio::time::{sleep, Instant};

    /// Wait for a condition to be true; follows the tokio clock, so paused tests advance it
    pub async fn wait_for<F, Fut>(mut condition: F, timeout: Duration) -> bool
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = bool>,
    {
        let start = Instant::now();
        while start.elapsed() < timeout {
            if condition().await {
                return true;
            }
            sleep(Duration::from_millis(10)).await;
        }
        false
    }

    /// Parse a response body as JSON
    pub fn json_body(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    /// Assert the 503 body returned for blocked writes
    pub fn assert_degraded_error(body: &Value) {
        assert!(body.is_object());
        assert_eq!(body["degraded"], true);
        assert!(body["detail"].as_str().is_some_and(|detail| !detail.is_empty()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_initialization() {
        config::init();
        let test_config = config::test_config();
        assert!(!test_config.rate_limit.enabled);
        assert!(test_config.validate_config().is_ok());
        assert!(crate::config::ConfigValidator::validate_config(&test_config).is_ok());
    }

    #[test]
    fn test_rate_limited_config() {
        let config = config::rate_limited_test_config(2);
        assert!(config.rate_limit.enabled);
        assert_eq!(config.rate_limit.burst_size, 2);
    }

    #[test]
    fn test_degraded_error_assertion() {
        utils::assert_degraded_error(&serde_json::json!({
            "detail": "primary_datastore unavailable, this operation requires it",
            "degraded": true,
        }));
    }
}
