//! Common test utilities and mock implementations
//!
//! Scripted probes and a harness that assembles the full route tree around a
//! recording business layer.

use crate::{
    application::services::{HealthMonitor, HealthProbe},
    config::AppConfig,
    infrastructure::http::{routes::RouteBuilder, server::AppState},
    shared::error::{AppError, AppResult},
};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

/// Probe whose result is switched by the test
pub struct ScriptedProbe {
    name: String,
    healthy: AtomicBool,
    calls: AtomicUsize,
}

impl ScriptedProbe {
    pub fn new(name: &str, healthy: bool) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            healthy: AtomicBool::new(healthy),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HealthProbe for ScriptedProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::probe(&self.name, "connection refused"))
        }
    }
}

/// A request as seen by the business layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Bytes,
}

/// Business layer stand-in that records every request it receives
#[derive(Clone, Default)]
pub struct RecordingBusiness {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl RecordingBusiness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Answers 299 so tests can tell business replies from interceptor replies
    pub fn filter(
        &self,
    ) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone + Send + Sync + 'static {
        let requests = self.requests.clone();
        warp::method()
            .and(warp::path::full())
            .and(warp::body::bytes())
            .map(move |method: warp::http::Method, path: warp::path::FullPath, body: Bytes| {
                requests.lock().unwrap().push(RecordedRequest {
                    method: method.as_str().to_string(),
                    path: path.as_str().to_string(),
                    body,
                });
                let status = warp::http::StatusCode::from_u16(299).unwrap();
                warp::reply::with_status("business", status).into_response()
            })
    }
}

/// Full route tree with scripted dependencies
pub struct TestHarness {
    pub state: AppState,
    pub monitor: Arc<HealthMonitor>,
    pub datastore: Arc<ScriptedProbe>,
    pub cache: Arc<ScriptedProbe>,
    pub business: RecordingBusiness,
}

impl TestHarness {
    /// Build with dependencies registered as unavailable, before any probe cycle
    pub fn new(config: AppConfig) -> Self {
        let state = AppState::new(config).unwrap();
        let datastore = ScriptedProbe::new("primary_datastore", true);
        let cache = ScriptedProbe::new("cache", true);

        let monitor = Arc::new(
            HealthMonitor::new(
                state.registry.clone(),
                state.controller.clone(),
                vec![
                    datastore.clone() as Arc<dyn HealthProbe>,
                    cache.clone() as Arc<dyn HealthProbe>,
                ],
                state.config.monitor.interval(),
                state.config.monitor.probe_timeout(),
            )
            .with_monitoring(state.monitoring.clone()),
        );
        monitor.register_dependencies();

        Self {
            state,
            monitor,
            datastore,
            cache,
            business: RecordingBusiness::new(),
        }
    }

    /// Harness after one probe cycle with the given outcomes
    pub async fn with_probes(
        config: AppConfig,
        datastore_healthy: bool,
        cache_healthy: bool,
    ) -> Self {
        let harness = Self::new(config);
        harness.datastore.set_healthy(datastore_healthy);
        harness.cache.set_healthy(cache_healthy);
        harness.monitor.run_cycle().await;
        harness
    }

    pub fn routes(
        &self,
    ) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone + Send + Sync + 'static {
        RouteBuilder::build_routes(&self.state, self.business.filter())
    }
}
