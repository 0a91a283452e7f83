//! Health probe adapters
//!
//! One probe per configured dependency. Each performs the cheapest round trip
//! its backend supports; the monitor applies the timeout.

use crate::{
    application::services::{HealthProbe, ServiceRegistry},
    config::app_config::{DependencyConfig, DependencyKind},
    infrastructure::adapters::datastore::DatastoreGateway,
    shared::error::{AppError, AppResult},
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// `SELECT 1` against the primary datastore pool
pub struct PostgresProbe {
    gateway: DatastoreGateway,
}

impl PostgresProbe {
    pub fn new(gateway: DatastoreGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl HealthProbe for PostgresProbe {
    fn name(&self) -> &str {
        self.gateway.name()
    }

    async fn check(&self) -> AppResult<()> {
        self.gateway.ping().await
    }
}

/// `PING` over a fresh multiplexed connection
pub struct RedisProbe {
    name: String,
    client: redis::Client,
}

impl RedisProbe {
    pub fn new(name: impl Into<String>, url: &str) -> AppResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| AppError::Config(format!("Invalid Redis URL: {}", e)))?;
        Ok(Self {
            name: name.into(),
            client,
        })
    }
}

#[async_trait]
impl HealthProbe for RedisProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> AppResult<()> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::probe(&self.name, e))?;

        let reply: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::probe(&self.name, e))?;

        if reply == "PONG" {
            Ok(())
        } else {
            Err(AppError::probe(&self.name, format!("unexpected PING reply: {}", reply)))
        }
    }
}

/// `GET` on a URL; any 2xx is healthy
pub struct HttpProbe {
    name: String,
    url: String,
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            name: name.into(),
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl HealthProbe for HttpProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> AppResult<()> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| AppError::probe(&self.name, e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::probe(&self.name, format!("HTTP {}", response.status())))
        }
    }
}

/// Probes built from configuration, plus the datastore gateways they share
pub struct ProbeSet {
    probes: Vec<Arc<dyn HealthProbe>>,
    gateways: Vec<DatastoreGateway>,
}

impl ProbeSet {
    pub fn from_config(
        dependencies: &[DependencyConfig],
        registry: Arc<ServiceRegistry>,
        probe_timeout: Duration,
    ) -> AppResult<Self> {
        let mut probes: Vec<Arc<dyn HealthProbe>> = Vec::with_capacity(dependencies.len());
        let mut gateways = Vec::new();

        for dependency in dependencies {
            match dependency.kind {
                DependencyKind::Postgres => {
                    let gateway = DatastoreGateway::connect_lazy(
                        &dependency.name,
                        &dependency.url,
                        registry.clone(),
                        probe_timeout,
                    )?;
                    probes.push(Arc::new(PostgresProbe::new(gateway.clone())));
                    gateways.push(gateway);
                }
                DependencyKind::Redis => {
                    probes.push(Arc::new(RedisProbe::new(&dependency.name, &dependency.url)?));
                }
                DependencyKind::Http => {
                    probes.push(Arc::new(HttpProbe::new(
                        &dependency.name,
                        &dependency.url,
                        probe_timeout,
                    )?));
                }
            }
        }

        Ok(Self { probes, gateways })
    }

    pub fn probes(&self) -> &[Arc<dyn HealthProbe>] {
        &self.probes
    }

    pub fn into_probes(self) -> Vec<Arc<dyn HealthProbe>> {
        self.probes
    }

    /// Datastore gateway for a postgres dependency
    pub fn gateway(&self, name: &str) -> Option<&DatastoreGateway> {
        self.gateways.iter().find(|g| g.name() == name)
    }
}
