//! Primary datastore gateway
//!
//! Owns the Postgres pool. The pool connects lazily so the process starts even
//! while the datastore is down.

use crate::{
    application::services::ServiceRegistry,
    shared::error::{AppError, AppResult},
};
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Postgres;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Handle on the primary datastore pool
#[derive(Clone)]
pub struct DatastoreGateway {
    name: String,
    pool: PgPool,
    registry: Arc<ServiceRegistry>,
}

impl DatastoreGateway {
    /// Build a pool without connecting
    pub fn connect_lazy(
        name: impl Into<String>,
        url: &str,
        registry: Arc<ServiceRegistry>,
        acquire_timeout: Duration,
    ) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(acquire_timeout)
            .connect_lazy(url)
            .map_err(|e| AppError::Config(format!("Invalid datastore URL: {}", e)))?;

        Ok(Self {
            name: name.into(),
            pool,
            registry,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Minimal round trip used by the health probe
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::probe(&self.name, e))
    }

    /// Acquire a connection, or `None` when the datastore is unreachable
    ///
    /// Returns immediately while the registry marks the datastore unavailable,
    /// so callers never wait on a connect timeout during an outage.
    pub async fn try_acquire(&self) -> Option<PoolConnection<Postgres>> {
        if !self.registry.is_available(&self.name) {
            debug!(dependency = %self.name, "Skipping datastore acquire: dependency unavailable");
            return None;
        }

        match self.pool.acquire().await {
            Ok(connection) => Some(connection),
            Err(e) => {
                warn!(dependency = %self.name, error = %e, "Datastore acquire failed");
                None
            }
        }
    }
}
