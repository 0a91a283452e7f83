//! Dependency health registry
//!
//! Shared between the health monitor and request handling. Each dependency
//! lives in its own map shard, so readers and the monitor never contend on a
//! process-wide lock.

use crate::domain::health::{ServiceRecord, ServiceStatus};
use crate::shared::logging::LoggingUtils;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::BTreeMap;

/// Registry of dependency name to last known status
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    services: DashMap<String, ServiceRecord>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or overwrite the record for `name`
    pub fn register(&self, name: &str, initial_status: ServiceStatus) {
        self.services
            .insert(name.to_string(), ServiceRecord::new(name, initial_status));
    }

    /// Record a new status, returning the previous one if the name was known
    ///
    /// Unknown names are registered. A status change is logged.
    pub fn update(&self, name: &str, status: ServiceStatus) -> Option<ServiceStatus> {
        let now = Utc::now();
        let previous = match self.services.entry(name.to_string()) {
            Entry::Occupied(mut occupied) => {
                let record = occupied.get_mut();
                let old_status = record.status;
                record.status = status;
                record.last_checked_at = now;
                Some(old_status)
            }
            Entry::Vacant(vacant) => {
                vacant.insert(ServiceRecord {
                    name: name.to_string(),
                    status,
                    last_checked_at: now,
                });
                None
            }
        };

        if let Some(old_status) = previous {
            if old_status != status {
                LoggingUtils::log_status_transition(name, old_status, status);
            }
        }
        previous
    }

    /// True iff `name` is registered and healthy
    pub fn is_available(&self, name: &str) -> bool {
        self.services
            .get(name)
            .map(|record| record.status.is_available())
            .unwrap_or(false)
    }

    /// Copy of one record
    pub fn get(&self, name: &str) -> Option<ServiceRecord> {
        self.services.get(name).map(|record| record.clone())
    }

    /// Snapshot of every record, ordered by name
    pub fn get_status(&self) -> BTreeMap<String, ServiceRecord> {
        self.services
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
