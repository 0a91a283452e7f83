//! Degraded-mode request interception
//!
//! Rules are evaluated once per request, in order: not degraded, passthrough
//! prefix, fallback read, blocked write, otherwise forward.

use crate::{
    application::services::DegradationController,
    domain::{
        fallback::{prefix_matches, FallbackRouteTable, PassthroughRule},
        interception::{InterceptOutcome, MethodClass},
    },
};
use std::sync::Arc;

/// Decides how a request is handled while the primary dependency is down
pub struct RequestInterceptor {
    controller: Arc<DegradationController>,
    table: FallbackRouteTable,
    passthrough: Vec<PassthroughRule>,
    protected_prefix: String,
}

impl RequestInterceptor {
    pub fn new(
        controller: Arc<DegradationController>,
        table: FallbackRouteTable,
        passthrough: Vec<PassthroughRule>,
        protected_prefix: impl Into<String>,
    ) -> Self {
        Self {
            controller,
            table,
            passthrough,
            protected_prefix: protected_prefix.into(),
        }
    }

    pub fn evaluate(&self, method: &str, path: &str) -> InterceptOutcome {
        if !self.controller.is_degraded() {
            return InterceptOutcome::NotDegraded;
        }
        self.evaluate_degraded(method, path)
    }

    /// Rules 2-5, assuming degraded mode
    pub fn evaluate_degraded(&self, method: &str, path: &str) -> InterceptOutcome {
        if self.is_passthrough(path) {
            return InterceptOutcome::Exempt;
        }

        match MethodClass::of(method) {
            MethodClass::Read => match self.table.find(method, path) {
                Some(entry) => InterceptOutcome::FallbackServed(entry.response_body()),
                None => InterceptOutcome::Unmatched,
            },
            MethodClass::Mutating if self.is_protected(path) => InterceptOutcome::Blocked {
                dependency: self.controller.primary_dependency().to_string(),
            },
            _ => InterceptOutcome::Unmatched,
        }
    }

    pub fn is_passthrough(&self, path: &str) -> bool {
        self.passthrough.iter().any(|rule| rule.matches(path))
    }

    pub fn is_protected(&self, path: &str) -> bool {
        prefix_matches(&self.protected_prefix, path)
    }

    pub fn table(&self) -> &FallbackRouteTable {
        &self.table
    }

    pub fn controller(&self) -> &Arc<DegradationController> {
        &self.controller
    }
}
