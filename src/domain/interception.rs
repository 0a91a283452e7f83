use serde_json::Value;

/// How the degradation layer treats an HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodClass {
    /// Safe to answer from fallback data
    Read,
    /// Changes state; unsafe to fake
    Mutating,
    /// HEAD, OPTIONS and friends
    Other,
}

impl MethodClass {
    pub fn of(method: &str) -> Self {
        if method.eq_ignore_ascii_case("GET") {
            MethodClass::Read
        } else if ["POST", "PUT", "PATCH", "DELETE"]
            .iter()
            .any(|m| m.eq_ignore_ascii_case(method))
        {
            MethodClass::Mutating
        } else {
            MethodClass::Other
        }
    }
}

/// Result of evaluating one request against the degradation rules
#[derive(Debug, Clone, PartialEq)]
pub enum InterceptOutcome {
    /// Primary dependency is healthy
    NotDegraded,
    /// Path matches a passthrough rule
    Exempt,
    /// Canned read response, already carrying the degraded marker
    FallbackServed(Value),
    /// Mutating request on a protected path
    Blocked { dependency: String },
    /// Degraded, but no rule applies (e.g. a read with no fallback); the business layer answers
    Unmatched,
}

impl InterceptOutcome {
    /// Whether the request continues to the business layer
    pub fn forwards(&self) -> bool {
        matches!(
            self,
            InterceptOutcome::NotDegraded | InterceptOutcome::Exempt | InterceptOutcome::Unmatched
        )
    }

    /// Metric and log label
    pub fn label(&self) -> &'static str {
        match self {
            InterceptOutcome::NotDegraded => "not_degraded",
            InterceptOutcome::Exempt => "exempt",
            InterceptOutcome::FallbackServed(_) => "fallback_served",
            InterceptOutcome::Blocked { .. } => "blocked",
            InterceptOutcome::Unmatched => "unmatched",
        }
    }
}
