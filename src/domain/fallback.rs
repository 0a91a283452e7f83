//! Degraded-mode routing rules
//!
//! A fallback table maps read routes to canned payloads; passthrough rules
//! name path prefixes that are never touched by the degradation layer.

use crate::shared::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Marker added to object payloads so callers can tell synthetic data apart
pub const DEGRADED_MARKER: &str = "degraded";

/// One canned response for a read route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FallbackRouteEntry {
    pub method: String,
    pub path_prefix: String,
    /// Empty or missing matches any path under the prefix
    #[serde(default)]
    pub path_suffix: Option<String>,
    pub payload: Value,
}

impl FallbackRouteEntry {
    pub fn new(method: &str, path_prefix: impl Into<String>, payload: Value) -> Self {
        Self {
            method: method.to_ascii_uppercase(),
            path_prefix: path_prefix.into(),
            path_suffix: None,
            payload,
        }
    }

    pub fn with_suffix(mut self, path_suffix: impl Into<String>) -> Self {
        self.path_suffix = Some(path_suffix.into());
        self
    }

    fn suffix(&self) -> Option<&str> {
        self.path_suffix.as_deref().filter(|s| !s.is_empty())
    }

    /// Prefix match plus, when set, a suffix match that does not overlap the prefix
    pub fn matches(&self, method: &str, path: &str) -> bool {
        if !self.method.eq_ignore_ascii_case(method) {
            return false;
        }
        let path = normalize_path(path);
        if !path.starts_with(self.path_prefix.as_str()) {
            return false;
        }
        match self.suffix() {
            Some(suffix) => {
                path.len() >= self.path_prefix.len() + suffix.len() && path.ends_with(suffix)
            }
            None => true,
        }
    }

    /// Body served while degraded
    pub fn response_body(&self) -> Value {
        let mut body = self.payload.clone();
        if let Value::Object(map) = &mut body {
            map.insert(DEGRADED_MARKER.to_string(), Value::Bool(true));
        }
        body
    }
}

/// Path prefix exempt from degradation handling
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PassthroughRule {
    pub path_prefix: String,
}

impl PassthroughRule {
    pub fn new(path_prefix: impl Into<String>) -> Self {
        Self {
            path_prefix: path_prefix.into(),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        prefix_matches(&self.path_prefix, path)
    }
}

/// Ordered fallback table; the first matching entry wins
#[derive(Debug, Clone, Default)]
pub struct FallbackRouteTable {
    entries: Vec<FallbackRouteEntry>,
}

impl FallbackRouteTable {
    /// Build a table, rejecting entries that could never be served
    pub fn new(entries: Vec<FallbackRouteEntry>) -> AppResult<Self> {
        for (index, entry) in entries.iter().enumerate() {
            if !entry.method.eq_ignore_ascii_case("GET") {
                return Err(AppError::Validation(format!(
                    "fallback route #{} ({} {}): only GET routes can be served from fallback data",
                    index, entry.method, entry.path_prefix
                )));
            }
            if !entry.path_prefix.starts_with('/') {
                return Err(AppError::Validation(format!(
                    "fallback route #{}: path prefix '{}' must start with '/'",
                    index, entry.path_prefix
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Parse a JSON array of entries
    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        let entries: Vec<FallbackRouteEntry> = serde_json::from_str(raw)?;
        Self::new(entries)
    }

    /// Load a table from a JSON file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read fallback table {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn find(&self, method: &str, path: &str) -> Option<&FallbackRouteEntry> {
        self.entries.iter().find(|entry| entry.matches(method, path))
    }

    pub fn entries(&self) -> &[FallbackRouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Drop a trailing slash so `/api/brands/` and `/api/brands` route alike
pub fn normalize_path(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

/// Prefix test with both sides normalised; `/api/` also covers `/api`
pub fn prefix_matches(prefix: &str, path: &str) -> bool {
    let path = normalize_path(path);
    path.starts_with(prefix) || path == normalize_path(prefix)
}

/// Resolve `.` and `..` segments the way URL parsing does
///
/// Percent-encoded dots (`%2e`) and backslash separators count too, so the
/// result is the path an HTTP client sends once the request is re-issued.
pub fn resolve_dot_segments(path: &str) -> String {
    let raw = path.strip_prefix('/').unwrap_or(path);
    let mut segments: Vec<&str> = Vec::new();
    let mut trailing_slash = false;

    for segment in raw.split(['/', '\\']) {
        trailing_slash = false;
        let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
        match decoded.as_str() {
            "." => trailing_slash = true,
            ".." => {
                segments.pop();
                trailing_slash = true;
            }
            _ => segments.push(segment),
        }
    }

    let mut resolved = format!("/{}", segments.join("/"));
    if trailing_slash && !resolved.ends_with('/') {
        resolved.push('/');
    }
    resolved
}
