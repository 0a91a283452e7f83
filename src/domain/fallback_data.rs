//! Built-in fallback payloads
//!
//! Used when no fallback table file is configured. More specific entries
//! come first because the first match wins.

use crate::domain::fallback::{FallbackRouteEntry, FallbackRouteTable};
use serde_json::json;

const SAMPLE_BRAND_ID: &str = "00000000-0000-0000-0000-000000000001";

fn sample_brand() -> serde_json::Value {
    json!({
        "id": SAMPLE_BRAND_ID,
        "name": "Sample Brand",
        "industry": "General",
        "description": "Placeholder brand shown while data is temporarily unavailable",
        "tone": "friendly",
        "colors": ["#1F2937", "#F59E0B"],
    })
}

fn builtin_entries() -> Vec<FallbackRouteEntry> {
    vec![
        FallbackRouteEntry::new("GET", "/api/brands/", json!([])).with_suffix("/content"),
        FallbackRouteEntry::new("GET", "/api/brands/", json!([])).with_suffix("/social-accounts"),
        FallbackRouteEntry::new("GET", "/api/brands/", json!({
            "total_posts": 0,
            "scheduled_posts": 0,
            "published_posts": 0,
            "engagement_rate": 0.0,
        }))
        .with_suffix("/analytics"),
        FallbackRouteEntry::new("GET", "/api/brands/", sample_brand()),
        FallbackRouteEntry::new("GET", "/api/brands", json!([sample_brand()])),
        FallbackRouteEntry::new("GET", "/api/content/calendar", json!({"entries": []})),
        FallbackRouteEntry::new("GET", "/api/content/", json!({
            "id": "00000000-0000-0000-0000-000000000002",
            "brand_id": SAMPLE_BRAND_ID,
            "title": "Content unavailable",
            "body": "",
            "status": "draft",
        })),
        FallbackRouteEntry::new("GET", "/api/content", json!([])),
        FallbackRouteEntry::new("GET", "/api/social/accounts", json!([])),
        FallbackRouteEntry::new("GET", "/api/social/posts", json!([])),
        FallbackRouteEntry::new("GET", "/api/dashboard/stats", json!({
            "brands": 1,
            "content_items": 0,
            "scheduled_posts": 0,
            "connected_accounts": 0,
        })),
        FallbackRouteEntry::new("GET", "/api/users/me", json!({
            "id": "00000000-0000-0000-0000-000000000003",
            "email": "guest@example.com",
            "name": "Guest",
        })),
        FallbackRouteEntry::new("GET", "/api/notifications", json!([])),
    ]
}

impl FallbackRouteTable {
    /// Table shipped with the gateway
    pub fn builtin() -> Self {
        Self::new(builtin_entries()).unwrap_or_default()
    }
}
