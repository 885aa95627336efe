use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A durable cache row of a resolver output, keyed by (provider, rounded-coord).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GeocodeCacheEntry {
    pub cache_key: String,
    pub provider: String,
    pub lat_rounded: Decimal,
    pub lon_rounded: Decimal,
    pub state: String,
    pub county: String,
    pub locality: Option<String>,
    pub raw_response: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl GeocodeCacheEntry {
    /// Canonical cache key: `{provider}_{lat4}_{lon4}`, fixed-point, no trailing
    /// zeros stripped.
    pub fn key_for(provider: &str, lat_rounded: Decimal, lon_rounded: Decimal) -> String {
        format!("{}_{}_{}", provider, lat_rounded, lon_rounded)
    }
}
