use std::sync::Arc;
use std::time::Duration;

use common::ServiceError;
use leaky_bucket::RateLimiter;
use rust_decimal::Decimal;

use crate::geocode::cache_store::CacheStore;
use crate::geocode::normalize::normalize_county;
use crate::geocode::GeocodeResult;
use crate::models::GeocodeCacheEntry;

const LOCALITY_FIELDS: &[&str] = &["city", "town", "village", "hamlet"];

/// Online reverse-geocode provider. Checks the durable cache before ever
/// making a network call, and throttles outbound calls to at most one every
/// 1.1 seconds per process, matching the upstream provider's usage policy.
/// Cache misses are never negatively cached: a failed lookup is retried on
/// the next request for the same bucket.
pub struct HttpResolver {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
    cache: Arc<CacheStore>,
    limiter: RateLimiter,
}

impl HttpResolver {
    pub fn new(base_url: String, user_agent: String, cache: Arc<CacheStore>) -> Self {
        let limiter = RateLimiter::builder()
            .max(1)
            .initial(1)
            .refill(1)
            .interval(Duration::from_millis(1100))
            .build();

        Self {
            client: reqwest::Client::new(),
            base_url,
            user_agent,
            cache,
            limiter,
        }
    }

    pub async fn resolve(
        &self,
        lat: f64,
        lon: f64,
        lat_rounded: Decimal,
        lon_rounded: Decimal,
    ) -> Result<GeocodeResult, ServiceError> {
        let cache_key = GeocodeCacheEntry::key_for("http", lat_rounded, lon_rounded);

        if let Some(entry) = self
            .cache
            .get(&cache_key)
            .await
            .map_err(|e| ServiceError::Database(e))?
        {
            return Ok(GeocodeResult {
                state: entry.state,
                county: entry.county,
                locality: entry.locality,
                raw_response: entry.raw_response,
                lat_rounded: Default::default(),
                lon_rounded: Default::default(),
            });
        }

        self.limiter.acquire(1).await;

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("format", "jsonv2".to_string()),
            ])
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| ServiceError::ExternalService(format!("reverse geocode request failed: {}", e)))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ServiceError::ExternalService(format!("reverse geocode response was not JSON: {}", e)))?;

        let address = body.get("address").cloned().unwrap_or(serde_json::json!({}));

        let state_raw = address.get("state").and_then(serde_json::Value::as_str).unwrap_or("");
        let county_raw = address.get("county").and_then(serde_json::Value::as_str).unwrap_or("");
        let locality_raw = LOCALITY_FIELDS
            .iter()
            .find_map(|field| address.get(*field).and_then(serde_json::Value::as_str))
            .unwrap_or("");

        let state = if state_raw.is_empty() { "Out of State".to_string() } else { state_raw.to_string() };
        let county = normalize_county(county_raw, locality_raw);
        let locality = if locality_raw.is_empty() { None } else { Some(locality_raw.to_string()) };

        self.cache
            .put(
                "http",
                lat_rounded,
                lon_rounded,
                &state,
                &county,
                locality.as_deref(),
                Some(body.clone()),
            )
            .await
            .map_err(|e| ServiceError::Database(e))?;

        Ok(GeocodeResult {
            state,
            county,
            locality,
            raw_response: Some(body),
            lat_rounded: Default::default(),
            lon_rounded: Default::default(),
        })
    }
}
