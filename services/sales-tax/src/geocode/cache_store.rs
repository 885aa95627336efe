use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::GeocodeCacheEntry;

/// Durable key/value cache of resolver outputs keyed by (provider,
/// rounded-coord). A unique-key collision on insert (two workers racing for
/// the same bucket) is a benign "already present" outcome, never an error.
pub struct CacheStore {
    pool: PgPool,
}

impl CacheStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, cache_key: &str) -> Result<Option<GeocodeCacheEntry>, sqlx::Error> {
        sqlx::query_as::<_, GeocodeCacheEntry>(
            r#"SELECT cache_key, provider, lat_rounded, lon_rounded, state, county, locality, raw_response, created_at
               FROM geocode_cache WHERE cache_key = $1"#,
        )
        .bind(cache_key)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn put(
        &self,
        provider: &str,
        lat_rounded: Decimal,
        lon_rounded: Decimal,
        state: &str,
        county: &str,
        locality: Option<&str>,
        raw_response: Option<serde_json::Value>,
    ) -> Result<(), sqlx::Error> {
        let cache_key = GeocodeCacheEntry::key_for(provider, lat_rounded, lon_rounded);
        sqlx::query(
            r#"INSERT INTO geocode_cache (cache_key, provider, lat_rounded, lon_rounded, state, county, locality, raw_response)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               ON CONFLICT (cache_key) DO NOTHING"#,
        )
        .bind(cache_key)
        .bind(provider)
        .bind(lat_rounded)
        .bind(lon_rounded)
        .bind(state)
        .bind(county)
        .bind(locality)
        .bind(raw_response)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
