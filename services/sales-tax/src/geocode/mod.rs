pub mod cache_store;
pub mod http;
pub mod nearest;
pub mod normalize;
pub mod polygon;

use common::ServiceError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use http::HttpResolver;
use nearest::NearestResolver;
use polygon::PolygonResolver;

/// A resolver's answer for one coordinate: jurisdiction names plus whatever
/// payload the provider returned, for audit/debugging on the persisted order.
#[derive(Debug, Clone)]
pub struct GeocodeResult {
    pub state: String,
    pub county: String,
    pub locality: Option<String>,
    pub raw_response: Option<Value>,
    pub lat_rounded: Decimal,
    pub lon_rounded: Decimal,
}

/// Quantizes a coordinate to `scale` decimal places, half away from zero.
pub fn quantize(value: f64, scale: u32) -> Result<Decimal, ServiceError> {
    Decimal::try_from(value)
        .map(|d| d.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero))
        .map_err(|e| ServiceError::Validation(format!("invalid coordinate {}: {}", value, e)))
}

/// Quantizes a coordinate to 4 decimal places, matching the precision used
/// for cache keys and the `geocode_cache` table columns.
pub fn quantize_coord(value: f64) -> Result<Decimal, ServiceError> {
    quantize(value, 4)
}

/// Tagged-enum polymorphism over the three reverse-geocode providers. A
/// trait object would need `async_trait` for the async method; matching on a
/// closed set of variants avoids that dependency entirely.
pub enum Resolver {
    Polygon(PolygonResolver),
    Nearest(NearestResolver),
    Http(HttpResolver),
}

impl Resolver {
    pub fn provider_name(&self) -> &'static str {
        match self {
            Resolver::Polygon(_) => "polygon",
            Resolver::Nearest(_) => "nearest",
            Resolver::Http(_) => "http",
        }
    }

    pub async fn resolve(&self, lat: f64, lon: f64) -> Result<GeocodeResult, ServiceError> {
        let lat_rounded = quantize_coord(lat)?;
        let lon_rounded = quantize_coord(lon)?;

        let mut result = match self {
            Resolver::Polygon(r) => r.resolve(lat, lon).await?,
            Resolver::Nearest(r) => r.resolve(lat, lon).await?,
            Resolver::Http(r) => r.resolve(lat, lon, lat_rounded, lon_rounded).await?,
        };
        result.lat_rounded = lat_rounded;
        result.lon_rounded = lon_rounded;
        Ok(result)
    }
}
