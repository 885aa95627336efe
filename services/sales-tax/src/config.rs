use std::env;

use common::ServiceConfig;

/// Sales-tax-specific settings layered on top of the generic
/// `ServiceConfig` (bind address, database URL, log level).
pub struct SalesTaxConfig {
    pub base: ServiceConfig,
    pub redis_url: String,
    pub geojson_path: String,
    pub geocoder_provider: GeocoderProvider,
    pub geocoder_url: String,
    pub geocoder_user_agent: String,
}

pub enum GeocoderProvider {
    Polygon,
    Nearest,
    Http,
}

impl SalesTaxConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let base = ServiceConfig::from_env("sales-tax")?;

        let provider = env::var("SALES_TAX_GEOCODER_PROVIDER").unwrap_or_else(|_| "polygon".to_string());
        let geocoder_provider = match provider.as_str() {
            "nearest" => GeocoderProvider::Nearest,
            "http" => GeocoderProvider::Http,
            _ => GeocoderProvider::Polygon,
        };

        Ok(Self {
            redis_url: env::var("SALES_TAX_REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            geojson_path: env::var("SALES_TAX_GEOJSON_PATH").unwrap_or_else(|_| "data/ny_counties.geojson".to_string()),
            geocoder_provider,
            geocoder_url: env::var("SALES_TAX_GEOCODER_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org/reverse".to_string()),
            geocoder_user_agent: env::var("SALES_TAX_GEOCODER_USER_AGENT")
                .unwrap_or_else(|_| "sales-tax-service/0.1".to_string()),
            base,
        })
    }
}
