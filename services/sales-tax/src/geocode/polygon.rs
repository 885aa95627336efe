use common::ServiceError;
use once_cell::sync::OnceCell;
use serde_json::Value;

use crate::geocode::normalize::normalize_county;
use crate::geocode::GeocodeResult;
use crate::geometry::find_containing_feature;

/// Loads a GeoJSON file of county polygons once, lazily, and holds it for the
/// process lifetime. Initialization is safe under concurrent first use: the
/// `OnceCell` guarantees only one caller ever runs the loader, and every
/// other caller blocks on (then shares) its result.
pub struct PolygonResolver {
    path: String,
    geojson: OnceCell<Value>,
}

impl PolygonResolver {
    pub fn new(path: String) -> Self {
        Self {
            path,
            geojson: OnceCell::new(),
        }
    }

    fn geojson(&self) -> Result<&Value, ServiceError> {
        self.geojson.get_or_try_init(|| {
            let contents = std::fs::read_to_string(&self.path)
                .map_err(|e| ServiceError::Internal(format!("failed to read geojson file {}: {}", self.path, e)))?;
            serde_json::from_str(&contents)
                .map_err(|e| ServiceError::Internal(format!("failed to parse geojson file {}: {}", self.path, e)))
        })
    }

    pub async fn resolve(&self, lat: f64, lon: f64) -> Result<GeocodeResult, ServiceError> {
        let geojson = self.geojson()?;
        match find_containing_feature(lon, lat, geojson) {
            Some(feature) => {
                let name = feature
                    .get("properties")
                    .and_then(|p| p.get("name"))
                    .and_then(Value::as_str)
                    .unwrap_or("");
                Ok(GeocodeResult {
                    state: "New York".to_string(),
                    county: normalize_county(name, ""),
                    locality: None,
                    raw_response: Some(feature.clone()),
                    lat_rounded: Default::default(),
                    lon_rounded: Default::default(),
                })
            }
            None => Ok(GeocodeResult {
                state: "Out of State".to_string(),
                county: String::new(),
                locality: None,
                raw_response: None,
                lat_rounded: Default::default(),
                lon_rounded: Default::default(),
            }),
        }
    }
}
