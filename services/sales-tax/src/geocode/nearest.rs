use common::ServiceError;

use crate::geocode::normalize::normalize_county;
use crate::geocode::GeocodeResult;

struct NearestPlace {
    lat: f64,
    lon: f64,
    county: &'static str,
    locality: &'static str,
}

/// Hand-picked reference points for the five NYC boroughs plus a handful of
/// upstate cities. `county` is left empty for the boroughs on purpose, to
/// exercise the locality->county fallback the same way a sparse real dataset
/// would.
const PLACES: &[NearestPlace] = &[
    NearestPlace { lat: 40.7831, lon: -73.9712, county: "", locality: "Manhattan" },
    NearestPlace { lat: 40.6782, lon: -73.9442, county: "", locality: "Brooklyn" },
    NearestPlace { lat: 40.7282, lon: -73.7949, county: "", locality: "Queens" },
    NearestPlace { lat: 40.8448, lon: -73.8648, county: "", locality: "Bronx" },
    NearestPlace { lat: 40.5795, lon: -74.1502, county: "", locality: "Staten Island" },
    NearestPlace { lat: 42.8864, lon: -78.8784, county: "Erie", locality: "Buffalo" },
    NearestPlace { lat: 42.6526, lon: -73.7562, county: "Albany", locality: "Albany" },
    NearestPlace { lat: 43.1566, lon: -77.6088, county: "Monroe", locality: "Rochester" },
    NearestPlace { lat: 43.0481, lon: -76.1474, county: "Onondaga", locality: "Syracuse" },
    NearestPlace { lat: 40.9312, lon: -73.8988, county: "Westchester", locality: "Yonkers" },
];

fn squared_distance(a_lat: f64, a_lon: f64, b_lat: f64, b_lon: f64) -> f64 {
    let dlat = a_lat - b_lat;
    let dlon = a_lon - b_lon;
    dlat * dlat + dlon * dlon
}

pub struct NearestResolver;

impl NearestResolver {
    pub fn new() -> Self {
        Self
    }

    pub async fn resolve(&self, lat: f64, lon: f64) -> Result<GeocodeResult, ServiceError> {
        let nearest = PLACES
            .iter()
            .min_by(|a, b| {
                squared_distance(lat, lon, a.lat, a.lon)
                    .partial_cmp(&squared_distance(lat, lon, b.lat, b.lon))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .expect("PLACES is non-empty");

        let county = if nearest.county.is_empty() {
            normalize_county("", nearest.locality)
        } else {
            nearest.county.to_string()
        };

        Ok(GeocodeResult {
            state: "New York".to_string(),
            county,
            locality: Some(nearest.locality.to_string()),
            raw_response: None,
            lat_rounded: Default::default(),
            lon_rounded: Default::default(),
        })
    }
}

impl Default for NearestResolver {
    fn default() -> Self {
        Self::new()
    }
}
