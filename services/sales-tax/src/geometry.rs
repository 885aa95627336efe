//! Point-in-polygon / point-in-multipolygon tests over GeoJSON, and a linear
//! scan helper for finding the feature that contains a point.
//!
//! GeoJSON is consumed as plain `serde_json::Value` rather than through a
//! dedicated geometry crate: the contract here only needs `[lon, lat]` vertex
//! arrays and two geometry types (Polygon, MultiPolygon), which is a thin
//! enough slice of GeoJSON that walking the parsed value directly is simpler
//! than adopting a new dependency for it.

use serde_json::Value;

pub type Point = (f64, f64);
pub type Ring = Vec<Point>;

/// Ray-cast parity test. The ring is treated as implicitly closed (the last
/// vertex connects back to the first). A point on the upper boundary of an
/// edge is outside; on the lower boundary, inside — the standard half-open
/// convention, so a point on a shared edge between two polygons belongs to
/// exactly one of them.
pub fn point_in_ring(point: Point, ring: &[Point]) -> bool {
    let (x, y) = point;
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (p1x, p1y) = ring[i];
        let (p2x, p2y) = ring[j];

        let crosses = (p1y > y) != (p2y > y);
        if crosses {
            let x_intersect = (p2x - p1x) * (y - p1y) / (p2y - p1y) + p1x;
            if x < x_intersect {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// `rings[0]` is the exterior; any further rings are holes. The point is
/// inside iff it is inside the exterior and outside every hole.
pub fn point_in_polygon(point: Point, rings: &[Ring]) -> bool {
    let Some(exterior) = rings.first() else {
        return false;
    };
    if !point_in_ring(point, exterior) {
        return false;
    }
    for hole in &rings[1..] {
        if point_in_ring(point, hole) {
            return false;
        }
    }
    true
}

/// Disjunction across member polygons.
pub fn point_in_multipolygon(point: Point, polygons: &[Vec<Ring>]) -> bool {
    polygons.iter().any(|polygon| point_in_polygon(point, polygon))
}

fn parse_ring(value: &Value) -> Option<Ring> {
    value
        .as_array()?
        .iter()
        .map(|v| {
            let coords = v.as_array()?;
            let lon = coords.first()?.as_f64()?;
            let lat = coords.get(1)?.as_f64()?;
            Some((lon, lat))
        })
        .collect()
}

fn parse_polygon(value: &Value) -> Option<Vec<Ring>> {
    value.as_array()?.iter().map(parse_ring).collect()
}

fn parse_multipolygon(value: &Value) -> Option<Vec<Vec<Ring>>> {
    value.as_array()?.iter().map(parse_polygon).collect()
}

fn geometry_contains(geometry: &Value, lon: f64, lat: f64) -> bool {
    let Some(kind) = geometry.get("type").and_then(Value::as_str) else {
        return false;
    };
    let Some(coordinates) = geometry.get("coordinates") else {
        return false;
    };

    match kind {
        "Polygon" => parse_polygon(coordinates)
            .map(|rings| point_in_polygon((lon, lat), &rings))
            .unwrap_or(false),
        "MultiPolygon" => parse_multipolygon(coordinates)
            .map(|polygons| point_in_multipolygon((lon, lat), &polygons))
            .unwrap_or(false),
        _ => false,
    }
}

/// Linear scan over `geojson.features`; returns the first feature whose
/// geometry (Polygon or MultiPolygon) contains the point. Other geometry
/// types are skipped.
pub fn find_containing_feature<'a>(lon: f64, lat: f64, geojson: &'a Value) -> Option<&'a Value> {
    let features = geojson.get("features")?.as_array()?;
    features.iter().find(|feature| {
        feature
            .get("geometry")
            .map(|g| geometry_contains(g, lon, lat))
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square() -> Ring {
        vec![(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]
    }

    #[test]
    fn interior_point_is_inside() {
        assert!(point_in_ring((5.0, 5.0), &square()));
    }

    #[test]
    fn exterior_point_is_outside() {
        assert!(!point_in_ring((15.0, 5.0), &square()));
    }

    #[test]
    fn hole_excludes_point() {
        let exterior = square();
        let hole = vec![(4.0, 4.0), (4.0, 6.0), (6.0, 6.0), (6.0, 4.0)];
        let rings = vec![exterior, hole];
        assert!(!point_in_polygon((5.0, 5.0), &rings));
        assert!(point_in_polygon((1.0, 1.0), &rings));
    }

    #[test]
    fn multipolygon_is_disjunction() {
        let a = vec![square()];
        let b = vec![vec![(20.0, 20.0), (20.0, 30.0), (30.0, 30.0), (30.0, 20.0)]];
        let polygons = vec![a, b];
        assert!(point_in_multipolygon((25.0, 25.0), &polygons));
        assert!(!point_in_multipolygon((50.0, 50.0), &polygons));
    }

    #[test]
    fn find_containing_feature_skips_non_matching_and_unsupported_geometry() {
        let geojson = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "Line"}, "geometry": {"type": "LineString", "coordinates": [[0.0,0.0],[1.0,1.0]]}},
                {"type": "Feature", "properties": {"name": "Kings"}, "geometry": {"type": "Polygon", "coordinates": [[[0.0,0.0],[0.0,10.0],[10.0,10.0],[10.0,0.0]]]}},
            ]
        });
        let found = find_containing_feature(5.0, 5.0, &geojson).unwrap();
        assert_eq!(found["properties"]["name"], "Kings");
        assert!(find_containing_feature(50.0, 50.0, &geojson).is_none());
    }
}
