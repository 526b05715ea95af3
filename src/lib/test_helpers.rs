use super::geojson::{Feature, FeatureCollection, Geometry, Position, Properties};
use serde_json::Value;

#[allow(dead_code)]
pub fn point(lng: f64, lat: f64) -> Geometry {
    Geometry::Point {
        coordinates: vec![lng, lat],
    }
}

#[allow(dead_code)]
pub fn polygon(ring: Vec<Position>) -> Geometry {
    Geometry::Polygon {
        coordinates: vec![ring],
    }
}

#[allow(dead_code)]
pub fn square(lng: f64, lat: f64, size: f64) -> Geometry {
    polygon(vec![
        vec![lng, lat],
        vec![lng + size, lat],
        vec![lng + size, lat + size],
        vec![lng, lat + size],
        vec![lng, lat],
    ])
}

#[allow(dead_code)]
pub fn feature(geometry: Geometry, properties: Value) -> Feature {
    let properties = match properties {
        Value::Object(map) => map,
        _ => Properties::new(),
    };
    Feature::new(Some(geometry), properties)
}

#[allow(dead_code)]
pub fn district(geometry: Geometry, name: &str) -> Feature {
    feature(geometry, serde_json::json!({ "ZONING_DISTRICT": name }))
}

#[allow(dead_code)]
pub fn create_collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection::new(features)
}
