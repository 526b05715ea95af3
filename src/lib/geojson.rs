use super::error::PreviewError;
use log::{debug, warn};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A GeoJSON position, `[lon, lat]` optionally followed by an altitude.
pub type Position = Vec<f64>;

pub type Properties = Map<String, Value>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        #[serde(deserialize_with = "position")]
        coordinates: Position,
    },
    LineString {
        #[serde(deserialize_with = "positions")]
        coordinates: Vec<Position>,
    },
    Polygon {
        #[serde(deserialize_with = "rings")]
        coordinates: Vec<Vec<Position>>,
    },
    MultiPoint {
        #[serde(deserialize_with = "positions")]
        coordinates: Vec<Position>,
    },
    MultiLineString {
        #[serde(deserialize_with = "rings")]
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        #[serde(deserialize_with = "polygons")]
        coordinates: Vec<Vec<Vec<Position>>>,
    },
}

/// Position whose non-numeric components decode as NaN. A nested array or
/// object still fails, that is a depth error of the whole geometry.
struct LenientPosition(Position);

impl<'de> Deserialize<'de> for LenientPosition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<Value>::deserialize(deserializer)?
            .into_iter()
            .map(|component| match component {
                Value::Number(n) => Ok(n.as_f64().unwrap_or(f64::NAN)),
                Value::Array(_) | Value::Object(_) => {
                    Err(de::Error::custom("position nested too deep"))
                }
                _ => Ok(f64::NAN),
            })
            .collect::<Result<Position, D::Error>>()
            .map(LenientPosition)
    }
}

fn position<'de, D>(deserializer: D) -> Result<Position, D::Error>
where
    D: Deserializer<'de>,
{
    LenientPosition::deserialize(deserializer).map(|p| p.0)
}

fn positions<'de, D>(deserializer: D) -> Result<Vec<Position>, D::Error>
where
    D: Deserializer<'de>,
{
    let line = Vec::<LenientPosition>::deserialize(deserializer)?;
    Ok(line.into_iter().map(|p| p.0).collect())
}

fn rings<'de, D>(deserializer: D) -> Result<Vec<Vec<Position>>, D::Error>
where
    D: Deserializer<'de>,
{
    let rings = Vec::<Vec<LenientPosition>>::deserialize(deserializer)?;
    Ok(rings
        .into_iter()
        .map(|ring| ring.into_iter().map(|p| p.0).collect())
        .collect())
}

fn polygons<'de, D>(deserializer: D) -> Result<Vec<Vec<Vec<Position>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let polygons = Vec::<Vec<Vec<LenientPosition>>>::deserialize(deserializer)?;
    Ok(polygons
        .into_iter()
        .map(|polygon| {
            polygon
                .into_iter()
                .map(|ring| ring.into_iter().map(|p| p.0).collect())
                .collect()
        })
        .collect())
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Feature {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "lenient_geometry")]
    pub geometry: Option<Geometry>,
    #[serde(default, deserialize_with = "lenient_properties")]
    pub properties: Properties,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

// Unknown geometry types or coordinates of the wrong depth decode as `None`
// instead of failing the whole collection.
fn lenient_geometry<'de, D>(deserializer: D) -> Result<Option<Geometry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(geometry) => Ok(Some(geometry)),
        Err(err) => {
            debug!("skipping unreadable geometry: {}", err);
            Ok(None)
        }
    }
}

fn lenient_properties<'de, D>(deserializer: D) -> Result<Properties, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Ok(Properties::new()),
    }
}

impl Feature {
    pub fn new(geometry: Option<Geometry>, properties: Properties) -> Self {
        Feature {
            id: None,
            geometry,
            properties,
        }
    }
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        FeatureCollection { features }
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Decode a feature-server response body.
    ///
    /// The body has to be a JSON object carrying a `features` array, anything
    /// else is a [`PreviewError::MalformedPayload`]. Entries of that array which
    /// are not feature objects are dropped with a warning.
    pub fn from_json_str(body: &str) -> Result<Self, PreviewError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|err| PreviewError::MalformedPayload(err.to_string()))?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: Value) -> Result<Self, PreviewError> {
        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return Err(PreviewError::MalformedPayload(format!(
                    "expected a feature collection object, found {}",
                    json_kind(&other)
                )))
            }
        };
        let entries = match object.remove("features") {
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return Err(PreviewError::MalformedPayload(format!(
                    "`features` must be an array, found {}",
                    json_kind(&other)
                )))
            }
            None => {
                return Err(PreviewError::MalformedPayload(
                    "response has no `features` member".into(),
                ))
            }
        };

        let total = entries.len();
        let features: Vec<Feature> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        if features.len() < total {
            warn!(
                "dropped {} of {} entries that are not features",
                total - features.len(),
                total
            );
        }
        Ok(FeatureCollection { features })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_polygon_feature() {
        let body = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "id": 7,
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-84.2, 34.1], [-84.1, 34.1], [-84.1, 34.2], [-84.2, 34.1]]]
                },
                "properties": { "ZONING_DISTRICT": "R-1" }
            }]
        });
        let collection = FeatureCollection::from_json_value(body).unwrap();
        assert_eq!(collection.len(), 1);
        let feature = &collection.features[0];
        assert_eq!(feature.id, Some(json!(7)));
        match &feature.geometry {
            Some(Geometry::Polygon { coordinates }) => assert_eq!(coordinates[0].len(), 4),
            other => panic!("unexpected geometry {:?}", other),
        }
        assert_eq!(feature.properties["ZONING_DISTRICT"], json!("R-1"));
    }

    #[test]
    fn unknown_geometry_type_is_skipped() {
        let body = json!({
            "features": [{
                "type": "Feature",
                "geometry": { "type": "GeometryCollection", "geometries": [] },
                "properties": {}
            }]
        });
        let collection = FeatureCollection::from_json_value(body).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.features[0].geometry, None);
    }

    #[test]
    fn geometry_without_coordinates_is_skipped() {
        let body = json!({
            "features": [
                { "type": "Feature", "geometry": { "type": "Point" }, "properties": null },
                { "type": "Feature", "properties": { "zoning_district": "AG" } },
                { "type": "Feature", "geometry": { "coordinates": [1.0, 2.0] } }
            ]
        });
        let collection = FeatureCollection::from_json_value(body).unwrap();
        assert_eq!(collection.len(), 3);
        assert!(collection.features.iter().all(|f| f.geometry.is_none()));
        assert!(collection.features[0].properties.is_empty());
    }

    #[test]
    fn coordinates_of_wrong_depth_are_skipped() {
        let body = json!({
            "features": [{
                "type": "Feature",
                "geometry": { "type": "MultiPolygon", "coordinates": [[-84.0, 34.0]] },
                "properties": {}
            }]
        });
        let collection = FeatureCollection::from_json_value(body).unwrap();
        assert_eq!(collection.features[0].geometry, None);
    }

    #[test]
    fn non_numeric_component_only_invalidates_its_vertex() {
        let body = json!({
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-84.2, 34.1], [-84.1, 34.1], [-84.1, null], [-84.2, "x"]]]
                },
                "properties": {}
            }]
        });
        let collection = FeatureCollection::from_json_value(body).unwrap();
        match &collection.features[0].geometry {
            Some(Geometry::Polygon { coordinates }) => {
                let ring = &coordinates[0];
                assert_eq!(ring.len(), 4);
                assert_eq!(ring[0], vec![-84.2, 34.1]);
                assert!(ring[2][1].is_nan());
                assert!(ring[3][1].is_nan());
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn point_nested_too_deep_is_skipped() {
        let body = json!({
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [[-84.0, 34.0]] },
                "properties": {}
            }]
        });
        let collection = FeatureCollection::from_json_value(body).unwrap();
        assert_eq!(collection.features[0].geometry, None);
    }

    #[test]
    fn non_feature_entries_are_dropped() {
        let body = json!({ "features": [42, "x", { "type": "Feature", "properties": {} }] });
        let collection = FeatureCollection::from_json_value(body).unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn missing_features_is_malformed() {
        let err = FeatureCollection::from_json_str(r#"{"type":"FeatureCollection"}"#).unwrap_err();
        assert!(matches!(err, PreviewError::MalformedPayload(_)));

        let err = FeatureCollection::from_json_str(r#"{"features":{}}"#).unwrap_err();
        assert!(matches!(err, PreviewError::MalformedPayload(_)));

        let err = FeatureCollection::from_json_str("[]").unwrap_err();
        assert!(matches!(err, PreviewError::MalformedPayload(_)));

        let err = FeatureCollection::from_json_str("<html>").unwrap_err();
        assert!(matches!(err, PreviewError::MalformedPayload(_)));
    }

    #[test]
    fn empty_features_is_valid() {
        let collection = FeatureCollection::from_json_str(r#"{"features":[]}"#).unwrap();
        assert!(collection.is_empty());
    }
}
