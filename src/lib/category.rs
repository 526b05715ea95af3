use super::color::{category_color, Hsl};
use super::geojson::{Feature, FeatureCollection, Properties};
use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;

pub const DISTRICT_KEY: &str = "ZONING_DISTRICT";
pub const DISTRICT_KEY_ALIAS: &str = "zoning_district";
pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Hsl,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// Numbers print the way the browser stringifies them, so `5.0` is "5".
fn label_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn lookup<'a>(properties: &'a Properties, key: &str) -> Option<&'a Value> {
    properties.get(key).filter(|value| is_truthy(value))
}

/// The zoning district label of a feature.
///
/// The canonical key wins over the lower-case alias; a falsy value under
/// either key counts as absent. Labels are never normalized.
pub fn district_label(feature: &Feature) -> String {
    lookup(&feature.properties, DISTRICT_KEY)
        .or_else(|| lookup(&feature.properties, DISTRICT_KEY_ALIAS))
        .map(label_of)
        .unwrap_or_else(|| UNKNOWN_LABEL.into())
}

/// Distinct labels in first-seen order.
pub fn district_labels(collection: &FeatureCollection) -> Vec<String> {
    collection
        .features
        .iter()
        .map(district_label)
        .unique()
        .collect()
}

pub fn legend(collection: &FeatureCollection) -> Vec<LegendEntry> {
    district_labels(collection)
        .into_iter()
        .map(|label| {
            let color = category_color(&label);
            LegendEntry { label, color }
        })
        .collect()
}
