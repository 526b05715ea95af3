use super::geo::{BoundingBox, LatLng};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Contiguous United States, shown when a collection has no usable geometry.
pub const DEFAULT_FALLBACK_BOUNDS: BoundingBox = BoundingBox {
    south_west: LatLng {
        lat: 24.396308,
        lng: -124.848974,
    },
    north_east: LatLng {
        lat: 49.384358,
        lng: -66.885444,
    },
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Stroke styling shared by every district polygon.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        StrokeStyle {
            color: "#333333".into(),
            weight: 1.0,
            opacity: 1.0,
            fill_opacity: 0.6,
        }
    }
}

/// Everything the resolver and loader need, handed over at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewConfig {
    pub fallback_bounds: BoundingBox,
    pub stroke: StrokeStyle,
    pub timeout: Duration,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        PreviewConfig {
            fallback_bounds: DEFAULT_FALLBACK_BOUNDS,
            stroke: StrokeStyle::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl PreviewConfig {
    pub fn with_fallback_bounds(mut self, bounds: BoundingBox) -> Self {
        self.fallback_bounds = bounds;
        self
    }

    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fallback_is_well_formed() {
        let bounds = PreviewConfig::default().fallback_bounds;
        assert!(bounds.south_west.lat < bounds.north_east.lat);
        assert!(bounds.south_west.lng < bounds.north_east.lng);
    }

    #[test]
    fn stroke_serializes_camel_case() {
        let value = serde_json::to_value(StrokeStyle::default()).unwrap();
        assert_eq!(
            value,
            json!({ "color": "#333333", "weight": 1.0, "opacity": 1.0, "fillOpacity": 0.6 })
        );
    }

    #[test]
    fn builder_overrides() {
        let bounds = BoundingBox::new(LatLng::new(34., -84.3), LatLng::new(34.4, -84.));
        let config = PreviewConfig::default()
            .with_fallback_bounds(bounds)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.fallback_bounds, bounds);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.stroke, StrokeStyle::default());
    }
}
