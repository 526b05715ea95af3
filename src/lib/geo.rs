use super::geojson::{Feature, FeatureCollection, Geometry, Position};
use geo::Centroid;
use geo_types::{Coord, Point, Rect};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A corner point in the `(lat, lng)` order map surfaces expect,
/// serialized as `[lat, lng]`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }
}

impl From<[f64; 2]> for LatLng {
    fn from(pair: [f64; 2]) -> Self {
        LatLng {
            lat: pair[0],
            lng: pair[1],
        }
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(loc: LatLng) -> Self {
        [loc.lat, loc.lng]
    }
}

impl From<Point<f64>> for LatLng {
    fn from(point: Point<f64>) -> Self {
        LatLng {
            lat: point.y(),
            lng: point.x(),
        }
    }
}

/// South-west and north-east corners, serialized as
/// `[[minLat, minLng], [maxLat, maxLng]]`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(from = "[LatLng; 2]", into = "[LatLng; 2]")]
pub struct BoundingBox {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl BoundingBox {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        BoundingBox {
            south_west,
            north_east,
        }
    }

    pub fn center(&self) -> LatLng {
        let rect: Rect<f64> = (*self).into();
        rect.centroid().into()
    }
}

impl From<[LatLng; 2]> for BoundingBox {
    fn from(corners: [LatLng; 2]) -> Self {
        BoundingBox {
            south_west: corners[0],
            north_east: corners[1],
        }
    }
}

impl From<BoundingBox> for [LatLng; 2] {
    fn from(bounds: BoundingBox) -> Self {
        [bounds.south_west, bounds.north_east]
    }
}

impl From<BoundingBox> for Rect<f64> {
    fn from(bounds: BoundingBox) -> Self {
        Rect::new(
            Coord {
                x: bounds.south_west.lng,
                y: bounds.south_west.lat,
            },
            Coord {
                x: bounds.north_east.lng,
                y: bounds.north_east.lat,
            },
        )
    }
}

/// Flattens any geometry into its raw positions, none of them validated yet.
pub trait Coordinates {
    fn coordinates(&self) -> Vec<&Position>;
}

impl Coordinates for Geometry {
    fn coordinates(&self) -> Vec<&Position> {
        match self {
            Geometry::Point { coordinates } => vec![coordinates],
            Geometry::LineString { coordinates } | Geometry::MultiPoint { coordinates } => {
                coordinates.iter().collect()
            }
            Geometry::Polygon { coordinates } | Geometry::MultiLineString { coordinates } => {
                coordinates.iter().flatten().collect()
            }
            Geometry::MultiPolygon { coordinates } => {
                coordinates.iter().flatten().flatten().collect()
            }
        }
    }
}

impl Coordinates for Feature {
    fn coordinates(&self) -> Vec<&Position> {
        match &self.geometry {
            Some(geometry) => geometry.coordinates(),
            None => vec![],
        }
    }
}

/// `[lon, lat]` with both components finite and inside WGS84 ranges.
pub fn is_valid_coordinate(position: &[f64]) -> bool {
    match position {
        [lng, lat, ..] => {
            lng.is_finite()
                && lat.is_finite()
                && (-180.0..=180.0).contains(lng)
                && (-90.0..=90.0).contains(lat)
        }
        _ => false,
    }
}

/// Running min/max over valid coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    min_lng: f64,
    min_lat: f64,
    max_lng: f64,
    max_lat: f64,
}

impl Default for Extent {
    fn default() -> Self {
        Extent::EMPTY
    }
}

impl Extent {
    pub const EMPTY: Extent = Extent {
        min_lng: f64::INFINITY,
        min_lat: f64::INFINITY,
        max_lng: f64::NEG_INFINITY,
        max_lat: f64::NEG_INFINITY,
    };

    pub fn is_empty(&self) -> bool {
        self.min_lng > self.max_lng || self.min_lat > self.max_lat
    }

    pub fn include(&mut self, lng: f64, lat: f64) {
        self.min_lng = self.min_lng.min(lng);
        self.min_lat = self.min_lat.min(lat);
        self.max_lng = self.max_lng.max(lng);
        self.max_lat = self.max_lat.max(lat);
    }

    pub fn merge(self, other: Extent) -> Extent {
        Extent {
            min_lng: self.min_lng.min(other.min_lng),
            min_lat: self.min_lat.min(other.min_lat),
            max_lng: self.max_lng.max(other.max_lng),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        if self.is_empty() {
            return None;
        }
        Some(BoundingBox {
            south_west: LatLng::new(self.min_lat, self.min_lng),
            north_east: LatLng::new(self.max_lat, self.max_lng),
        })
    }
}

impl<'a> FromIterator<&'a Position> for Extent {
    fn from_iter<I: IntoIterator<Item = &'a Position>>(positions: I) -> Self {
        let mut extent = Extent::EMPTY;
        for position in positions {
            if is_valid_coordinate(position) {
                extent.include(position[0], position[1]);
            }
        }
        extent
    }
}

pub fn feature_extent(feature: &Feature) -> Extent {
    feature.coordinates().into_iter().collect()
}

/// Extent over every valid coordinate of the collection, reduced per feature
/// in parallel. Feature order does not influence the result.
pub fn collection_extent(collection: &FeatureCollection) -> Extent {
    collection
        .features
        .par_iter()
        .map(feature_extent)
        .reduce(|| Extent::EMPTY, Extent::merge)
}

/// Tight bounds of the collection, or `fallback` when not a single valid
/// coordinate survives.
pub fn resolve_bounds(collection: &FeatureCollection, fallback: BoundingBox) -> BoundingBox {
    match collection_extent(collection).bounding_box() {
        Some(bounds) => bounds,
        None => {
            debug!(
                "no valid coordinates in {} features, using fallback bounds",
                collection.len()
            );
            fallback
        }
    }
}
