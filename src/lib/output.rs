use super::category::{district_label, legend, LegendEntry};
use super::color::{category_color, Hsl};
use super::config::{PreviewConfig, StrokeStyle};
use super::error::PreviewError;
use super::geo::{resolve_bounds, BoundingBox};
use super::geojson::{FeatureCollection, Geometry, Properties};
use serde::Serialize;
use serde_json::{to_string, to_value, Value};
use std::io::Write;

pub trait Output {
    fn write_geojson(&self, writer: &mut dyn Write) -> Result<(), PreviewError>;
    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<(), PreviewError>;
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStyle {
    pub fill_color: Hsl,
    #[serde(flatten)]
    pub stroke: StrokeStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledFeature {
    pub id: Option<Value>,
    pub geometry: Option<Geometry>,
    pub properties: Properties,
    pub district: String,
    pub style: FeatureStyle,
}

/// What a map surface needs to draw one fetched collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub bounds: BoundingBox,
    pub features: Vec<StyledFeature>,
    pub legend: Vec<LegendEntry>,
}

impl Preview {
    pub fn resolve(collection: FeatureCollection, config: &PreviewConfig) -> Self {
        let bounds = resolve_bounds(&collection, config.fallback_bounds);
        let legend = legend(&collection);
        let features = collection
            .features
            .into_iter()
            .map(|feature| {
                let district = district_label(&feature);
                let style = FeatureStyle {
                    fill_color: category_color(&district),
                    stroke: config.stroke.clone(),
                };
                StyledFeature {
                    id: feature.id,
                    geometry: feature.geometry,
                    properties: feature.properties,
                    district,
                    style,
                }
            })
            .collect();
        Preview {
            bounds,
            features,
            legend,
        }
    }

    /// An empty preview framed on `bounds`, shown while loading or after a
    /// failed fetch.
    pub fn empty(bounds: BoundingBox) -> Self {
        Preview {
            bounds,
            features: vec![],
            legend: vec![],
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum Entity<'a> {
    Feature {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<&'a Value>,
        geometry: Option<&'a Geometry>,
        properties: Properties,
    },
    FeatureCollection {
        bbox: [f64; 4],
        features: Vec<Entity<'a>>,
    },
}

impl StyledFeature {
    fn to_entity(&self) -> Result<Entity<'_>, PreviewError> {
        let mut properties = self.properties.clone();
        properties.insert("district".into(), Value::String(self.district.clone()));
        properties.insert("style".into(), to_value(&self.style)?);
        Ok(Entity::Feature {
            id: self.id.as_ref(),
            geometry: self.geometry.as_ref(),
            properties,
        })
    }
}

impl Output for Preview {
    fn write_geojson(&self, writer: &mut dyn Write) -> Result<(), PreviewError> {
        let features = self
            .features
            .iter()
            .map(StyledFeature::to_entity)
            .collect::<Result<Vec<_>, _>>()?;
        let sw = self.bounds.south_west;
        let ne = self.bounds.north_east;
        let feature_collection = Entity::FeatureCollection {
            bbox: [sw.lng, sw.lat, ne.lng, ne.lat],
            features,
        };
        let string = to_string(&feature_collection)?;
        writeln!(writer, "{}", string)?;
        Ok(())
    }

    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<(), PreviewError> {
        for entry in self.legend.iter() {
            let json = to_string(entry)?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }
}
