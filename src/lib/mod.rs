use output::Output;
use std::io::{Read, Write};

pub mod category;
pub mod color;
pub mod config;
pub mod error;
pub mod fetch;
pub mod geo;
pub mod geojson;
pub mod items;
pub mod output;
pub mod search;
#[cfg(test)]
mod test_helpers;

pub use self::config::PreviewConfig;
pub use self::error::PreviewError;
pub use self::fetch::{FeatureSource, HttpFeatureSource, LoadOutcome, PreviewLoader, PreviewState};
pub use self::geo::{BoundingBox, LatLng};
pub use self::geojson::FeatureCollection;
pub use self::output::Preview;

/// Resolve a saved feature-server response into a styled preview.
///
/// Unlike the loader, a malformed payload is returned as an error here.
pub fn read_preview(mut reader: impl Read, config: &PreviewConfig) -> Result<Preview, PreviewError> {
    let mut body = String::new();
    reader.read_to_string(&mut body)?;
    let collection = FeatureCollection::from_json_str(&body)?;
    Ok(Preview::resolve(collection, config))
}

pub fn process(
    reader: impl Read,
    writer: &mut dyn Write,
    config: &PreviewConfig,
    legend: bool,
) -> Result<(), PreviewError> {
    let preview = read_preview(reader, config)?;
    if legend {
        preview.write_json_lines(writer)
    } else {
        preview.write_geojson(writer)
    }
}
