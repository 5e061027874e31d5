use serde::Deserialize;
use tracing::warn;

use crate::{Coordinate, GeoFeature, ParseError, PlaceId};

#[derive(Deserialize)]
struct RawFeature {
    properties: RawProperties,
    geometry: RawGeometry,
}

#[derive(Deserialize)]
struct RawProperties {
    #[serde(rename = "ID")]
    id: PlaceId,
    #[serde(rename = "Subdistrict")]
    subdistrict: String,
}

#[derive(Deserialize)]
struct RawGeometry {
    coordinates: Coordinate,
}

#[derive(Debug, Default)]
pub struct ParsedFeatures {
    pub features: Vec<GeoFeature>,
    pub rejected: usize,
}

/// Parse a GeoJSON feature collection of polling station points.
pub fn parse_features(json: &[u8]) -> Result<ParsedFeatures, ParseError> {
    let mut document: serde_json::Value = serde_json::from_slice(json)?;
    let Some(serde_json::Value::Array(features)) = document
        .get_mut("features")
        .map(serde_json::Value::take)
    else {
        return Err(ParseError::Shape("a feature collection with a features array"));
    };

    let mut parsed = ParsedFeatures {
        features: Vec::with_capacity(features.len()),
        rejected: 0,
    };

    for (position, value) in features.into_iter().enumerate() {
        match serde_json::from_value::<RawFeature>(value) {
            Ok(raw) => parsed.features.push(GeoFeature {
                place: raw.properties.id,
                raw_subdistrict_name: raw.properties.subdistrict,
                coordinates: raw.geometry.coordinates,
            }),
            Err(err) => {
                warn!(position, error = %err, "skipping malformed geographic feature");
                parsed.rejected += 1;
            }
        }
    }

    Ok(parsed)
}
