mod features;
mod numeric;
mod records;

pub use features::{ParsedFeatures, parse_features};
pub use records::{ParsedRows, parse_records};

pub(crate) use numeric::integral;

use crate::{GeoFeature, StationRow};

/// Both source datasets, available only once each has been fetched and parsed.
#[derive(Default, Debug)]
pub struct ParsedData {
    pub rows: Vec<StationRow>,
    pub features: Vec<GeoFeature>,
    pub rejected_rows: usize,
    pub rejected_features: usize,
}

impl ParsedData {
    pub fn from_parts(rows: ParsedRows, features: ParsedFeatures) -> Self {
        ParsedData {
            rows: rows.rows,
            features: features.features,
            rejected_rows: rows.rejected,
            rejected_features: features.rejected,
        }
    }
}
