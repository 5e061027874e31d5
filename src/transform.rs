use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    Coordinate, GeoFeature, JoinError, NameNormalizer, PlaceId, StationRecord, StationRow,
};

/// Per-join data quality counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JoinReport {
    pub joined: usize,
    pub unresolved_places: usize,
    pub unknown_subdistricts: usize,
}

#[derive(Debug, Default)]
pub struct Joined {
    pub records: Vec<StationRecord>,
    pub report: JoinReport,
}

/// Attach a subdistrict key and map location to every station row.
///
/// Features with an unrecognized subdistrict name are left out of the join,
/// and rows whose place is then unknown are skipped. Output keeps input order.
pub fn join(
    rows: &[StationRow],
    features: &[GeoFeature],
    normalizer: &impl NameNormalizer,
) -> Joined {
    let mut report = JoinReport::default();
    let mut subdistricts: HashMap<&PlaceId, u32> = HashMap::with_capacity(features.len());
    let mut locations: HashMap<&PlaceId, Coordinate> = HashMap::with_capacity(features.len());

    for feature in features {
        let key = match normalizer.canonical_key(&feature.raw_subdistrict_name) {
            Ok(key) => key,
            Err(err) => {
                warn!(place = %feature.place, error = %err, "excluding feature from join");
                report.unknown_subdistricts += 1;
                // The last feature for an id wins, even when it is unusable.
                subdistricts.remove(&feature.place);
                locations.remove(&feature.place);
                continue;
            }
        };

        if subdistricts.insert(&feature.place, key).is_some() {
            debug!(place = %feature.place, "duplicate feature id, keeping the last one");
        }
        locations.insert(&feature.place, feature.coordinates);
    }

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        match enrich(row, &subdistricts, &locations) {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(sector = row.sector, error = %err, "skipping station record");
                report.unresolved_places += 1;
            }
        }
    }

    report.joined = records.len();
    Joined { records, report }
}

fn enrich(
    row: &StationRow,
    subdistricts: &HashMap<&PlaceId, u32>,
    locations: &HashMap<&PlaceId, Coordinate>,
) -> Result<StationRecord, JoinError> {
    let unresolved = || JoinError::UnresolvedPlace(row.place.clone());
    let subdistrict = *subdistricts.get(&row.place).ok_or_else(unresolved)?;
    let center = *locations.get(&row.place).ok_or_else(unresolved)?;

    Ok(StationRecord {
        sector: row.sector,
        subdistrict,
        gender: row.gender,
        place: row.place.clone(),
        from: row.from,
        to: row.to,
        center,
    })
}
