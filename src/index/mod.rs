mod build;
mod lookup;

use std::collections::BTreeMap;

pub use build::build_index;
pub use lookup::Matches;

use crate::{Gender, StationRecord};

/// The composite grouping key of a station record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketKey {
    pub sector: u32,
    pub subdistrict: u32,
    pub gender: Gender,
}

impl BucketKey {
    pub fn of(record: &StationRecord) -> Self {
        BucketKey {
            sector: record.sector,
            subdistrict: record.subdistrict,
            gender: record.gender,
        }
    }
}

/// Read-only station index, grouped by (sector, subdistrict, gender).
///
/// Only populated buckets exist; records keep their arrival order inside a
/// bucket.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Index {
    buckets: BTreeMap<BucketKey, Vec<StationRecord>>,
    record_count: usize,
}

impl Index {
    pub fn len(&self) -> usize {
        self.record_count
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn bucket(&self, key: &BucketKey) -> Option<&[StationRecord]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    pub fn buckets(&self) -> impl Iterator<Item = (&BucketKey, &[StationRecord])> {
        self.buckets.iter().map(|(key, records)| (key, records.as_slice()))
    }
}
