use super::{BucketKey, Index};
use crate::StationRecord;

/// Group joined records into their buckets in a single pass.
pub fn build_index(records: Vec<StationRecord>) -> Index {
    let mut index = Index::default();

    for record in records {
        index
            .buckets
            .entry(BucketKey::of(&record))
            .or_default()
            .push(record);
        index.record_count += 1;
    }

    index
}
