use super::{BucketKey, Index};
use crate::{NotFoundError, StationRecord, UserQuery};

/// Every record in the queried bucket whose range contains the value, in
/// bucket order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matches<'a> {
    records: Vec<&'a StationRecord>,
}

impl<'a> Matches<'a> {
    pub fn records(&self) -> &[&'a StationRecord] {
        &self.records
    }

    /// First match in bucket order, which is what callers display.
    pub fn first(&self) -> Option<&'a StationRecord> {
        self.records.first().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// More than one station claims the same registration number.
    pub fn is_ambiguous(&self) -> bool {
        self.records.len() > 1
    }
}

impl Index {
    /// Find the stations whose range contains `query.value`.
    ///
    /// A missing (sector, subdistrict, gender) path is an error; a path that
    /// exists but matches nothing yields empty `Matches`.
    pub fn resolve(&self, query: &UserQuery) -> Result<Matches<'_>, NotFoundError> {
        let key = BucketKey {
            sector: query.sector,
            subdistrict: query.subdistrict,
            gender: query.gender,
        };

        let bucket = self.bucket(&key).ok_or(NotFoundError {
            sector: query.sector,
            subdistrict: query.subdistrict,
            gender: query.gender,
        })?;

        let records = bucket
            .iter()
            .filter(|record| record.contains(query.value))
            .collect();

        Ok(Matches { records })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        GeoFeature, Gender, NotFoundError, PlaceId, StationRecord, StationRow, SubdistrictTable,
        UserQuery, build_index, join,
    };

    fn downtown_index() -> crate::Index {
        let rows = vec![StationRow {
            sector: 1,
            gender: Gender::M,
            place: PlaceId::new("A"),
            from: 100,
            to: 200,
        }];
        let features = vec![GeoFeature {
            place: PlaceId::new("A"),
            raw_subdistrict_name: "وسط البلد".to_string(),
            coordinates: [33.5, 35.5],
        }];
        let table = SubdistrictTable::from_pairs([("وسط البلد", 4)]).unwrap();

        build_index(join(&rows, &features, &table).records)
    }

    fn query(subdistrict: u32, value: u64) -> UserQuery {
        UserQuery {
            sector: 1,
            subdistrict,
            gender: Gender::M,
            value,
        }
    }

    #[test]
    fn resolves_value_inside_range() {
        let index = downtown_index();

        let matches = index.resolve(&query(4, 150)).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches.first().unwrap().center, [33.5, 35.5]);
        assert!(!matches.is_ambiguous());
    }

    #[test]
    fn bounds_are_inclusive() {
        let index = downtown_index();

        assert_eq!(index.resolve(&query(4, 100)).unwrap().len(), 1);
        assert_eq!(index.resolve(&query(4, 200)).unwrap().len(), 1);
    }

    #[test]
    fn no_range_match_is_empty_not_an_error() {
        let index = downtown_index();

        let matches = index.resolve(&query(4, 250)).unwrap();

        assert!(matches.is_empty());
        assert!(matches.first().is_none());
    }

    #[test]
    fn absent_path_is_not_found() {
        let index = downtown_index();

        assert_eq!(
            index.resolve(&query(9, 150)),
            Err(NotFoundError {
                sector: 1,
                subdistrict: 9,
                gender: Gender::M,
            })
        );

        let other_gender = UserQuery {
            gender: Gender::F,
            ..query(4, 150)
        };
        assert!(index.resolve(&other_gender).is_err());
    }

    #[test]
    fn overlapping_ranges_return_all_matches_in_order() {
        let record = |place: &str, from: u64, to: u64| StationRecord {
            sector: 1,
            subdistrict: 4,
            gender: Gender::M,
            place: PlaceId::new(place),
            from,
            to,
            center: [0.0, 0.0],
        };
        let index = build_index(vec![
            record("first", 100, 200),
            record("other", 300, 400),
            record("second", 150, 350),
        ]);

        let matches = index.resolve(&query(4, 180)).unwrap();

        let places: Vec<_> = matches.records().iter().map(|r| r.place.as_str()).collect();
        assert_eq!(places, vec!["first", "second"]);
        assert!(matches.is_ambiguous());
        assert_eq!(matches.first().unwrap().place, PlaceId::new("first"));
    }

    #[test]
    fn never_returns_records_from_other_buckets() {
        let record = |sector: u32, gender: Gender| StationRecord {
            sector,
            subdistrict: 4,
            gender,
            place: PlaceId::new(format!("{sector}{gender}")),
            from: 0,
            to: 1000,
            center: [0.0, 0.0],
        };
        let index = build_index(vec![
            record(1, Gender::M),
            record(1, Gender::F),
            record(2, Gender::M),
        ]);

        let matches = index.resolve(&query(4, 500)).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches.first().unwrap().place, PlaceId::new("1M"));
    }
}
