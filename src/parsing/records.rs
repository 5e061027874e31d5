use serde::Deserialize;
use tracing::warn;

use super::numeric::lenient_integer;
use crate::{Gender, ParseError, PlaceId, StationRow};

#[derive(Deserialize)]
struct RawRow {
    #[serde(rename = "sect", deserialize_with = "lenient_integer")]
    sector: u32,
    gender: Gender,
    place: PlaceId,
    #[serde(deserialize_with = "lenient_integer")]
    from: u64,
    #[serde(deserialize_with = "lenient_integer")]
    to: u64,
}

#[derive(Debug, Default)]
pub struct ParsedRows {
    pub rows: Vec<StationRow>,
    pub rejected: usize,
}

/// Parse the station records file: a JSON array of row objects.
///
/// Rows that do not decode are logged and skipped; only a malformed
/// top-level document is an error.
pub fn parse_records(json: &[u8]) -> Result<ParsedRows, ParseError> {
    let values: serde_json::Value = serde_json::from_slice(json)?;
    let serde_json::Value::Array(values) = values else {
        return Err(ParseError::Shape("a JSON array of station records"));
    };

    let mut parsed = ParsedRows {
        rows: Vec::with_capacity(values.len()),
        rejected: 0,
    };

    for (position, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<RawRow>(value) {
            Ok(raw) => parsed.rows.push(StationRow {
                sector: raw.sector,
                gender: raw.gender,
                place: raw.place,
                from: raw.from,
                to: raw.to,
            }),
            Err(err) => {
                warn!(position, error = %err, "skipping malformed station record");
                parsed.rejected += 1;
            }
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::parse_records;
    use crate::{Gender, ParseError, PlaceId};

    #[test]
    fn renames_sect_and_accepts_numeric_strings() {
        let json = br#"[
            {"sect": 1, "gender": "M", "place": "A", "from": "100", "to": 200},
            {"sect": "2", "gender": "F", "place": 7, "from": 5, "to": " 9 ", "extra": true}
        ]"#;

        let parsed = parse_records(json).unwrap();

        assert_eq!(parsed.rejected, 0);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].sector, 1);
        assert_eq!(parsed.rows[0].from, 100);
        assert_eq!(parsed.rows[0].to, 200);
        assert_eq!(parsed.rows[1].sector, 2);
        assert_eq!(parsed.rows[1].gender, Gender::F);
        assert_eq!(parsed.rows[1].place, PlaceId::new("7"));
        assert_eq!(parsed.rows[1].to, 9);
    }

    #[test]
    fn numeric_comparison_is_not_lexicographic() {
        let json = br#"[{"sect": 1, "gender": "M", "place": "A", "from": "9", "to": "10"}]"#;

        let parsed = parse_records(json).unwrap();

        assert!(parsed.rows[0].from < parsed.rows[0].to);
    }

    #[test]
    fn accepts_integral_floats() {
        let json = br#"[
            {"sect": 1.0, "gender": "M", "place": 12.0, "from": 100.0, "to": "200"},
            {"sect": 1, "gender": "M", "place": "A", "from": "1e2", "to": "200.0"},
            {"sect": 1, "gender": "M", "place": "A", "from": 100.5, "to": 200},
            {"sect": 1, "gender": "M", "place": "A", "from": -1.0, "to": 200}
        ]"#;

        let parsed = parse_records(json).unwrap();

        assert_eq!(parsed.rejected, 2);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].sector, 1);
        assert_eq!(parsed.rows[0].place, PlaceId::new("12"));
        assert_eq!(parsed.rows[0].from, 100);
        assert_eq!(parsed.rows[1].from, 100);
        assert_eq!(parsed.rows[1].to, 200);
    }

    #[test]
    fn skips_bad_rows_without_failing() {
        let json = br#"[
            {"sect": 1, "gender": "X", "place": "A", "from": 1, "to": 2},
            {"sect": 1, "gender": "M", "place": "A", "from": "abc", "to": 2},
            {"gender": "M", "place": "A", "from": 1, "to": 2},
            {"sect": 1, "gender": "M", "place": "B", "from": 1, "to": 2}
        ]"#;

        let parsed = parse_records(json).unwrap();

        assert_eq!(parsed.rejected, 3);
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].place, PlaceId::new("B"));
    }

    #[test]
    fn rejects_non_array_document() {
        let result = parse_records(br#"{"sect": 1}"#);

        assert!(matches!(result, Err(ParseError::Shape(_))));
        assert!(matches!(parse_records(b"not json"), Err(ParseError::Json(_))));
    }
}
