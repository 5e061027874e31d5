use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

use crate::{UnknownGender, parsing::integral};

/// Coordinate pair as found in the geographic data, passed through untouched.
pub type Coordinate = [f64; 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Gender::M),
            "F" => Ok(Gender::F),
            other => Err(UnknownGender(other.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::M => "M",
            Gender::F => "F",
        })
    }
}

/// Identifier shared by station rows and geographic features.
///
/// The source files are inconsistent about whether ids are strings or
/// integers, so both decode to the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        PlaceId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PlaceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Integer(u64),
            Float(f64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(text) => Ok(PlaceId(text.trim().to_string())),
            Repr::Integer(value) => Ok(PlaceId(value.to_string())),
            Repr::Float(value) => integral(value)
                .map(|value| PlaceId(value.to_string()))
                .ok_or_else(|| D::Error::custom(format!("not an integral place id: {value}"))),
        }
    }
}

/// A station row as parsed from the records file, before the join.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRow {
    pub sector: u32,
    pub gender: Gender,
    pub place: PlaceId,
    pub from: u64,
    pub to: u64,
}

/// A station row enriched with its subdistrict key and map location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRecord {
    pub sector: u32,
    pub subdistrict: u32,
    pub gender: Gender,
    pub place: PlaceId,
    pub from: u64,
    pub to: u64,
    pub center: Coordinate,
}

impl StationRecord {
    /// Inclusive range containment on registration numbers.
    pub fn contains(&self, value: u64) -> bool {
        self.from <= value && value <= self.to
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoFeature {
    pub place: PlaceId,
    pub raw_subdistrict_name: String,
    pub coordinates: Coordinate,
}

/// A validated form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserQuery {
    pub sector: u32,
    pub subdistrict: u32,
    pub gender: Gender,
    pub value: u64,
}
