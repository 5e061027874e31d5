use std::path::PathBuf;

use thiserror::Error;

use crate::{Gender, PlaceId};

/// User-facing message for any rejected form submission.
pub const INVALID_INPUT_MESSAGE: &str = "information entered incorrectly";
/// User-facing message when no station could be resolved.
pub const NOT_FOUND_MESSAGE: &str = "couldn't find location";

/// A subdistrict name the normalizer does not recognize.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("unknown subdistrict name: {0:?}")]
    UnknownSubdistrict(String),
}

/// A gender code other than `M` or `F`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown gender code: {0:?}")]
pub struct UnknownGender(pub String);

/// A station row that could not be joined with the geographic data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JoinError {
    #[error("unresolved place: {0}")]
    UnresolvedPlace(PlaceId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Sector,
    Subdistrict,
    Gender,
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Missing(Field),
    NotNumeric(Field),
    UnknownGender,
}

/// Rejected form submission.
///
/// Always displays the same generic message; the per-field detail is kept
/// for logging and tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", INVALID_INPUT_MESSAGE)]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

/// The (sector, subdistrict, gender) path does not exist in the index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no such sector/subdistrict/gender combination: {sector}/{subdistrict}/{gender}")]
pub struct NotFoundError {
    pub sector: u32,
    pub subdistrict: u32,
    pub gender: Gender,
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected {0}")]
    Shape(&'static str),
    #[error("subdistrict alias {alias:?} is claimed by keys {first} and {second}")]
    DuplicateAlias {
        alias: String,
        first: u32,
        second: u32,
    },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to fetch {path} after {attempts} attempts: {source}")]
    Fetch {
        path: PathBuf,
        attempts: u32,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}
