mod config;
mod error;
mod index;
mod load;
mod logging;
mod model;
mod normalize;
mod session;
mod transform;
mod validate;

pub mod parsing;

#[cfg(feature = "webservice")]
mod service;

pub use config::{Config, DataConfig};
pub use error::{
    Field, FieldError, INVALID_INPUT_MESSAGE, JoinError, LoadError, LookupError,
    NOT_FOUND_MESSAGE, NotFoundError, ParseError, UnknownGender, ValidationError,
};
pub use index::{BucketKey, Index, Matches, build_index};
pub use load::{LoadReport, LoadedIndex, load_index, prepare};
pub use logging::{init_logging, log_with_elapsed};
pub use model::{Coordinate, GeoFeature, Gender, PlaceId, StationRecord, StationRow, UserQuery};
pub use normalize::{NameNormalizer, SubdistrictTable};
pub use session::{LookupOutcome, Session, SessionState, SessionStats};
pub use transform::{JoinReport, Joined, join};
pub use validate::{RawForm, validate};

#[cfg(feature = "webservice")]
pub use service::{serve, serve_with_shutdown};
