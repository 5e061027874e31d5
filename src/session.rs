use std::sync::{
    OnceLock,
    atomic::{AtomicU64, Ordering},
};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::{LoadError, LoadReport, LoadedIndex, RawForm, StationRecord, ValidationError, validate};

pub enum SessionState<'a> {
    Loading,
    Ready(&'a LoadedIndex),
    Failed(&'a str),
}

#[derive(Debug)]
pub enum LookupOutcome<'a> {
    /// First match in bucket order, plus how many stations matched in total.
    Found {
        record: &'a StationRecord,
        matches: usize,
    },
    /// The bucket exists but no range contains the registration number.
    NoMatch,
    /// No bucket for the (sector, subdistrict, gender) combination.
    NotFound,
    Invalid(ValidationError),
    NotReady,
    Unavailable,
}

/// Application session: the index is installed once and then only read.
#[derive(Default)]
pub struct Session {
    loaded: OnceLock<Result<LoadedIndex, String>>,
    ambiguous_lookups: AtomicU64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub records: usize,
    pub buckets: usize,
    pub report: LoadReport,
    pub ambiguous_lookups: u64,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn with_index(loaded: LoadedIndex) -> Self {
        let session = Session::new();
        session.finish(Ok(loaded));
        session
    }

    /// Record the outcome of loading. Only the first call has any effect.
    pub fn finish(&self, result: Result<LoadedIndex, LoadError>) -> bool {
        let result = result.map_err(|err| err.to_string());
        match &result {
            Ok(loaded) => info!(
                records = loaded.index.len(),
                buckets = loaded.index.bucket_count(),
                "station index ready"
            ),
            Err(err) => error!(error = %err, "station data failed to load"),
        }

        let installed = self.loaded.set(result).is_ok();
        if !installed {
            warn!("session already initialized, ignoring second load result");
        }
        installed
    }

    pub fn state(&self) -> SessionState<'_> {
        match self.loaded.get() {
            None => SessionState::Loading,
            Some(Ok(loaded)) => SessionState::Ready(loaded),
            Some(Err(err)) => SessionState::Failed(err),
        }
    }

    /// Validate a form submission and resolve it against the index.
    pub fn lookup(&self, form: &RawForm) -> LookupOutcome<'_> {
        let loaded = match self.state() {
            SessionState::Ready(loaded) => loaded,
            SessionState::Loading => return LookupOutcome::NotReady,
            SessionState::Failed(_) => return LookupOutcome::Unavailable,
        };

        let query = match validate(form) {
            Ok(query) => query,
            Err(err) => {
                debug!(fields = ?err.fields, "rejected form submission");
                return LookupOutcome::Invalid(err);
            }
        };

        let matches = match loaded.index.resolve(&query) {
            Ok(matches) => matches,
            Err(err) => {
                debug!(error = %err, "lookup path absent");
                return LookupOutcome::NotFound;
            }
        };

        let Some(record) = matches.first() else {
            return LookupOutcome::NoMatch;
        };

        if matches.is_ambiguous() {
            self.ambiguous_lookups.fetch_add(1, Ordering::Relaxed);
            warn!(
                sector = query.sector,
                subdistrict = query.subdistrict,
                gender = %query.gender,
                value = query.value,
                matches = matches.len(),
                "registration number matches several stations, using the first"
            );
        }

        LookupOutcome::Found {
            record,
            matches: matches.len(),
        }
    }

    pub fn stats(&self) -> SessionStats {
        let ambiguous_lookups = self.ambiguous_lookups.load(Ordering::Relaxed);
        let mut stats = SessionStats {
            state: "loading",
            error: None,
            records: 0,
            buckets: 0,
            report: LoadReport::default(),
            ambiguous_lookups,
        };

        match self.state() {
            SessionState::Loading => {}
            SessionState::Ready(loaded) => {
                stats.state = "ready";
                stats.records = loaded.index.len();
                stats.buckets = loaded.index.bucket_count();
                stats.report = loaded.report;
            }
            SessionState::Failed(err) => {
                stats.state = "failed";
                stats.error = Some(err.to_string());
            }
        }

        stats
    }
}
