use std::{
    path::Path,
    time::{Duration, Instant},
};

use serde::Serialize;
use tracing::warn;

use crate::{
    DataConfig, Index, JoinReport, LoadError, NameNormalizer, ParseError, SubdistrictTable,
    build_index, join, log_with_elapsed,
    parsing::{ParsedData, parse_features, parse_records},
};

/// A ready-to-query index plus the data quality counts gathered building it.
#[derive(Debug, Default)]
pub struct LoadedIndex {
    pub index: Index,
    pub report: LoadReport,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub rejected_rows: usize,
    pub rejected_features: usize,
    pub join: JoinReport,
}

/// Fetch both datasets, wait for both, then join and index them.
pub async fn load_index(config: &DataConfig) -> Result<LoadedIndex, LoadError> {
    let start = Instant::now();

    let (records, features, subdistricts) = tokio::try_join!(
        fetch(&config.records_path, config),
        fetch(&config.features_path, config),
        fetch(&config.subdistricts_path, config),
    )?;

    log_with_elapsed(
        start,
        &format!(
            "Fetched {} bytes of station records and {} bytes of geographic features.",
            records.len(),
            features.len()
        ),
    );

    let table = SubdistrictTable::from_json(&subdistricts)
        .map_err(parse_error(&config.subdistricts_path))?;
    let rows = parse_records(&records).map_err(parse_error(&config.records_path))?;
    let features = parse_features(&features).map_err(parse_error(&config.features_path))?;

    log_with_elapsed(
        start,
        &format!(
            "Parsed {} station records, {} features and {} subdistrict names.",
            rows.rows.len(),
            features.features.len(),
            table.len()
        ),
    );

    let loaded = prepare(&ParsedData::from_parts(rows, features), &table);

    log_with_elapsed(
        start,
        &format!(
            "Built index: {} records in {} buckets ({} unresolved places, {} unknown subdistricts).",
            loaded.index.len(),
            loaded.index.bucket_count(),
            loaded.report.join.unresolved_places,
            loaded.report.join.unknown_subdistricts
        ),
    );

    Ok(loaded)
}

/// Join parsed datasets and build the index.
pub fn prepare(data: &ParsedData, normalizer: &impl NameNormalizer) -> LoadedIndex {
    let joined = join(&data.rows, &data.features, normalizer);

    LoadedIndex {
        index: build_index(joined.records),
        report: LoadReport {
            rejected_rows: data.rejected_rows,
            rejected_features: data.rejected_features,
            join: joined.report,
        },
    }
}

fn parse_error(path: &Path) -> impl FnOnce(ParseError) -> LoadError + '_ {
    move |source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    }
}

/// Read a source file, retrying a bounded number of times.
async fn fetch(path: &Path, config: &DataConfig) -> Result<Vec<u8>, LoadError> {
    let attempts = config.fetch_attempts.max(1);
    let mut attempt = 1;

    loop {
        match read(path).await {
            Ok(bytes) => return Ok(bytes),
            Err(err) if attempt < attempts => {
                warn!(path = %path.display(), attempt, error = %err, "fetch failed, retrying");
                tokio::time::sleep(backoff(config.retry_delay, attempt)).await;
                attempt += 1;
            }
            Err(source) => {
                return Err(LoadError::Fetch {
                    path: path.to_path_buf(),
                    attempts: attempt,
                    source,
                });
            }
        }
    }
}

/// Linear backoff, saturating instead of overflowing.
fn backoff(delay: Duration, attempt: u32) -> Duration {
    delay.checked_mul(attempt).unwrap_or(Duration::MAX)
}

async fn read(path: &Path) -> std::io::Result<Vec<u8>> {
    let bytes = tokio::fs::read(path).await?;

    #[cfg(feature = "compressed_data")]
    if path.extension().is_some_and(|ext| ext == "gz") {
        use flate2::bufread::GzDecoder;
        use std::io::Read;

        let mut decoded = Vec::new();
        GzDecoder::new(bytes.as_slice()).read_to_end(&mut decoded)?;
        return Ok(decoded);
    }

    Ok(bytes)
}
