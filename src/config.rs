use std::{path::PathBuf, time::Duration};

const DEFAULT_RECORDS_PATH: &str = "data/data.json";
const DEFAULT_FEATURES_PATH: &str = "data/pollingstations.geojson";
const DEFAULT_SUBDISTRICTS_PATH: &str = "data/subdistricts.json";
const DEFAULT_FETCH_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_DELAY_MS: u64 = 500;
const MAX_RETRY_DELAY_MS: u64 = 60_000;

/// Where the source datasets live and how hard to try reading them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    pub records_path: PathBuf,
    pub features_path: PathBuf,
    pub subdistricts_path: PathBuf,
    pub fetch_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            records_path: PathBuf::from(DEFAULT_RECORDS_PATH),
            features_path: PathBuf::from(DEFAULT_FEATURES_PATH),
            subdistricts_path: PathBuf::from(DEFAULT_SUBDISTRICTS_PATH),
            fetch_attempts: DEFAULT_FETCH_ATTEMPTS,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub data: DataConfig,
    pub quiet: bool,
}

impl Config {
    /// Read configuration from `STATION_LOOKUP_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source. Unset or
    /// unparsable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DataConfig::default();
        let path = |key: &str, default: PathBuf| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(default)
        };

        let fetch_attempts = lookup("STATION_LOOKUP_FETCH_ATTEMPTS")
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(defaults.fetch_attempts);
        let retry_delay = lookup("STATION_LOOKUP_RETRY_DELAY_MS")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(|ms| Duration::from_millis(ms.min(MAX_RETRY_DELAY_MS)))
            .unwrap_or(defaults.retry_delay);
        let quiet = lookup("STATION_LOOKUP_QUIET")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Config {
            data: DataConfig {
                records_path: path("STATION_LOOKUP_RECORDS", defaults.records_path),
                features_path: path("STATION_LOOKUP_FEATURES", defaults.features_path),
                subdistricts_path: path("STATION_LOOKUP_SUBDISTRICTS", defaults.subdistricts_path),
                fetch_attempts,
                retry_delay,
            },
            quiet,
        }
    }
}
