use awardscan_core::model::TierBasis;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub scan: ScanConfig,
    pub tiers: TierConfig,
    pub dedup: DedupConfig,
    pub source: SourceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScanConfig {
    /// Inclusive stay-length window in days.
    pub min_return_days: i64,
    pub max_return_days: i64,
    /// Tolerance applied around each candidate return date.
    pub flex_days: i64,
    #[serde(default = "default_true")]
    pub require_cabin_match: bool,
    /// Allow open-jaw pairs whose true endpoints differ.
    #[serde(default)]
    pub hub_routing: bool,
    /// Keep only records from this carrier when set.
    #[serde(default)]
    pub carrier_filter: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct TierConfig {
    pub sweet_spot_threshold: u64,
    pub upper_threshold: u64,
    #[serde(default)]
    pub basis: TierBasis,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DedupConfig {
    /// Zero or negative disables deduplication entirely.
    pub ttl_days: i64,
    pub cache_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub outbound_path: String,
    pub return_path: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of AWARDSCAN)
            // Eg.. `AWARDSCAN_SCAN__FLEX_DAYS=5` would set `scan.flex_days`
            .add_source(config::Environment::with_prefix("AWARDSCAN").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
