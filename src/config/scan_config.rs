// src/config/scan_config.rs

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::search::params::{SearchParams, DEFAULT_EPS, DEFAULT_MAX_ATTEMPTS, DEFAULT_WARP_K};

/// Main scanner configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Warp exponent k of the phase mapping
    pub warp_k: f64,

    /// Acceptance window on the unit circle, in (0, 0.5)
    pub eps: f64,

    /// Candidate primes sampled per modulus before giving up
    pub max_attempts: u64,

    /// Decimal precision override; derived from the modulus when unset
    pub precision_digits: Option<u32>,

    /// Number of search workers (default: one per CPU)
    pub threads: Option<usize>,

    /// Logging level (error, warn, info, debug, trace)
    pub log_level: String,

    /// Report file written into the scanned directory
    pub report_file: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            warp_k: DEFAULT_WARP_K,
            eps: DEFAULT_EPS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            precision_digits: None,
            threads: None,
            log_level: "info".to_string(),
            report_file: "weak_moduli.txt".to_string(),
        }
    }
}

impl ScanConfig {
    /// Load configuration with precedence: config file -> env vars -> defaults
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::builder_with_defaults()?;

        if Path::new("phasesieve.toml").exists() {
            builder = builder.add_source(File::with_name("phasesieve.toml"));
        }

        builder = builder.add_source(Environment::with_prefix("PHASESIEVE").try_parsing(true));

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load configuration with custom file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut builder = Self::builder_with_defaults()?;

        if path.as_ref().exists() {
            builder = builder.add_source(File::from(path.as_ref()));
        }

        builder = builder.add_source(Environment::with_prefix("PHASESIEVE").try_parsing(true));

        let config = builder.build()?;
        config.try_deserialize()
    }

    fn builder_with_defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("warp_k", DEFAULT_WARP_K)?
            .set_default("eps", DEFAULT_EPS)?
            .set_default("max_attempts", DEFAULT_MAX_ATTEMPTS)?
            .set_default("log_level", "info")?
            .set_default("report_file", "weak_moduli.txt")
    }

    /// Search knobs as consumed by the controller.
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            warp_k: self.warp_k,
            eps: self.eps,
            max_attempts: self.max_attempts,
            precision_digits: self.precision_digits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_into_params() {
        let cfg = ScanConfig::default();
        let params = cfg.search_params();
        assert_eq!(params.warp_k, DEFAULT_WARP_K);
        assert_eq!(params.eps, DEFAULT_EPS);
        assert_eq!(params.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert!(params.validate().is_ok());
    }
}
