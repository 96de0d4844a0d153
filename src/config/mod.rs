//! # Dispatch Configuration
//!
//! Settings are layered, later sources winning:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file
//! 3. `DISPATCH__`-prefixed environment variables, `__` separating nesting
//!    levels (`DISPATCH__BATCH__MAX_CONCURRENT_COMMITS=32`)
//!
//! The merged result is validated before it is handed out.
//!
//! ```toml
//! environment = "production"
//!
//! [scheduling]
//! min_rta_days = 0.5
//! fallback_trip_ratio = 0.5
//!
//! [batch]
//! max_concurrent_commits = 16
//! ```

pub mod error;

pub use error::ConfigurationError;

use crate::scheduling::{RtaPolicy, DEFAULT_FALLBACK_TRIP_RATIO, DEFAULT_MIN_RTA_DAYS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const ENV_PREFIX: &str = "DISPATCH";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub environment: String,
    pub scheduling: SchedulingConfig,
    pub batch: BatchConfig,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            scheduling: SchedulingConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

/// RTA estimation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    pub min_rta_days: f64,
    pub fallback_trip_ratio: f64,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            min_rta_days: DEFAULT_MIN_RTA_DAYS,
            fallback_trip_ratio: DEFAULT_FALLBACK_TRIP_RATIO,
        }
    }
}

impl SchedulingConfig {
    pub fn rta_policy(&self) -> RtaPolicy {
        RtaPolicy {
            min_rta_days: self.min_rta_days,
            fallback_trip_ratio: self.fallback_trip_ratio,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Upper bound on remote commits in flight for one batch
    pub max_concurrent_commits: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_commits: 16,
        }
    }
}

impl DispatchConfig {
    /// Load defaults, then `path` (if given), then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigurationError::ConfigFileNotFound {
                    path: path.to_path_buf(),
                });
            }
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let loaded: DispatchConfig = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        loaded.validate()?;

        debug!(
            environment = %loaded.environment,
            config_file = ?path,
            max_concurrent_commits = loaded.batch.max_concurrent_commits,
            "Dispatch configuration loaded"
        );

        Ok(loaded)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.environment.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "environment",
                "dispatch configuration",
            ));
        }

        let scheduling = &self.scheduling;
        if !scheduling.min_rta_days.is_finite() || scheduling.min_rta_days < 0.0 {
            return Err(ConfigurationError::invalid_value(
                "scheduling.min_rta_days",
                scheduling.min_rta_days,
                "must be a non-negative number of days",
            ));
        }
        if !scheduling.fallback_trip_ratio.is_finite() || scheduling.fallback_trip_ratio < 0.0 {
            return Err(ConfigurationError::invalid_value(
                "scheduling.fallback_trip_ratio",
                scheduling.fallback_trip_ratio,
                "must be a non-negative ratio",
            ));
        }

        if self.batch.max_concurrent_commits == 0 {
            return Err(ConfigurationError::invalid_value(
                "batch.max_concurrent_commits",
                self.batch.max_concurrent_commits,
                "at least one commit must be allowed in flight",
            ));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
