//! Staking configuration with TOML file support.
//!
//! A [`StakingConfig`] describes the staking-related chain parameters: which
//! asset may be staked, the minimum stake, the timestamp tolerance and the
//! program list. It converts into the [`ChainParameters`] record the
//! evaluators read.

use lockvote_types::{
    AssetId, ChainExtension, ChainParameters, IdParseError, StakingWeight,
    DEFAULT_MIN_STAKING_AMOUNT, STAKING_EXPIRED_TIME,
};
use lockvote_utils::{try_init_logging, LogFormat, LoggingError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid staking_asset: {0}")]
    Asset(#[from] IdParseError),

    #[error("failed to initialise logging: {0}")]
    Logging(#[from] LoggingError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// One `[[programs]]` entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramConfig {
    pub program_id: String,
    pub staking_days: u32,
    pub weight: u32,
    #[serde(default = "default_true")]
    pub is_valid: bool,
}

/// Can be loaded from a TOML file via [`StakingConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingConfig {
    /// Asset id in `1.3.N` form.
    #[serde(default = "default_staking_asset")]
    pub staking_asset: String,

    /// Raw units.
    #[serde(default = "default_min_staking_amount")]
    pub min_staking_amount: u64,

    /// Tolerance for `create_date_time` against head time, in seconds.
    #[serde(default = "default_expired_time_secs")]
    pub expired_time_secs: u64,

    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Registration order is kept; a repeated id is shadowed by its first entry.
    #[serde(default)]
    pub programs: Vec<ProgramConfig>,
}

fn default_staking_asset() -> String {
    AssetId::CORE.to_string()
}

fn default_min_staking_amount() -> u64 {
    DEFAULT_MIN_STAKING_AMOUNT
}

fn default_expired_time_secs() -> u64 {
    STAKING_EXPIRED_TIME
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl StakingConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Install the global subscriber described by `log_format` and `log_level`.
    pub fn init_logging(&self) -> Result<(), ConfigError> {
        try_init_logging(self.log_format, &self.log_level)?;
        Ok(())
    }

    pub fn staking_asset(&self) -> Result<AssetId, ConfigError> {
        Ok(self.staking_asset.parse()?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.staking_asset()?;
        if self.min_staking_amount == 0 {
            return Err(ConfigError::Invalid(
                "min_staking_amount must be positive".into(),
            ));
        }
        let mut seen = BTreeSet::new();
        for program in &self.programs {
            if program.program_id.is_empty() {
                return Err(ConfigError::Invalid("program with empty program_id".into()));
            }
            if program.staking_days == 0 {
                return Err(ConfigError::Invalid(format!(
                    "program {:?} has zero staking_days",
                    program.program_id
                )));
            }
            if program.weight == 0 {
                return Err(ConfigError::Invalid(format!(
                    "program {:?} has zero weight",
                    program.program_id
                )));
            }
            if !seen.insert(program.program_id.as_str()) {
                tracing::warn!(
                    program = %program.program_id,
                    "duplicate staking program, first entry wins"
                );
            }
        }
        Ok(())
    }

    /// Validate and build the chain parameters.
    pub fn chain_parameters(&self) -> Result<ChainParameters, ConfigError> {
        self.validate()?;
        let programs = self
            .programs
            .iter()
            .map(|p| {
                (
                    p.program_id.clone(),
                    StakingWeight {
                        staking_days: p.staking_days,
                        weight: p.weight,
                        is_valid: p.is_valid,
                    },
                )
            })
            .collect();
        Ok(ChainParameters {
            staking_asset: self.staking_asset()?,
            min_staking_amount: self.min_staking_amount,
            staking_expired_time: self.expired_time_secs,
            extensions: vec![ChainExtension::StakingParams(programs)],
        })
    }

    pub fn into_chain_parameters(self) -> Result<ChainParameters, ConfigError> {
        self.chain_parameters()
    }
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            staking_asset: default_staking_asset(),
            min_staking_amount: default_min_staking_amount(),
            expired_time_secs: default_expired_time_secs(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            programs: Vec::new(),
        }
    }
}
