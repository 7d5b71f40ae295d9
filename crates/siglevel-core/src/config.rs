use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::DEFAULT_MAX_LEVEL;
use crate::thresholds::{RsrpTable, UmtsRegionalTable};

/// Entries in a regional threshold array.
pub const REGIONAL_THRESHOLD_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_level must be at least 1")]
    ZeroMaxLevel,
    #[error("{name} needs {expected} entries, got {got}{hint}")]
    OverrideLength {
        name: &'static str,
        expected: usize,
        got: usize,
        hint: &'static str,
    },
    #[error("{name}[{index}] = {value} leaves no room for the -10 dB bottom step")]
    OverrideOutOfRange {
        name: &'static str,
        index: usize,
        value: i32,
    },
    #[error("{name} must be strictly ascending, got {values:?}")]
    OverrideNotAscending {
        name: &'static str,
        values: Vec<i32>,
    },
    #[error("invalid config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Which built-in RSRP boundaries to use when no regional table applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsrpThresholdType {
    #[default]
    Strict,
    Lenient,
}

impl RsrpThresholdType {
    pub fn table(self) -> RsrpTable {
        match self {
            RsrpThresholdType::Strict => RsrpTable::STRICT,
            RsrpThresholdType::Lenient => RsrpTable::LENIENT,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassifierConfigInput {
    pub max_level: Option<u8>,
    pub rsrp_thresholds: RsrpThresholdType,
    pub regional_lte_thresholds: bool,
    pub lte_threshold_override: Vec<i32>,
    pub regional_umts_thresholds: bool,
    pub umts_threshold_override: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Highest bar level; 0 is always "no signal".
    pub max_level: u8,
    /// Working RSRP table (regional override already applied).
    pub rsrp_table: RsrpTable,
    /// A known RSRP level is final; RS-SNR and RSSI are not consulted.
    pub regional_lte: bool,
    /// GSM is classified from dBm against this table instead of ASU.
    pub umts_regional: Option<UmtsRegionalTable>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            rsrp_table: RsrpTable::STRICT,
            regional_lte: false,
            umts_regional: None,
        }
    }
}

const LTE_OVERRIDE_HINT: &str =
    " (the 7-entry RSRP table is derived from them by inserting entry[1] - 10)";

fn regional_array(
    name: &'static str,
    values: &[i32],
    hint: &'static str,
) -> Result<[i32; 6], ConfigError> {
    let array: [i32; REGIONAL_THRESHOLD_LEN] =
        values.try_into().map_err(|_| ConfigError::OverrideLength {
            name,
            expected: REGIONAL_THRESHOLD_LEN,
            got: values.len(),
            hint,
        })?;
    if array.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ConfigError::OverrideNotAscending {
            name,
            values: values.to_vec(),
        });
    }
    Ok(array)
}

impl ClassifierConfigInput {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        if input.trim().is_empty() {
            return Ok(ClassifierConfigInput::default());
        }
        Ok(toml::from_str(input)?)
    }

    pub fn resolve(self) -> Result<ClassifierConfig, ConfigError> {
        let max_level = self.max_level.unwrap_or(DEFAULT_MAX_LEVEL);
        if max_level == 0 {
            return Err(ConfigError::ZeroMaxLevel);
        }

        let mut rsrp_table = self.rsrp_thresholds.table();
        if self.regional_lte_thresholds {
            // An empty regional array keeps the base table but the regional
            // short-circuit still applies.
            if !self.lte_threshold_override.is_empty() {
                let name = "lte_threshold_override";
                let regional =
                    regional_array(name, &self.lte_threshold_override, LTE_OVERRIDE_HINT)?;
                if regional[1].checked_sub(10).is_none() {
                    return Err(ConfigError::OverrideOutOfRange {
                        name,
                        index: 1,
                        value: regional[1],
                    });
                }
                rsrp_table = RsrpTable::from_regional(&regional);
            }
        } else if !self.lte_threshold_override.is_empty() {
            tracing::debug!("lte_threshold_override set without regional_lte_thresholds, ignored");
        }

        let umts_regional = if self.regional_umts_thresholds {
            let regional =
                regional_array("umts_threshold_override", &self.umts_threshold_override, "")?;
            Some(UmtsRegionalTable::new(&regional))
        } else {
            if !self.umts_threshold_override.is_empty() {
                tracing::debug!(
                    "umts_threshold_override set without regional_umts_thresholds, ignored"
                );
            }
            None
        };

        let config = ClassifierConfig {
            max_level,
            rsrp_table,
            regional_lte: self.regional_lte_thresholds,
            umts_regional,
        };
        tracing::debug!(
            max_level,
            rsrp_table = ?config.rsrp_table.boundaries(),
            regional_lte = config.regional_lte,
            regional_umts = config.umts_regional.is_some(),
            "classifier config resolved"
        );
        Ok(config)
    }
}

impl ClassifierConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        ClassifierConfigInput::from_toml_str(input)?.resolve()
    }

    pub fn with_max_level(mut self, max_level: u8) -> Result<Self, ConfigError> {
        if max_level == 0 {
            return Err(ConfigError::ZeroMaxLevel);
        }
        self.max_level = max_level;
        Ok(self)
    }
}
