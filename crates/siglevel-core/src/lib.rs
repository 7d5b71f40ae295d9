//! Signal bar classification for cellular and Wi-Fi radios.
//!
//! This crate contains:
//! - **Metrics** — per-technology radio readings (LTE, TD-SCDMA, GSM, CDMA, EVDO)
//! - **Threshold tables** — ordered boundary data plus a single top-down scan
//! - **Classifier** — fallback precedence between technologies and metrics
//! - **Config** — TOML-backed threshold selection and regional overrides
//! - **Wi-Fi** — RSSI to bar level mapping
//!
//! Everything here is a pure function of its inputs. A [`SignalLevelClassifier`]
//! can be shared between threads without synchronization.

pub mod classifier;
pub mod config;
pub mod metrics;
pub mod thresholds;
pub mod wifi;

pub use classifier::{Classification, LevelSource, SignalLevelClassifier};
pub use config::{ClassifierConfig, ClassifierConfigInput, ConfigError, RsrpThresholdType};
pub use metrics::RadioMetrics;

/// Default number of bars above "no signal".
pub const DEFAULT_MAX_LEVEL: u8 = 4;
