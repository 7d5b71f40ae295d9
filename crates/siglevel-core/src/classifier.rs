//! # Signal Level Classification
//!
//! Maps one [`RadioMetrics`] reading to a bar level in `[0, max_level]`.
//!
//! ## Precedence
//!
//! | Family | Order |
//! |--------|-------|
//! | GSM (3GPP) | LTE → TD-SCDMA → GSM, first with at least one bar |
//! | CDMA | lower of EVDO and CDMA when both have bars, else whichever does |
//!
//! Inside a technology, two independent measurements (RSRP vs RS-SNR,
//! dBm vs Ec/Io, dBm vs SNR) combine conservatively: when both are known
//! the lower wins, otherwise the known one is used.
//!
//! Between technologies a zero-bar result does not stop the search: the
//! radio reports "no signal" and "unknown" with the same value, so the
//! next technology gets a chance. A known zero is only reported when
//! nothing better exists.
//!
//! Unknown is never an error. The worst output is level 0.

use serde::Serialize;

use crate::config::ClassifierConfig;
use crate::metrics::{
    CdmaFamilyMetrics, CdmaMetrics, EvdoMetrics, GsmFamilyMetrics, GsmMetrics, LteMetrics,
    RadioMetrics, TdScdmaMetrics,
};
use crate::thresholds::{
    CDMA_DBM, CDMA_ECIO, EVDO_DBM, EVDO_SNR, GSM_ASU, LTE_RSSI, LTE_RSSNR, TD_SCDMA_RSCP,
};

/// Which measurement decided the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelSource {
    LteRsrp,
    LteRssnr,
    LteRssi,
    TdScdma,
    Gsm,
    Cdma,
    Evdo,
    Unknown,
}

/// Result of [`SignalLevelClassifier::classify_detailed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// `None` when no metric could be classified.
    pub level: Option<u8>,
    pub source: LevelSource,
}

impl Classification {
    const UNKNOWN: Classification = Classification {
        level: None,
        source: LevelSource::Unknown,
    };

    /// Bar count to display; unknown shows as no signal.
    pub fn bars(&self) -> u8 {
        self.level.unwrap_or(0)
    }
}

type Scored = Option<(u8, LevelSource)>;

/// Lower of two known levels, or whichever is known. Ties keep `a`.
fn lower_known(a: Scored, b: Scored) -> Scored {
    match (a, b) {
        (Some(a), Some(b)) if b.0 < a.0 => Some(b),
        (Some(a), _) => Some(a),
        (None, b) => b,
    }
}

fn with_bars(s: Scored) -> Scored {
    s.filter(|(level, _)| *level > 0)
}

/// Stateless classifier. Cheap to clone, safe to share between threads.
#[derive(Debug, Clone, Default)]
pub struct SignalLevelClassifier {
    config: ClassifierConfig,
}

impl SignalLevelClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        SignalLevelClassifier { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn max_level(&self) -> u8 {
        self.config.max_level
    }

    /// Bar level in `[0, max_level]`.
    pub fn classify(&self, metrics: &RadioMetrics) -> u8 {
        self.classify_detailed(metrics).bars()
    }

    pub fn classify_detailed(&self, metrics: &RadioMetrics) -> Classification {
        let scored = match metrics {
            RadioMetrics::Gsm(m) => self.gsm_family(m),
            RadioMetrics::Cdma(m) => self.cdma_family(m),
        };
        let classification = match scored {
            Some((level, source)) => Classification {
                level: Some(level.min(self.config.max_level)),
                source,
            },
            None => Classification::UNKNOWN,
        };
        tracing::trace!(
            gsm = metrics.is_gsm(),
            level = ?classification.level,
            source = ?classification.source,
            "signal classified"
        );
        classification
    }

    fn gsm_family(&self, m: &GsmFamilyMetrics) -> Scored {
        let lte = m.lte.as_ref().and_then(|lte| self.lte_scored(lte));
        let td_scdma = m.td_scdma.as_ref().and_then(|td| self.td_scdma_scored(td));
        let gsm = m.gsm.as_ref().and_then(|gsm| self.gsm_scored(gsm));

        with_bars(lte)
            .or(with_bars(td_scdma))
            .or(with_bars(gsm))
            .or(lte)
            .or(td_scdma)
            .or(gsm)
    }

    fn cdma_family(&self, m: &CdmaFamilyMetrics) -> Scored {
        let evdo = m.evdo.as_ref().and_then(|evdo| self.evdo_scored(evdo));
        let cdma = m.cdma.as_ref().and_then(|cdma| self.cdma_scored(cdma));

        lower_known(with_bars(evdo), with_bars(cdma)).or_else(|| lower_known(evdo, cdma))
    }

    // ─── LTE ────────────────────────────────────────────────────────────

    /// LTE level from RSRP and RS-SNR, falling back to RSSI.
    pub fn lte_level(&self, lte: &LteMetrics) -> Option<u8> {
        self.lte_scored(lte).map(|(level, _)| level)
    }

    fn lte_scored(&self, lte: &LteMetrics) -> Scored {
        let max_level = self.config.max_level;
        let rsrp = lte
            .rsrp_dbm
            .and_then(|rsrp| self.config.rsrp_table.scan(rsrp, max_level))
            .map(|level| (level, LevelSource::LteRsrp));

        if self.config.regional_lte && rsrp.is_some() {
            return rsrp;
        }

        let rssnr = lte
            .rssnr
            .and_then(|snr| LTE_RSSNR.scan(snr, max_level))
            .map(|level| (level, LevelSource::LteRssnr));

        // Never show more bars than the weaker of RSRP and RS-SNR justifies.
        lower_known(rsrp, rssnr).or_else(|| {
            lte.rssi_asu
                .and_then(|asu| LTE_RSSI.scan(asu, max_level))
                .map(|level| (level, LevelSource::LteRssi))
        })
    }

    // ─── TD-SCDMA / GSM ─────────────────────────────────────────────────

    pub fn td_scdma_level(&self, td: &TdScdmaMetrics) -> Option<u8> {
        self.td_scdma_scored(td).map(|(level, _)| level)
    }

    fn td_scdma_scored(&self, td: &TdScdmaMetrics) -> Scored {
        td.rscp_dbm
            .and_then(|rscp| TD_SCDMA_RSCP.scan(rscp, self.config.max_level))
            .map(|level| (level, LevelSource::TdScdma))
    }

    /// GSM level from ASU, or from dBm when regional UMTS thresholds are on.
    pub fn gsm_level(&self, gsm: &GsmMetrics) -> Option<u8> {
        self.gsm_scored(gsm).map(|(level, _)| level)
    }

    fn gsm_scored(&self, gsm: &GsmMetrics) -> Scored {
        let max_level = self.config.max_level;
        let level = match &self.config.umts_regional {
            Some(umts) => gsm.dbm.and_then(|dbm| umts.table().scan(dbm, max_level)),
            None => gsm.asu.and_then(|asu| GSM_ASU.scan(asu, max_level)),
        };
        level.map(|level| (level, LevelSource::Gsm))
    }

    // ─── CDMA / EVDO ────────────────────────────────────────────────────

    pub fn cdma_level(&self, cdma: &CdmaMetrics) -> Option<u8> {
        self.cdma_scored(cdma).map(|(level, _)| level)
    }

    fn cdma_scored(&self, cdma: &CdmaMetrics) -> Scored {
        let max_level = self.config.max_level;
        let dbm = cdma.dbm.and_then(|dbm| CDMA_DBM.scan(dbm, max_level));
        let ecio = cdma.ecio.and_then(|ecio| CDMA_ECIO.scan(ecio, max_level));
        lower_of(dbm, ecio).map(|level| (level, LevelSource::Cdma))
    }

    pub fn evdo_level(&self, evdo: &EvdoMetrics) -> Option<u8> {
        self.evdo_scored(evdo).map(|(level, _)| level)
    }

    fn evdo_scored(&self, evdo: &EvdoMetrics) -> Scored {
        let max_level = self.config.max_level;
        let dbm = evdo.dbm.and_then(|dbm| EVDO_DBM.scan(dbm, max_level));
        let snr = evdo.snr.and_then(|snr| EVDO_SNR.scan(snr, max_level));
        lower_of(dbm, snr).map(|level| (level, LevelSource::Evdo))
    }
}

fn lower_of(a: Option<u8>, b: Option<u8>) -> Option<u8> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Classify with the built-in strict thresholds and no regional overrides.
///
/// `max_level` of 0 is treated as 1.
pub fn classify(metrics: &RadioMetrics, max_level: u8) -> u8 {
    let config = ClassifierConfig {
        max_level: max_level.max(1),
        ..ClassifierConfig::default()
    };
    SignalLevelClassifier::new(config).classify(metrics)
}
