//! Raw radio readings as delivered by a telephony stack.
//!
//! Every scalar is an `Option<i32>`: `None` means the radio did not report
//! the metric. Platform sentinels (`INVALID`, ASU `99`) are stripped by the
//! `from_raw` constructors so the classifier never compares against a
//! magic number that could overlap a real reading.

use serde::{Deserialize, Serialize};

/// Platform marker for "metric not available" (`Integer.MAX_VALUE`).
pub const INVALID: i32 = i32::MAX;

/// ASU marker for "signal strength unknown" (TS 27.007 Sec 8.5).
pub const ASU_UNKNOWN: i32 = 99;

/// Anything below this is outside every physical range we classify.
pub const MIN_PLAUSIBLE: i32 = -200;

fn reported(raw: i32) -> Option<i32> {
    if raw == INVALID || raw < MIN_PLAUSIBLE {
        None
    } else {
        Some(raw)
    }
}

fn reported_asu(raw: i32) -> Option<i32> {
    if raw == ASU_UNKNOWN {
        None
    } else {
        reported(raw)
    }
}

/// One reading from the radio, tagged by technology family.
///
/// The GSM family covers every 3GPP technology (GSM, UMTS, TD-SCDMA, LTE);
/// the CDMA family covers 1x and EVDO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum RadioMetrics {
    Gsm(GsmFamilyMetrics),
    Cdma(CdmaFamilyMetrics),
}

impl RadioMetrics {
    /// Whether this reading belongs to the 3GPP family.
    pub fn is_gsm(&self) -> bool {
        matches!(self, RadioMetrics::Gsm(_))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GsmFamilyMetrics {
    pub lte: Option<LteMetrics>,
    pub td_scdma: Option<TdScdmaMetrics>,
    pub gsm: Option<GsmMetrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdmaFamilyMetrics {
    pub cdma: Option<CdmaMetrics>,
    pub evdo: Option<EvdoMetrics>,
}

/// LTE readings (TS 36.214 / TS 36.331).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LteMetrics {
    /// Reference Signal Received Power in dBm. Range: -140 to -44.
    pub rsrp_dbm: Option<i32>,
    /// Reference signal SNR in tenths of a dB. Range: -200 to 300.
    pub rssnr: Option<i32>,
    /// RSSI in ASU. Range: 0 to 63.
    pub rssi_asu: Option<i32>,
}

impl LteMetrics {
    pub fn from_raw(rsrp_dbm: i32, rssnr: i32, rssi_asu: i32) -> Self {
        LteMetrics {
            rsrp_dbm: reported(rsrp_dbm),
            rssnr: reported(rssnr),
            rssi_asu: reported_asu(rssi_asu),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TdScdmaMetrics {
    /// Received signal code power in dBm. Range: -120 to -25.
    pub rscp_dbm: Option<i32>,
}

impl TdScdmaMetrics {
    pub fn from_raw(rscp_dbm: i32) -> Self {
        TdScdmaMetrics {
            rscp_dbm: reported(rscp_dbm),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GsmMetrics {
    /// Signal strength in ASU. Range: 0 to 31.
    pub asu: Option<i32>,
    /// Signal strength in dBm, only consulted by regional UMTS thresholds.
    pub dbm: Option<i32>,
}

impl GsmMetrics {
    pub fn from_raw(asu: i32, dbm: i32) -> Self {
        GsmMetrics {
            asu: reported_asu(asu),
            dbm: reported(dbm),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdmaMetrics {
    /// Received power in dBm.
    pub dbm: Option<i32>,
    /// Ec/Io in tenths of a dB.
    pub ecio: Option<i32>,
}

impl CdmaMetrics {
    pub fn from_raw(dbm: i32, ecio: i32) -> Self {
        CdmaMetrics {
            dbm: reported(dbm),
            ecio: reported(ecio),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvdoMetrics {
    /// Received power in dBm.
    pub dbm: Option<i32>,
    /// Signal-to-noise ratio. Range: 0 to 8.
    pub snr: Option<i32>,
}

impl EvdoMetrics {
    pub fn from_raw(dbm: i32, snr: i32) -> Self {
        EvdoMetrics {
            dbm: reported(dbm),
            snr: reported(snr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_sentinel_becomes_none() {
        let lte = LteMetrics::from_raw(INVALID, INVALID, INVALID);
        assert_eq!(lte, LteMetrics::default());
    }

    #[test]
    fn asu_99_is_unknown() {
        let gsm = GsmMetrics::from_raw(99, -80);
        assert_eq!(gsm.asu, None);
        assert_eq!(gsm.dbm, Some(-80));

        let lte = LteMetrics::from_raw(-90, 150, 99);
        assert_eq!(lte.rssi_asu, None);
    }

    #[test]
    fn below_plausible_range_is_unknown() {
        let cdma = CdmaMetrics::from_raw(-250, -200);
        assert_eq!(cdma.dbm, None);
        assert_eq!(cdma.ecio, Some(-200));
    }

    #[test]
    fn real_readings_pass_through() {
        let evdo = EvdoMetrics::from_raw(-70, 6);
        assert_eq!(evdo.dbm, Some(-70));
        assert_eq!(evdo.snr, Some(6));
        assert_eq!(TdScdmaMetrics::from_raw(-60).rscp_dbm, Some(-60));
    }

    #[test]
    fn json_reading_is_tagged_by_family() {
        let m: RadioMetrics =
            serde_json::from_str(r#"{"family":"gsm","lte":{"rsrp_dbm":-90,"rssnr":150}}"#)
                .unwrap();
        assert!(m.is_gsm());
        let RadioMetrics::Gsm(gsm) = m else {
            panic!("expected gsm family");
        };
        let lte = gsm.lte.unwrap();
        assert_eq!(lte.rsrp_dbm, Some(-90));
        assert_eq!(lte.rssnr, Some(150));
        assert_eq!(lte.rssi_asu, None);
        assert!(gsm.td_scdma.is_none());

        let m: RadioMetrics =
            serde_json::from_str(r#"{"family":"cdma","cdma":{"dbm":-80}}"#).unwrap();
        assert!(!m.is_gsm());
    }
}
