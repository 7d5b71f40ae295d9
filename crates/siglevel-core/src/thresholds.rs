//! # Threshold Tables
//!
//! Each metric maps to bars through an ordered table of boundaries, listed
//! strongest first. Classification is one scan for every table:
//!
//! 1. A reading above the table's ceiling is implausible → unknown.
//! 2. Otherwise the first boundary (from the strongest down) that the
//!    reading meets or exceeds decides the bars.
//! 3. A reading below every boundary is unknown.
//!
//! Bars are stored relative to the configured maximum so one table serves
//! any `max_level`. Every `i32` input has a defined result.
//!
//! LTE RSRP is the exception: its bars are the boundary *index* (see
//! [`RsrpTable`]), which is how device firmware reports it.

/// Bars assigned to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bars {
    /// `max_level - n`, saturating at zero.
    BelowMax(u8),
    /// Known reading, but no usable signal.
    Zero,
    /// Reading too weak to classify.
    Unknown,
}

impl Bars {
    fn resolve(self, max_level: u8) -> Option<u8> {
        match self {
            Bars::BelowMax(n) => Some(max_level.saturating_sub(n)),
            Bars::Zero => Some(0),
            Bars::Unknown => None,
        }
    }
}

/// One boundary: readings `>= min` get `bars`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub min: i32,
    pub bars: Bars,
}

impl Step {
    pub const fn below_max(min: i32, n: u8) -> Self {
        Step {
            min,
            bars: Bars::BelowMax(n),
        }
    }

    pub const fn zero(min: i32) -> Self {
        Step {
            min,
            bars: Bars::Zero,
        }
    }
}

/// The usual five-step ladder from `max_level` down to `max_level - 4`.
const fn ladder(b: [i32; 5]) -> [Step; 5] {
    [
        Step::below_max(b[0], 0),
        Step::below_max(b[1], 1),
        Step::below_max(b[2], 2),
        Step::below_max(b[3], 3),
        Step::below_max(b[4], 4),
    ]
}

/// Boundaries strongest-first plus an optional plausibility ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdTable<'a> {
    pub ceiling: Option<i32>,
    pub steps: &'a [Step],
}

impl ThresholdTable<'_> {
    /// Scan from the strongest boundary down. `None` means unknown.
    pub fn scan(&self, reading: i32, max_level: u8) -> Option<u8> {
        if self.ceiling.is_some_and(|ceiling| reading > ceiling) {
            return None;
        }
        self.steps
            .iter()
            .find(|step| reading >= step.min)
            .and_then(|step| step.bars.resolve(max_level))
    }
}

// ─── Fixed Tables ───────────────────────────────────────────────────────────

const LTE_RSSNR_STEPS: [Step; 6] = [
    Step::below_max(130, 0),
    Step::below_max(45, 1),
    Step::below_max(10, 2),
    Step::below_max(-30, 3),
    Step::below_max(-66, 4),
    Step::zero(-200),
];

/// LTE RS-SNR in tenths of a dB. ≥ 13.0 dB is full bars; above 30.0 dB is
/// implausible.
pub const LTE_RSSNR: ThresholdTable<'static> = ThresholdTable {
    ceiling: Some(300),
    steps: &LTE_RSSNR_STEPS,
};

const LTE_RSSI_STEPS: [Step; 5] = ladder([12, 8, 5, 2, 0]);

/// LTE RSSI in ASU; valid values are 0–63 (TS 36.331).
pub const LTE_RSSI: ThresholdTable<'static> = ThresholdTable {
    ceiling: Some(63),
    steps: &LTE_RSSI_STEPS,
};

const TD_SCDMA_STEPS: [Step; 5] = ladder([-49, -60, -73, -97, -110]);

/// TD-SCDMA RSCP in dBm.
pub const TD_SCDMA_RSCP: ThresholdTable<'static> = ThresholdTable {
    ceiling: Some(-25),
    steps: &TD_SCDMA_STEPS,
};

const GSM_ASU_STEPS: [Step; 5] = ladder([12, 9, 6, 4, 3]);

/// GSM signal strength in ASU (0–31). ASU 0–2 (-109 dBm or less) is too
/// weak to be worth a bar.
pub const GSM_ASU: ThresholdTable<'static> = ThresholdTable {
    ceiling: Some(31),
    steps: &GSM_ASU_STEPS,
};

const CDMA_DBM_STEPS: [Step; 5] = ladder([-75, -82, -88, -95, -100]);

pub const CDMA_DBM: ThresholdTable<'static> = ThresholdTable {
    ceiling: None,
    steps: &CDMA_DBM_STEPS,
};

const CDMA_ECIO_STEPS: [Step; 5] = ladder([-90, -105, -120, -135, -150]);

/// CDMA Ec/Io in tenths of a dB.
pub const CDMA_ECIO: ThresholdTable<'static> = ThresholdTable {
    ceiling: None,
    steps: &CDMA_ECIO_STEPS,
};

const EVDO_DBM_STEPS: [Step; 5] = ladder([-65, -75, -85, -95, -105]);

pub const EVDO_DBM: ThresholdTable<'static> = ThresholdTable {
    ceiling: None,
    steps: &EVDO_DBM_STEPS,
};

const EVDO_SNR_STEPS: [Step; 5] = ladder([7, 6, 4, 3, 1]);

/// EVDO SNR, 0–8.
pub const EVDO_SNR: ThresholdTable<'static> = ThresholdTable {
    ceiling: None,
    steps: &EVDO_SNR_STEPS,
};

// ─── LTE RSRP ───────────────────────────────────────────────────────────────

/// Seven ascending RSRP boundaries in dBm.
///
/// Index 6 is the ceiling (readings above it are unknown). Scanning top-down,
/// the bars are the index of the first boundary in `0..=5` the reading meets,
/// clamped to `max_level`. Below index 0 is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsrpTable([i32; 7]);

impl RsrpTable {
    /// Strict boundaries: fewer bars for the same reading.
    pub const STRICT: RsrpTable = RsrpTable([-140, -125, -115, -105, -95, -85, -44]);
    pub const LENIENT: RsrpTable = RsrpTable([-140, -128, -118, -108, -98, -88, -44]);

    pub const fn new(boundaries: [i32; 7]) -> Self {
        RsrpTable(boundaries)
    }

    /// Expand a six-entry regional threshold array into a working table.
    ///
    /// The regional arrays are calibrated 10 dB hot at the bottom step, so an
    /// extra boundary `c[1] - 10` is inserted and `c[1..]` shifts up by one.
    pub fn from_regional(c: &[i32; 6]) -> Self {
        RsrpTable([c[0], c[1].saturating_sub(10), c[1], c[2], c[3], c[4], c[5]])
    }

    pub fn boundaries(&self) -> &[i32; 7] {
        &self.0
    }

    pub fn scan(&self, rsrp_dbm: i32, max_level: u8) -> Option<u8> {
        if rsrp_dbm > self.0[6] {
            return None;
        }
        self.0[..6]
            .iter()
            .rposition(|&boundary| rsrp_dbm >= boundary)
            .map(|index| (index as u8).min(max_level))
    }
}

// ─── Regional UMTS ──────────────────────────────────────────────────────────

/// GSM/UMTS dBm table built from a six-entry regional array.
///
/// `dbm > u[5]` is unknown, `u[4]..u[1]` map to `max_level..max_level - 3`,
/// `u[0]` is zero bars and anything weaker is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UmtsRegionalTable {
    ceiling: i32,
    steps: [Step; 5],
}

impl UmtsRegionalTable {
    pub fn new(u: &[i32; 6]) -> Self {
        UmtsRegionalTable {
            ceiling: u[5],
            steps: [
                Step::below_max(u[4], 0),
                Step::below_max(u[3], 1),
                Step::below_max(u[2], 2),
                Step::below_max(u[1], 3),
                Step::zero(u[0]),
            ],
        }
    }

    pub fn table(&self) -> ThresholdTable<'_> {
        ThresholdTable {
            ceiling: Some(self.ceiling),
            steps: &self.steps,
        }
    }
}
