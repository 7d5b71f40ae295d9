//! Wi-Fi RSSI to bar level.
//!
//! Linear mapping between [`MIN_RSSI`] and [`MAX_RSSI`], split into
//! `num_levels` buckets. Unlike the cellular tables there is no unknown
//! result: a missing RSSI reads as [`MISSING_RSSI`], which is zero bars.

/// At or below this the link gets zero bars.
pub const MIN_RSSI: i32 = -100;
/// At or above this the link gets full bars.
pub const MAX_RSSI: i32 = -55;
/// Stand-in for a missing reading, below [`MIN_RSSI`].
pub const MISSING_RSSI: i32 = -200;

/// Bar level in `[0, num_levels - 1]`. Zero or one level always yields 0.
pub fn wifi_level(rssi_dbm: Option<i32>, num_levels: u8) -> u8 {
    if num_levels <= 1 {
        return 0;
    }
    let rssi = rssi_dbm.unwrap_or(MISSING_RSSI);
    let top = i32::from(num_levels - 1);
    let level = if rssi <= MIN_RSSI {
        0
    } else if rssi >= MAX_RSSI {
        top
    } else {
        (rssi - MIN_RSSI) * top / (MAX_RSSI - MIN_RSSI)
    };
    level as u8
}

/// Picks one resource (icon, label, ...) per bar level.
///
/// The number of levels is the number of resources.
#[derive(Debug, Clone, Copy)]
pub struct WifiLevelMapper<'a, T> {
    resources: &'a [T],
}

impl<'a, T> WifiLevelMapper<'a, T> {
    pub fn new(resources: &'a [T]) -> Self {
        WifiLevelMapper { resources }
    }

    pub fn num_levels(&self) -> u8 {
        u8::try_from(self.resources.len()).unwrap_or(u8::MAX)
    }

    pub fn level(&self, rssi_dbm: Option<i32>) -> u8 {
        wifi_level(rssi_dbm, self.num_levels())
    }

    /// `None` only when there are no resources.
    pub fn resource(&self, rssi_dbm: Option<i32>) -> Option<&'a T> {
        self.resources.get(usize::from(self.level(rssi_dbm)))
    }
}
