//! Rate reading value type

/// A bandwidth reading in three units
///
/// All fields are derived from the same bits-per-second figure and are
/// never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateReading {
    pub bits_per_second: f64,
    pub kilobits_per_second: f64,
    pub megabits_per_second: f64,
}

/// Unit picked by [`RateReading::scaled`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RateUnit {
    BitsPerSecond,
    KilobitsPerSecond,
    MegabitsPerSecond,
}

impl RateUnit {
    /// Short label for log lines
    pub const fn symbol(self) -> &'static str {
        match self {
            RateUnit::BitsPerSecond => "bps",
            RateUnit::KilobitsPerSecond => "Kbps",
            RateUnit::MegabitsPerSecond => "Mbps",
        }
    }
}

impl RateReading {
    /// Reading substituted when a fetch fails
    pub const ZERO: Self = Self {
        bits_per_second: 0.0,
        kilobits_per_second: 0.0,
        megabits_per_second: 0.0,
    };

    /// Build a reading from bits per second
    ///
    /// Negative and NaN inputs become zero.
    pub fn from_bps(bps: f64) -> Self {
        let bps = if bps.is_nan() { 0.0 } else { bps.max(0.0) };
        let kbps = bps / 1000.0;
        Self {
            bits_per_second: bps,
            kilobits_per_second: kbps,
            megabits_per_second: kbps / 1000.0,
        }
    }

    /// Largest unit in which the value exceeds one
    pub fn scaled(&self) -> (f64, RateUnit) {
        if self.megabits_per_second > 1.0 {
            (self.megabits_per_second, RateUnit::MegabitsPerSecond)
        } else if self.kilobits_per_second > 1.0 {
            (self.kilobits_per_second, RateUnit::KilobitsPerSecond)
        } else {
            (self.bits_per_second, RateUnit::BitsPerSecond)
        }
    }
}
