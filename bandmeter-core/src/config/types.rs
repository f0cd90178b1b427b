//! Configuration type definitions
//!
//! Defaults describe the reference rig: a 3-sample window polled every
//! 100 ms, a 37 Mbit/s down / 8 Mbit/s up line, one TLC5947 board and a
//! 128x64 SSD1306.

use core::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::hardware::PinAssignment;
use crate::error::InvalidArgument;
use crate::rate::MAX_WINDOW_SIZE;

/// Maximum PWM channels (three daisy-chained 24-channel boards)
pub const MAX_PWM_CHANNELS: usize = 72;

/// Maximum PWM resolution in bits
pub const MAX_BIT_DEPTH: u8 = 16;

/// Largest panel the SSD1306 can address
pub const MAX_DISPLAY_WIDTH: usize = 128;
pub const MAX_DISPLAY_HEIGHT: usize = 64;

/// Maximum history slots on the chart
pub const MAX_HISTORY_LENGTH: usize = 64;

/// Rate sampling configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SamplingConfig {
    /// Samples in the smoothing window (higher is smoother but slower to react)
    pub window_size: usize,
    /// Time between ticks in milliseconds
    pub sample_period_ms: u32,
    /// Pause between the window's initial fills in milliseconds
    pub bootstrap_delay_ms: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            window_size: 3,
            sample_period_ms: 100,
            bootstrap_delay_ms: 0,
        }
    }
}

impl SamplingConfig {
    pub fn sample_period(&self) -> Duration {
        Duration::from_millis(self.sample_period_ms as u64)
    }

    pub fn bootstrap_delay(&self) -> Duration {
        Duration::from_millis(self.bootstrap_delay_ms as u64)
    }
}

/// One analog meter driven by a PWM channel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaugeConfig {
    /// PWM channel the meter is wired to
    pub channel: usize,
    /// Rate shown as full scale, in kilobits per second
    pub max_kbps: f64,
}

impl GaugeConfig {
    /// Full-scale rate in bits per second
    pub fn max_bps(&self) -> f64 {
        self.max_kbps * 1000.0
    }
}

/// PWM driver chain configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PwmConfig {
    /// Total channels across the chain
    pub channel_count: usize,
    /// Resolution of each channel
    pub bit_depth: u8,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            channel_count: 24,
            bit_depth: 12,
        }
    }
}

impl PwmConfig {
    /// Largest channel value
    pub fn max_value(&self) -> u16 {
        ((1u32 << self.bit_depth.min(MAX_BIT_DEPTH)) - 1) as u16
    }
}

/// OLED configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels (multiple of 8)
    pub height: usize,
    /// Contrast (0-0xCF)
    pub contrast: u8,
    /// Start in inverted mode
    pub inverted: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 64,
            contrast: 0xCF,
            inverted: false,
        }
    }
}

/// Complete rig configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MeterConfig {
    pub sampling: SamplingConfig,
    pub download: GaugeConfig,
    pub upload: GaugeConfig,
    pub pwm: PwmConfig,
    pub display: DisplayConfig,
    /// Columns on the history chart
    pub history_length: usize,
    /// Sweep both meters at start-up
    pub self_test: bool,
    pub pins: PinAssignment,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingConfig::default(),
            download: GaugeConfig {
                channel: 18,
                max_kbps: 37_000.0,
            },
            upload: GaugeConfig {
                channel: 12,
                max_kbps: 8_000.0,
            },
            pwm: PwmConfig::default(),
            display: DisplayConfig::default(),
            history_length: 16,
            self_test: true,
            pins: PinAssignment::default(),
        }
    }
}

impl MeterConfig {
    /// Check every cross-field constraint
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), InvalidArgument> {
        let window = self.sampling.window_size;
        if window < 2 {
            return Err(InvalidArgument::WindowTooSmall { window });
        }
        if window > MAX_WINDOW_SIZE {
            return Err(InvalidArgument::CapacityTooLarge {
                requested: window,
                max: MAX_WINDOW_SIZE,
            });
        }
        if self.sampling.sample_period_ms == 0 {
            return Err(InvalidArgument::SamplePeriod);
        }

        let count = self.pwm.channel_count;
        if count == 0 || count > MAX_PWM_CHANNELS {
            return Err(InvalidArgument::ChannelCount { count });
        }
        let bits = self.pwm.bit_depth;
        if bits == 0 || bits > MAX_BIT_DEPTH {
            return Err(InvalidArgument::BitDepth { bits });
        }

        for gauge in [&self.download, &self.upload] {
            if gauge.channel >= count {
                return Err(InvalidArgument::ChannelOutOfRange {
                    channel: gauge.channel,
                    count,
                });
            }
            if !(gauge.max_kbps > 0.0 && gauge.max_kbps.is_finite()) {
                return Err(InvalidArgument::MaxRate);
            }
        }
        if self.download.channel == self.upload.channel {
            return Err(InvalidArgument::ChannelConflict {
                channel: self.download.channel,
            });
        }

        let (width, height) = (self.display.width, self.display.height);
        if width == 0
            || width > MAX_DISPLAY_WIDTH
            || height == 0
            || height > MAX_DISPLAY_HEIGHT
            || height % 8 != 0
        {
            return Err(InvalidArgument::DisplaySize { width, height });
        }

        let length = self.history_length;
        if length == 0 || length > MAX_HISTORY_LENGTH || width / length < 2 {
            return Err(InvalidArgument::HistoryLength { length });
        }

        self.pins.validate()
    }
}
