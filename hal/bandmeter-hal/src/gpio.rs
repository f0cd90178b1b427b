//! GPIO pin abstractions
//!
//! Output-only: every line the rig drives (PWM latch, OLED data/command
//! select, OLED reset) is push-pull and never read back from hardware.

/// Logic level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Digital output pin
///
/// Writes are synchronous: when a call returns the line is at the
/// requested level.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Drive the pin to `level`
    fn set_level(&mut self, level: Level) {
        match level {
            Level::High => self.set_high(),
            Level::Low => self.set_low(),
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;

    /// Emit a high-then-low pulse
    ///
    /// Used for latch lines that commit on the falling edge of a short pulse.
    fn pulse(&mut self) {
        self.set_high();
        self.set_low();
    }
}
