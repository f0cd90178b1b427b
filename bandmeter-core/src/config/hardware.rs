//! Hardware pin assignment
//!
//! Pins are named the way the board header labels them (`XIO1`, `CSI3`)
//! and resolved to a [`PinId`] once, when the configuration is loaded.

use core::fmt;

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::InvalidArgument;

/// Pins per header bank
pub const PINS_PER_BANK: u8 = 8;

/// Longest pin name (`XIO7`)
pub const MAX_PIN_NAME_LEN: usize = 8;

/// A GPIO line on the board header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "String<MAX_PIN_NAME_LEN>", into = "String<MAX_PIN_NAME_LEN>")
)]
pub enum PinId {
    /// I2C GPIO expander line `XIO0`-`XIO7`
    Xio(u8),
    /// Camera-interface data line `CSI0`-`CSI7`
    Csi(u8),
}

impl PinId {
    /// Parse a header label, case-insensitively
    pub fn parse(name: &str) -> Result<Self, InvalidArgument> {
        let name = name.trim();
        if name.len() != 4 || !name.is_ascii() {
            return Err(InvalidArgument::UnknownPin);
        }

        let (bank, index) = name.split_at(3);
        let index = index
            .parse::<u8>()
            .ok()
            .filter(|&i| i < PINS_PER_BANK)
            .ok_or(InvalidArgument::UnknownPin)?;

        if bank.eq_ignore_ascii_case("XIO") {
            Ok(PinId::Xio(index))
        } else if bank.eq_ignore_ascii_case("CSI") {
            Ok(PinId::Csi(index))
        } else {
            Err(InvalidArgument::UnknownPin)
        }
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinId::Xio(i) => write!(f, "XIO{}", i),
            PinId::Csi(i) => write!(f, "CSI{}", i),
        }
    }
}

impl TryFrom<String<MAX_PIN_NAME_LEN>> for PinId {
    type Error = InvalidArgument;

    fn try_from(name: String<MAX_PIN_NAME_LEN>) -> Result<Self, Self::Error> {
        PinId::parse(&name)
    }
}

impl From<PinId> for String<MAX_PIN_NAME_LEN> {
    fn from(pin: PinId) -> Self {
        use core::fmt::Write;

        let mut name = String::new();
        // "XIO7" always fits
        let _ = write!(name, "{}", pin);
        name
    }
}

/// Which header pin drives each hardware line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PinAssignment {
    /// TLC5947 XLAT
    pub pwm_latch: PinId,
    /// TLC5947 SIN
    pub pwm_data: PinId,
    /// TLC5947 SCLK
    pub pwm_clock: PinId,
    /// SSD1306 D/C#
    pub display_dc: PinId,
    /// SSD1306 RES#
    pub display_reset: PinId,
}

impl Default for PinAssignment {
    fn default() -> Self {
        Self {
            pwm_latch: PinId::Xio(1),
            pwm_data: PinId::Xio(5),
            pwm_clock: PinId::Xio(3),
            display_dc: PinId::Csi(1),
            display_reset: PinId::Csi(3),
        }
    }
}

impl PinAssignment {
    /// All assigned pins
    pub fn pins(&self) -> [PinId; 5] {
        [
            self.pwm_latch,
            self.pwm_data,
            self.pwm_clock,
            self.display_dc,
            self.display_reset,
        ]
    }

    /// Reject a pin used for two lines
    pub fn validate(&self) -> Result<(), InvalidArgument> {
        let pins = self.pins();
        for (i, pin) in pins.iter().enumerate() {
            if pins[i + 1..].contains(pin) {
                return Err(InvalidArgument::PinConflict { pin: *pin });
            }
        }
        Ok(())
    }
}
