//! TLC5947 24-channel 12-bit PWM driver
//!
//! The TLC5947 is a constant-current LED sink driven as a shift register:
//! 288 bits are clocked in on SIN/SCLK, then a pulse on XLAT copies the
//! shift register into the output latches. Chained chips simply extend the
//! register, so a bank of any multiple of 24 channels works the same way.
//!
//! On the rig the outputs drive analog panel meters instead of LEDs.
//!
//! # Wire order
//!
//! The first bit shifted in ends up at the far end of the chain, so the
//! highest channel is sent first and channel 0 last.

use bandmeter_core::traits::{PwmError, PwmOutput};
use bandmeter_core::InvalidArgument;
use bandmeter_hal::{Mode, OutputPin, SpiBus};

use super::bank::ChannelBank;

/// Channels per chip
pub const CHANNELS_PER_CHIP: usize = 24;

/// Grayscale resolution
pub const BIT_DEPTH: u8 = 12;

/// SIN is sampled on the rising edge of SCLK
pub const SPI_MODE: Mode = Mode::Mode0;

/// TLC5947 bank on a write-only serial bus plus a latch line
pub struct Tlc5947<SPI, LATCH> {
    spi: SPI,
    latch: LATCH,
    bank: ChannelBank,
}

impl<SPI, LATCH> Tlc5947<SPI, LATCH>
where
    SPI: SpiBus,
    LATCH: OutputPin,
{
    /// Create a driver for `channel_count` channels of `bit_depth` bits
    ///
    /// The latch is driven low; outputs are not touched until the first
    /// flush.
    pub fn new(
        spi: SPI,
        mut latch: LATCH,
        channel_count: usize,
        bit_depth: u8,
    ) -> Result<Self, InvalidArgument> {
        let bank = ChannelBank::new(channel_count, bit_depth)?;
        latch.set_low();
        Ok(Self { spi, latch, bank })
    }

    /// Driver for a single chip
    pub fn single(spi: SPI, latch: LATCH) -> Result<Self, InvalidArgument> {
        Self::new(spi, latch, CHANNELS_PER_CHIP, BIT_DEPTH)
    }

    /// Staged values
    pub fn bank(&self) -> &ChannelBank {
        &self.bank
    }

    /// Snapshot of every staged value, channel 0 first
    pub fn values(&self) -> &[u16] {
        self.bank.values()
    }

    /// Release the bus and latch pin
    pub fn release(self) -> (SPI, LATCH) {
        (self.spi, self.latch)
    }
}

impl<SPI, LATCH> PwmOutput for Tlc5947<SPI, LATCH>
where
    SPI: SpiBus,
    LATCH: OutputPin,
{
    fn channel_count(&self) -> usize {
        self.bank.channel_count()
    }

    fn max_value(&self) -> u16 {
        self.bank.max_value()
    }

    fn set_value(&mut self, channel: usize, value: i32) -> Result<(), PwmError> {
        self.bank.set_value(channel, value)?;
        Ok(())
    }

    fn value(&self, channel: usize) -> Option<u16> {
        self.bank.value(channel)
    }

    fn flush(&mut self) -> Result<(), PwmError> {
        let stream = self.bank.encode();
        self.spi.write(&stream).map_err(|_| PwmError::Bus)?;
        self.latch.pulse();
        Ok(())
    }

    fn set_all(&mut self, value: i32) -> Result<(), PwmError> {
        self.bank.set_all(value);
        Ok(())
    }
}
