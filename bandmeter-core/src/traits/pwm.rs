//! PWM output trait
//!
//! A bank of PWM channels whose values are staged in memory and committed
//! to the outputs together by [`PwmOutput::flush`].

use crate::error::InvalidArgument;

/// Errors from a PWM bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmError {
    /// Channel index out of range; staged values unchanged
    InvalidArgument(InvalidArgument),
    /// Serial bus write failed; the latch was not pulsed
    Bus,
}

impl From<InvalidArgument> for PwmError {
    fn from(e: InvalidArgument) -> Self {
        PwmError::InvalidArgument(e)
    }
}

/// Multi-channel PWM output with staged values
pub trait PwmOutput {
    /// Number of channels
    fn channel_count(&self) -> usize;

    /// Largest value a channel can hold (`2^bit_depth - 1`)
    fn max_value(&self) -> u16;

    /// Stage `value` for `channel`
    ///
    /// Out-of-range values are clamped to `[0, max_value]`; an out-of-range
    /// channel is an error.
    fn set_value(&mut self, channel: usize, value: i32) -> Result<(), PwmError>;

    /// Staged value for `channel`
    fn value(&self, channel: usize) -> Option<u16>;

    /// Write every staged value to the hardware and latch it
    fn flush(&mut self) -> Result<(), PwmError>;

    /// Stage `value` on every channel without flushing
    fn set_all(&mut self, value: i32) -> Result<(), PwmError> {
        for channel in 0..self.channel_count() {
            self.set_value(channel, value)?;
        }
        Ok(())
    }

    /// Drive every channel to zero and flush
    fn reset_all(&mut self) -> Result<(), PwmError> {
        self.set_all(0)?;
        self.flush()
    }
}
