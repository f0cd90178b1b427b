//! Staged PWM channel values and their shift-register encoding
//!
//! The bank knows nothing about buses. It holds one clamped value per
//! channel and turns them into the byte stream a daisy-chained shift
//! register expects: the last channel is shifted in first, each word is
//! `bit_depth` bits MSB-first, and the stream is left-padded with zeros to
//! a whole number of bytes so the padding falls off the far end of the
//! chain.

use bandmeter_core::config::{MAX_BIT_DEPTH, MAX_PWM_CHANNELS};
use bandmeter_core::InvalidArgument;
use heapless::Vec;

/// Largest encoded stream: every channel at the maximum bit depth
pub const MAX_WIRE_LEN: usize = MAX_PWM_CHANNELS * MAX_BIT_DEPTH as usize / 8;

/// Per-channel PWM values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelBank {
    values: Vec<u16, MAX_PWM_CHANNELS>,
    bit_depth: u8,
    max_value: u16,
}

impl ChannelBank {
    /// Create a bank of `channel_count` channels, all at zero
    pub fn new(channel_count: usize, bit_depth: u8) -> Result<Self, InvalidArgument> {
        if channel_count == 0 || channel_count > MAX_PWM_CHANNELS {
            return Err(InvalidArgument::ChannelCount {
                count: channel_count,
            });
        }
        if bit_depth == 0 || bit_depth > MAX_BIT_DEPTH {
            return Err(InvalidArgument::BitDepth { bits: bit_depth });
        }

        let mut values = Vec::new();
        values
            .resize(channel_count, 0)
            .map_err(|_| InvalidArgument::ChannelCount {
                count: channel_count,
            })?;

        Ok(Self {
            values,
            bit_depth,
            max_value: ((1u32 << bit_depth) - 1) as u16,
        })
    }

    pub fn channel_count(&self) -> usize {
        self.values.len()
    }

    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    /// Largest value a channel can hold
    pub fn max_value(&self) -> u16 {
        self.max_value
    }

    /// Stage `value` for `channel`, clamped to `[0, max_value]`
    pub fn set_value(&mut self, channel: usize, value: i32) -> Result<(), InvalidArgument> {
        let count = self.values.len();
        let slot = self
            .values
            .get_mut(channel)
            .ok_or(InvalidArgument::ChannelOutOfRange { channel, count })?;
        *slot = value.clamp(0, self.max_value as i32) as u16;
        Ok(())
    }

    pub fn value(&self, channel: usize) -> Option<u16> {
        self.values.get(channel).copied()
    }

    /// Snapshot of every channel, channel 0 first
    pub fn values(&self) -> &[u16] {
        &self.values
    }

    /// Stage `value` on every channel
    pub fn set_all(&mut self, value: i32) {
        let value = value.clamp(0, self.max_value as i32) as u16;
        self.values.fill(value);
    }

    /// Words in the order they go on the wire (last channel first)
    pub fn wire_words(&self) -> impl Iterator<Item = u16> + '_ {
        self.values.iter().rev().copied()
    }

    /// Number of zero bits prepended to reach a byte boundary
    pub fn padding_bits(&self) -> usize {
        let total = self.values.len() * self.bit_depth as usize;
        (8 - total % 8) % 8
    }

    /// Pack the wire words into bytes
    pub fn encode(&self) -> Vec<u8, MAX_WIRE_LEN> {
        let depth = self.bit_depth as u32;
        let mut out = Vec::new();
        // Pending bits live in the low end of `acc`; never more than 7 + 16
        let mut acc: u32 = 0;
        let mut pending = self.padding_bits() as u32;

        for word in self.wire_words() {
            acc = (acc << depth) | word as u32;
            pending += depth;
            while pending >= 8 {
                pending -= 8;
                // Sized for the largest bank, cannot overflow
                let _ = out.push((acc >> pending) as u8);
            }
            acc &= (1 << pending) - 1;
        }

        out
    }
}
