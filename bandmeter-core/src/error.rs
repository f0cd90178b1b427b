//! Error kinds shared by every crate in the workspace

use core::fmt;

use crate::config::PinId;

/// A construction parameter or index was rejected
///
/// Always a programming or configuration mistake; never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidArgument {
    /// Ring buffer capacity of zero
    ZeroCapacity,
    /// Ring buffer capacity above its storage bound
    CapacityTooLarge { requested: usize, max: usize },
    /// Smoothing window needs at least two samples (one gap)
    WindowTooSmall { window: usize },
    /// Channel index outside `[0, count)`
    ChannelOutOfRange { channel: usize, count: usize },
    /// Channel count of zero or above the driver's storage bound
    ChannelCount { count: usize },
    /// Bit depth outside 1..=16
    BitDepth { bits: u8 },
    /// Two meters configured on the same PWM channel
    ChannelConflict { channel: usize },
    /// Display size unsupported by the controller (height must be a multiple of 8)
    DisplaySize { width: usize, height: usize },
    /// History length of zero, above the bound, or too many columns for the display
    HistoryLength { length: usize },
    /// Sample period of zero
    SamplePeriod,
    /// Maximum expected rate is not a positive number
    MaxRate,
    /// Pin name not recognised
    UnknownPin,
    /// The same pin assigned to two functions
    PinConflict { pin: PinId },
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "capacity must be at least 1"),
            Self::CapacityTooLarge { requested, max } => {
                write!(f, "capacity {} exceeds maximum {}", requested, max)
            }
            Self::WindowTooSmall { window } => {
                write!(f, "window size {} must be greater than 1", window)
            }
            Self::ChannelOutOfRange { channel, count } => {
                write!(f, "channel {} out of range for {} channels", channel, count)
            }
            Self::ChannelCount { count } => write!(f, "unsupported channel count {}", count),
            Self::BitDepth { bits } => write!(f, "unsupported bit depth {}", bits),
            Self::ChannelConflict { channel } => {
                write!(f, "channel {} assigned to more than one meter", channel)
            }
            Self::DisplaySize { width, height } => {
                write!(f, "unsupported display size {}x{}", width, height)
            }
            Self::HistoryLength { length } => write!(f, "unsupported history length {}", length),
            Self::SamplePeriod => write!(f, "sample period must be non-zero"),
            Self::MaxRate => write!(f, "maximum rate must be a positive number"),
            Self::UnknownPin => write!(f, "unknown pin name"),
            Self::PinConflict { pin } => write!(f, "pin {} assigned twice", pin),
        }
    }
}

/// Counter fetch failed
///
/// Raised by [`CounterSource`](crate::traits::CounterSource) implementations.
/// Recoverable: the caller substitutes a zero reading for the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// No response within the transport's deadline
    Timeout,
    /// Agent could not be reached
    Unreachable,
    /// Response did not carry an integer counter
    MalformedResponse,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "counter fetch timed out"),
            Self::Unreachable => write!(f, "counter agent unreachable"),
            Self::MalformedResponse => write!(f, "malformed counter response"),
        }
    }
}
