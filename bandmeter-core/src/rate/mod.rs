//! Rolling bandwidth rate estimation
//!
//! Converts a monotonically increasing octet counter, sampled at irregular
//! intervals, into a smoothed bits-per-second figure.

mod estimator;
mod reading;

pub use estimator::{gap_weights, weighted_rate, RateError, RateEstimator, Sample, GOLDEN_RATIO};
pub use reading::{RateReading, RateUnit};

/// Upper bound on the smoothing window (samples held per counter)
pub const MAX_WINDOW_SIZE: usize = 32;
