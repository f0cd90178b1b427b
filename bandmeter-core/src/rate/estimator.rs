//! Golden-ratio weighted rolling rate estimator
//!
//! A window of `W` timestamped counter samples has `W - 1` gaps. Each gap
//! yields its own rate; the gaps are averaged with weights that fall off by
//! a factor of φ per step into the past:
//!
//! ```text
//! samples:  s0 ─── s1 ─── s2 ─── s3        (W = 4, s3 newest)
//! gaps:        g2     g1     g0
//! weights:    1/φ²   1/φ     1
//! ```
//!
//! A gap whose counter went backwards (wrap or agent restart) contributes a
//! zero rate; the window absorbs it over the following ticks.

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use super::{RateReading, MAX_WINDOW_SIZE};
use crate::error::{InvalidArgument, TransportError};
use crate::ring::RingBuffer;
use crate::traits::{sleep, Clock, CounterSource};

/// φ, the decay factor between successive gap weights
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Rate estimation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RateError {
    /// Bad window size
    InvalidArgument(InvalidArgument),
    /// Counter fetch failed; estimator state is unchanged
    SampleFetch(TransportError),
}

impl From<InvalidArgument> for RateError {
    fn from(e: InvalidArgument) -> Self {
        RateError::InvalidArgument(e)
    }
}

impl From<TransportError> for RateError {
    fn from(e: TransportError) -> Self {
        RateError::SampleFetch(e)
    }
}

/// One counter observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Monotonic time of the observation
    pub timestamp: Duration,
    /// Octet counter value
    pub counter_value: u64,
}

impl Sample {
    /// Timestamp with `clock`, then fetch from `source`
    fn take<S: CounterSource, C: Clock>(source: &mut S, clock: &C) -> Result<Self, TransportError> {
        let timestamp = clock.now();
        let counter_value = source.get_counter()?;
        Ok(Self {
            timestamp,
            counter_value,
        })
    }

    /// Rate over the gap from `older` to `self`, in bits per second
    ///
    /// Zero when time did not advance or the counter went backwards.
    fn bps_since(&self, older: &Sample) -> f64 {
        let Some(elapsed) = self.timestamp.checked_sub(older.timestamp) else {
            return 0.0;
        };
        let seconds = elapsed.as_secs_f64();
        if seconds <= 0.0 || self.counter_value < older.counter_value {
            return 0.0;
        }

        let bits = (self.counter_value - older.counter_value) as f64 * 8.0;
        bits / seconds
    }
}

/// Weights for the `window - 1` gaps of a window, newest gap first
///
/// `weights[0] = 1` and each following weight is the previous one divided by φ.
pub fn gap_weights(window: usize) -> Result<Vec<f64, MAX_WINDOW_SIZE>, InvalidArgument> {
    if window < 2 {
        return Err(InvalidArgument::WindowTooSmall { window });
    }
    if window > MAX_WINDOW_SIZE {
        return Err(InvalidArgument::CapacityTooLarge {
            requested: window,
            max: MAX_WINDOW_SIZE,
        });
    }

    let mut weights = Vec::new();
    let mut weight = 1.0;
    for _ in 0..window - 1 {
        // window - 1 < MAX_WINDOW_SIZE
        let _ = weights.push(weight);
        weight /= GOLDEN_RATIO;
    }
    Ok(weights)
}

/// Weighted average of the per-gap rates of `samples` (oldest first)
///
/// `weights[0]` applies to the newest gap. Extra weights or samples beyond
/// the shorter of the two sequences are ignored.
pub fn weighted_rate(samples: &[Sample], weights: &[f64]) -> f64 {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for (weight, pair) in weights.iter().zip(samples.windows(2).rev()) {
        weighted_sum += weight * pair[1].bps_since(&pair[0]);
        total_weight += weight;
    }

    if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    }
}

/// Smoothed bandwidth estimator for one counter
pub struct RateEstimator<S, C> {
    source: S,
    clock: C,
    samples: RingBuffer<Sample, MAX_WINDOW_SIZE>,
    weights: Vec<f64, MAX_WINDOW_SIZE>,
}

impl<S: CounterSource, C: Clock> RateEstimator<S, C> {
    /// Create an estimator, blocking while the window is filled
    ///
    /// Takes `window_size` samples, sleeping `bootstrap_delay` between
    /// consecutive fetches. Any failed fetch aborts construction.
    pub fn new<D: DelayNs>(
        window_size: usize,
        bootstrap_delay: Duration,
        mut source: S,
        clock: C,
        delay: &mut D,
    ) -> Result<Self, RateError> {
        let weights = gap_weights(window_size)?;

        let first = Sample::take(&mut source, &clock)?;
        let mut samples = RingBuffer::new(window_size, first)?;
        for _ in 1..window_size {
            sleep(delay, bootstrap_delay);
            samples.push(Sample::take(&mut source, &clock)?);
        }

        Ok(Self {
            source,
            clock,
            samples,
            weights,
        })
    }

    /// Take a fresh sample and return the smoothed rate
    ///
    /// On fetch failure nothing is pushed, so the next successful call
    /// resumes from the same window.
    pub fn get_current_speed(&mut self) -> Result<RateReading, RateError> {
        let sample = Sample::take(&mut self.source, &self.clock)?;
        self.samples.push(sample);

        let window: Vec<Sample, MAX_WINDOW_SIZE> = self.samples.iter().copied().collect();
        Ok(RateReading::from_bps(weighted_rate(&window, &self.weights)))
    }

    /// Number of samples in the window
    pub fn window_size(&self) -> usize {
        self.samples.capacity()
    }

    /// Gap weights, newest gap first
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Current window, oldest first
    pub fn samples(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.samples.iter()
    }

    /// Borrow the counter source
    pub fn source(&self) -> &S {
        &self.source
    }
}
