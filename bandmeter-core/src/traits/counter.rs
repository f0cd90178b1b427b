//! Counter source and clock traits

use core::time::Duration;

use embedded_hal::delay::DelayNs;

use crate::error::TransportError;

/// Source of a monotonically increasing octet counter
///
/// Each call is one blocking round trip to the agent. Implementations
/// report timeouts, unreachable agents and malformed responses as
/// [`TransportError`].
pub trait CounterSource {
    /// Fetch the current counter value
    fn get_counter(&mut self) -> Result<u64, TransportError>;
}

impl<T: CounterSource + ?Sized> CounterSource for &mut T {
    fn get_counter(&mut self) -> Result<u64, TransportError> {
        T::get_counter(self)
    }
}

/// Monotonic clock
///
/// Returns time elapsed since an arbitrary fixed epoch. Must never go
/// backwards.
pub trait Clock {
    /// Current monotonic time
    fn now(&self) -> Duration;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Duration {
        T::now(self)
    }
}

/// Block for `duration` using `delay`
///
/// Splits long waits into `u32` microsecond chunks. A zero duration
/// returns without touching the delay provider.
pub fn sleep<D: DelayNs + ?Sized>(delay: &mut D, duration: Duration) {
    let mut remaining = duration.as_micros();
    while remaining > 0 {
        let chunk = remaining.min(u32::MAX as u128) as u32;
        delay.delay_us(chunk);
        remaining -= chunk as u128;
    }
}
