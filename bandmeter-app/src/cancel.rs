//! Cooperative cancellation
//!
//! The monitor loop polls a [`CancelToken`] between the steps of every
//! tick. The token is `const`-constructible so it can live in a `static`
//! and be set from a signal handler or another thread.
//!
//! ```ignore
//! static STOP: CancelToken = CancelToken::new();
//!
//! // In the signal handler:
//! STOP.cancel();
//!
//! // In the main loop:
//! monitor.run(&STOP, &mut delay)?;
//! ```

use portable_atomic::{AtomicBool, Ordering};

/// One-shot stop request shared between the loop and whoever stops it
#[derive(Debug)]
pub struct CancelToken {
    cancelled: AtomicBool,
}

impl CancelToken {
    pub const fn new() -> Self {
        Self {
            cancelled: AtomicBool::new(false),
        }
    }

    /// Request cancellation
    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Clear a previous request so the token can be reused
    #[inline]
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Release);
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
