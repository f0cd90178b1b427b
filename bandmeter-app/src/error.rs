//! Errors that stop the monitor
//!
//! Only construction and start-up failures end up here. Faults during a
//! tick are absorbed by the loop and reported in its [`TickReport`].
//!
//! [`TickReport`]: crate::monitor::TickReport

use bandmeter_core::traits::PwmError;
use bandmeter_core::{InvalidArgument, RateError};
use bandmeter_display::DisplayError;

/// Monitor set-up or shutdown failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MonitorError {
    /// Configuration does not fit the attached hardware
    InvalidArgument(InvalidArgument),
    /// Filling an estimator window failed
    Rate(RateError),
    /// PWM bus failure
    Pwm(PwmError),
    /// Display bus failure
    Display(DisplayError),
}

impl From<InvalidArgument> for MonitorError {
    fn from(e: InvalidArgument) -> Self {
        MonitorError::InvalidArgument(e)
    }
}

impl From<RateError> for MonitorError {
    fn from(e: RateError) -> Self {
        MonitorError::Rate(e)
    }
}

impl From<PwmError> for MonitorError {
    fn from(e: PwmError) -> Self {
        MonitorError::Pwm(e)
    }
}

impl From<DisplayError> for MonitorError {
    fn from(e: DisplayError) -> Self {
        MonitorError::Display(e)
    }
}
