//! Collaborator traits
//!
//! These traits define the boundary between the estimation/rendering logic
//! and the things it does not own: the network transport, the system clock
//! and the PWM hardware.

pub mod counter;
pub mod pwm;

pub use counter::{sleep, Clock, CounterSource};
pub use pwm::{PwmError, PwmOutput};
