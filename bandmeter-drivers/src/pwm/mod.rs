//! PWM output drivers

pub mod bank;
pub mod tlc5947;

pub use bank::{ChannelBank, MAX_WIRE_LEN};
pub use tlc5947::Tlc5947;
