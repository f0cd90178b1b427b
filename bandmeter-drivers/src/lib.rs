//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the output traits
//! defined in bandmeter-core and bandmeter-display, on top of the bus and
//! pin traits from bandmeter-hal:
//!
//! - PWM: TLC5947 shift-register bank driving the analog meters
//! - Display: SSD1306 OLED over 4-wire SPI

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod pwm;

pub use display::Ssd1306;
pub use pwm::{ChannelBank, Tlc5947};
