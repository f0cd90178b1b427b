//! Bandmeter Hardware Abstraction Layer
//!
//! This crate defines the two hardware sinks the rig's output drivers write
//! to. Board support code (GPIO character devices, spidev, bit-banged SPI)
//! implements them; the drivers in `bandmeter-drivers` only see the traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  bandmeter-app (Monitor loop)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bandmeter-drivers (TLC5947, SSD1306)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bandmeter-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output (latch, data/command, reset lines)
//! - [`spi::SpiBus`] - Write-only serial byte stream

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use spi::{Mode, SpiBus};
