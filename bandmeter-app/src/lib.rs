//! Bandmeter application
//!
//! Ties the pieces together: two rate estimators polling interface
//! counters, two analog meters on a TLC5947 bank and a history chart on an
//! SSD1306. Board code supplies the counter sources, clock, delay and the
//! initialised output drivers, then hands them to [`Monitor`].
//!
//! ```ignore
//! static STOP: CancelToken = CancelToken::new();
//!
//! let config = load_config(CONFIG_TOML)?;
//! let pwm = pwm_from_config(&config, pwm_spi, latch)?;
//! let display = display_from_config(&config, oled_spi, dc, reset, &mut delay)?;
//! let mut monitor = Monitor::new(
//!     &config, download, upload, &clock, pwm, display, &mut delay,
//! )?;
//! monitor.run(&STOP, &mut delay)?;
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod board;
pub mod cancel;
pub mod config;
pub mod error;
pub mod meters;
pub mod monitor;

pub use board::{display_from_config, pwm_from_config};
pub use cancel::CancelToken;
pub use config::{load_config, ConfigError};
pub use error::MonitorError;
pub use meters::{light_all, waggle, MeterGauge};
pub use monitor::{Monitor, TickFaults, TickReport};
