//! Configuration loading
//!
//! Parses a TOML document over the built-in defaults and validates the
//! result.

pub mod loader;

pub use loader::{load_config, ConfigError};
