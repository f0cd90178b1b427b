//! Configuration types
//!
//! Board-agnostic configuration structures. The application crate fills
//! them from TOML; everything here is plain data plus validation.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
