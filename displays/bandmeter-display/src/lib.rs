//! Monochrome display support for the bandwidth meter
//!
//! This crate provides:
//! - `Framebuffer`, a 1-bit-per-pixel buffer in the paged layout used by
//!   SSD1306-class OLED controllers
//! - `HistoryTrack`, the mirrored download/upload bar chart
//! - `MonochromeDisplay`, the trait display drivers implement
//!
//! # Page layout
//!
//! ```text
//!            x=0   x=1   x=2        x=w-1
//! page 0   [b0  ][b1  ][b2  ] ... [    ]   rows 0..7, bit n = row n
//! page 1   [b w ][    ][    ] ... [    ]   rows 8..15
//!   ...
//! ```

#![no_std]

pub mod backend;
pub mod framebuffer;
pub mod history;

// Re-export key types
pub use backend::{DisplayError, MonochromeDisplay};
pub use framebuffer::{Framebuffer, MAX_BUFFER_LEN};
pub use history::{HistoryTrack, RatePair};
