//! Board-agnostic core logic for the bandwidth meter rig
//!
//! This crate contains all logic that does not depend on a specific
//! transport, bus or display:
//!
//! - Bounded ring buffer shared by sampling and history
//! - Golden-ratio weighted rolling rate estimator
//! - Collaborator traits (counter source, clock, PWM output)
//! - Error kinds shared across the workspace
//! - Configuration type definitions and validation

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod rate;
pub mod ring;
pub mod traits;

pub use error::{InvalidArgument, TransportError};
pub use rate::{RateError, RateEstimator, RateReading, RateUnit, Sample};
pub use ring::RingBuffer;
