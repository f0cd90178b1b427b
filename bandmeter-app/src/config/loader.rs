//! TOML configuration loader
//!
//! Every table and key is optional; anything missing keeps the value from
//! [`MeterConfig::default`]. Gauge tables are the exception: when present
//! they must give both `channel` and `max_kbps`.
//!
//! ```toml
//! history_length = 16
//! self_test = true
//!
//! [sampling]
//! window_size = 3
//! sample_period_ms = 100
//!
//! [download]
//! channel = 18
//! max_kbps = 37000
//!
//! [upload]
//! channel = 12
//! max_kbps = 8000
//!
//! [pins]
//! pwm_latch = "XIO1"
//! display_dc = "CSI1"
//! ```

use core::fmt;

use bandmeter_core::config::MeterConfig;
use bandmeter_core::InvalidArgument;

/// Configuration loading errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML syntax error, unknown pin name or wrong value type
    Parse {
        /// Byte offset of the offending input, when known
        offset: Option<usize>,
    },
    /// Document parsed but the values are inconsistent
    Invalid(InvalidArgument),
}

impl From<InvalidArgument> for ConfigError {
    fn from(e: InvalidArgument) -> Self {
        ConfigError::Invalid(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse {
            offset: e.span().map(|span| span.start),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse {
                offset: Some(offset),
            } => write!(f, "configuration parse error at byte {}", offset),
            Self::Parse { offset: None } => write!(f, "configuration parse error"),
            Self::Invalid(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

/// Parse and validate a TOML configuration
pub fn load_config(input: &str) -> Result<MeterConfig, ConfigError> {
    let config: MeterConfig = toml::from_str(input)?;
    config.validate()?;

    #[cfg(feature = "defmt")]
    {
        defmt::info!("configuration loaded");
        defmt::debug!("  window {}", config.sampling.window_size);
        defmt::debug!(
            "  download ch {} @ {} kbps",
            config.download.channel,
            config.download.max_kbps
        );
        defmt::debug!(
            "  upload ch {} @ {} kbps",
            config.upload.channel,
            config.upload.max_kbps
        );
        defmt::debug!(
            "  pwm {} x {} bit",
            config.pwm.channel_count,
            config.pwm.bit_depth
        );
    }

    Ok(config)
}
