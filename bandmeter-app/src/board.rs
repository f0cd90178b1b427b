//! Output hardware bring-up
//!
//! Builds the concrete drivers from the configuration. Board code owns the
//! buses and pins (resolved from `config.pins`) and hands them in here.

use bandmeter_core::config::MeterConfig;
use bandmeter_core::InvalidArgument;
use bandmeter_display::{DisplayError, MonochromeDisplay};
use bandmeter_drivers::{Ssd1306, Tlc5947};
use bandmeter_hal::{OutputPin, SpiBus};
use embedded_hal::delay::DelayNs;

/// TLC5947 chain sized by `config.pwm`
///
/// The latch is driven low; call `reset_all` before relying on the outputs.
pub fn pwm_from_config<SPI, LATCH>(
    config: &MeterConfig,
    spi: SPI,
    latch: LATCH,
) -> Result<Tlc5947<SPI, LATCH>, InvalidArgument>
where
    SPI: SpiBus,
    LATCH: OutputPin,
{
    Tlc5947::new(spi, latch, config.pwm.channel_count, config.pwm.bit_depth)
}

/// SSD1306 sized by `config.display`, reset and initialised
///
/// Contrast and inversion are applied after the power-up sequence.
pub fn display_from_config<SPI, DC, RST, D>(
    config: &MeterConfig,
    spi: SPI,
    dc: DC,
    rst: RST,
    delay: &mut D,
) -> Result<Ssd1306<SPI, DC, RST>, DisplayError>
where
    SPI: SpiBus,
    DC: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    let mut display = Ssd1306::new(spi, dc, rst, config.display.width, config.display.height)?;
    display.init(delay)?;
    display.set_contrast(config.display.contrast)?;
    display.set_inverted(config.display.inverted)?;

    #[cfg(feature = "defmt")]
    defmt::info!(
        "display {}x{} ready",
        config.display.width,
        config.display.height
    );

    Ok(display)
}
