//! SSD1306 OLED Display Driver
//!
//! Driver for SSD1306-based OLED panels (up to 128x64) on 4-wire SPI: a
//! write-only serial bus plus a data/command select line and a reset line.
//! With D/C low the controller interprets bytes as commands, with D/C high
//! as GDDRAM data.
//!
//! The panel runs in horizontal addressing mode, so a flush is one address
//! window followed by the whole [`Framebuffer`] in a single transfer.

use bandmeter_core::traits::sleep;
use bandmeter_display::{DisplayError, Framebuffer, MonochromeDisplay};
use bandmeter_hal::{Mode, OutputPin, SpiBus};
use core::time::Duration;
use embedded_hal::delay::DelayNs;

/// SSD1306 commands
pub mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_SEG_REMAP: u8 = 0xA0;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const DEACTIVATE_SCROLL: u8 = 0x2E;
}

/// Highest contrast the panel is driven at
pub const MAX_CONTRAST: u8 = 0xCF;

/// Clock idles low, data sampled on the rising edge
pub const SPI_MODE: Mode = Mode::Mode0;

/// SSD1306 OLED driver
pub struct Ssd1306<SPI, DC, RST> {
    spi: SPI,
    dc: DC,
    rst: RST,
    buffer: Framebuffer,
    inverted: bool,
    contrast: u8,
    on: bool,
}

impl<SPI, DC, RST> Ssd1306<SPI, DC, RST>
where
    SPI: SpiBus,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a driver for a `width` x `height` panel
    ///
    /// Nothing is sent until [`init`](Self::init).
    pub fn new(
        spi: SPI,
        dc: DC,
        rst: RST,
        width: usize,
        height: usize,
    ) -> Result<Self, DisplayError> {
        Ok(Self {
            spi,
            dc,
            rst,
            buffer: Framebuffer::new(width, height)?,
            inverted: false,
            contrast: MAX_CONTRAST,
            on: false,
        })
    }

    /// Reset the controller, run the power-up sequence and push a blank frame
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), DisplayError> {
        self.dc.set_low();

        self.rst.set_high();
        sleep(delay, Duration::from_millis(1));
        self.rst.set_low();
        sleep(delay, Duration::from_millis(10));
        self.rst.set_high();

        let mux = (self.buffer.height() - 1) as u8;
        let init_cmds: [u8; 26] = [
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            mux,
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14, // Enable charge pump
            cmd::SET_MEMORY_MODE,
            0x00,                     // Horizontal addressing
            cmd::SET_SEG_REMAP | 0x1, // Flip horizontally
            cmd::SET_COM_SCAN_DEC,    // Flip vertically
            cmd::SET_COM_PINS,
            0x12, // Alternative COM config
            cmd::SET_CONTRAST,
            MAX_CONTRAST,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::DISPLAY_ALL_ON_RESUME,
            cmd::SET_NORMAL,
            cmd::DEACTIVATE_SCROLL,
            cmd::DISPLAY_ON,
        ];
        self.command(&init_cmds)?;

        self.inverted = false;
        self.contrast = MAX_CONTRAST;
        self.on = true;

        self.flush()
    }

    /// Send command bytes with D/C low
    fn command(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_low();
        self.spi
            .write(bytes)
            .map_err(|_| DisplayError::Communication)
    }

    /// Send the framebuffer with D/C high
    fn data(&mut self) -> Result<(), DisplayError> {
        self.dc.set_high();
        self.spi
            .write(self.buffer.as_bytes())
            .map_err(|_| DisplayError::Communication)
    }

    pub fn contrast(&self) -> u8 {
        self.contrast
    }

    /// Turn display on/off
    ///
    /// GDDRAM is retained while the panel is off.
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        let c = if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF };
        self.command(&[c])?;
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Release the bus and control pins
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

impl<SPI, DC, RST> MonochromeDisplay for Ssd1306<SPI, DC, RST>
where
    SPI: SpiBus,
    DC: OutputPin,
    RST: OutputPin,
{
    fn framebuffer(&self) -> &Framebuffer {
        &self.buffer
    }

    fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.buffer
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        let last_column = (self.buffer.width() - 1) as u8;
        let last_page = (self.buffer.pages() - 1) as u8;
        self.command(&[cmd::SET_COLUMN_ADDR, 0x00, last_column])?;
        self.command(&[cmd::SET_PAGE_ADDR, 0x00, last_page])?;
        self.data()
    }

    fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError> {
        let c = if inverted {
            cmd::SET_INVERSE
        } else {
            cmd::SET_NORMAL
        };
        self.command(&[c])?;
        self.inverted = inverted;
        Ok(())
    }

    fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Set display contrast, capped at [`MAX_CONTRAST`]
    fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        let contrast = contrast.min(MAX_CONTRAST);
        self.command(&[cmd::SET_CONTRAST, contrast])?;
        self.contrast = contrast;
        Ok(())
    }
}
