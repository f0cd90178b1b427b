//! Display backend trait
//!
//! Defines the interface between the rendering code and a display driver.

use crate::framebuffer::Framebuffer;
use bandmeter_core::InvalidArgument;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Bad dimensions or layout parameters
    InvalidArgument(InvalidArgument),
}

impl From<InvalidArgument> for DisplayError {
    fn from(e: InvalidArgument) -> Self {
        DisplayError::InvalidArgument(e)
    }
}

/// Buffered monochrome display
///
/// Drawing happens in the driver's [`Framebuffer`]; nothing reaches the
/// panel until [`flush`](MonochromeDisplay::flush).
pub trait MonochromeDisplay {
    /// Framebuffer for reading back pixels
    fn framebuffer(&self) -> &Framebuffer;

    /// Framebuffer for drawing
    fn framebuffer_mut(&mut self) -> &mut Framebuffer;

    /// Send the framebuffer to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Switch between inverted and normal display mode
    ///
    /// Takes effect immediately, without a flush.
    fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError>;

    /// Whether the panel is in inverted mode
    fn is_inverted(&self) -> bool;

    /// Set panel brightness
    ///
    /// Drivers may cap the value at what the panel tolerates.
    fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError>;

    /// Blank the buffer and the panel
    fn clear_display(&mut self) -> Result<(), DisplayError> {
        self.framebuffer_mut().clear();
        self.flush()
    }
}
