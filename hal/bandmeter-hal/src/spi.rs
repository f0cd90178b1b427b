//! SPI bus abstractions
//!
//! The rig only ever shifts data out: the TLC5947 has no readable
//! registers worth polling and the SSD1306 is write-only in 4-wire mode.

/// Write-only SPI master
///
/// Implementations block until the whole transfer has been clocked out.
/// A transfer either completes or fails as a unit.
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Write data without reading
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: SpiBus + ?Sized> SpiBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, data)
    }
}

/// SPI mode (clock polarity and phase)
///
/// Drivers publish the mode their chip needs so board code can configure
/// the bus before handing it over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}
