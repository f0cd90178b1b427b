//! Paged 1-bit framebuffer
//!
//! Byte `x + (y / 8) * width` holds column `x` of page `y / 8`; bit
//! `y & 7` of that byte is the pixel at row `y`. This is the GDDRAM layout
//! of the SSD1306 in horizontal addressing mode, so the buffer can be
//! streamed to the controller as-is.
//!
//! Coordinates are signed and clamped: anything left of or above the panel
//! lands on the first column or row, anything past the far edge lands on
//! the last one.

use bandmeter_core::config::{MAX_DISPLAY_HEIGHT, MAX_DISPLAY_WIDTH};
use bandmeter_core::InvalidArgument;
use heapless::Vec;

/// Bytes needed for the largest supported panel
pub const MAX_BUFFER_LEN: usize = MAX_DISPLAY_WIDTH * MAX_DISPLAY_HEIGHT / 8;

/// Monochrome framebuffer in controller page order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    buffer: Vec<u8, MAX_BUFFER_LEN>,
}

impl Framebuffer {
    /// Create a blank framebuffer
    ///
    /// `height` must be a multiple of 8 and the panel no larger than 128x64.
    pub fn new(width: usize, height: usize) -> Result<Self, InvalidArgument> {
        if width == 0
            || width > MAX_DISPLAY_WIDTH
            || height == 0
            || height > MAX_DISPLAY_HEIGHT
            || height % 8 != 0
        {
            return Err(InvalidArgument::DisplaySize { width, height });
        }

        let mut buffer = Vec::new();
        buffer
            .resize(width * height / 8, 0)
            .map_err(|_| InvalidArgument::DisplaySize { width, height })?;

        Ok(Self {
            width,
            height,
            buffer,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of 8-row pages
    pub fn pages(&self) -> usize {
        self.height / 8
    }

    /// Packed buffer in wire order
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Byte index and bit number holding pixel `(x, y)`
    ///
    /// Coordinates must already be in range.
    pub fn address(&self, x: usize, y: usize) -> (usize, u8) {
        (x + (y / 8) * self.width, (y & 7) as u8)
    }

    fn clamp(&self, x: i32, y: i32) -> (usize, usize) {
        let x = x.clamp(0, self.width as i32 - 1) as usize;
        let y = y.clamp(0, self.height as i32 - 1) as usize;
        (x, y)
    }

    /// Set or clear one pixel
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        let (x, y) = self.clamp(x, y);
        let (index, bit) = self.address(x, y);
        if on {
            self.buffer[index] |= 1 << bit;
        } else {
            self.buffer[index] &= !(1 << bit);
        }
    }

    /// Read one pixel
    pub fn get_pixel(&self, x: i32, y: i32) -> bool {
        let (x, y) = self.clamp(x, y);
        let (index, bit) = self.address(x, y);
        self.buffer[index] & (1 << bit) != 0
    }

    /// Set every pixel of a `w` x `h` region to `on`
    ///
    /// Each pixel goes through [`set_pixel`](Self::set_pixel), so parts of
    /// the region beyond the panel collapse onto the edge.
    pub fn set_rectangle(&mut self, x: i32, y: i32, w: i32, h: i32, on: bool) {
        let x_end = x.saturating_add(w);
        let y_end = y.saturating_add(h);
        for tx in x..x_end {
            for ty in y..y_end {
                self.set_pixel(tx, ty, on);
            }
        }
    }

    pub fn fill_rectangle(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.set_rectangle(x, y, w, h, true);
    }

    pub fn clear_rectangle(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.set_rectangle(x, y, w, h, false);
    }

    /// Tile a region with alternating `cell` x `cell` squares
    ///
    /// The region is first intersected with the panel. The top-left cell
    /// is lit and each row starts with the opposite phase of the one above.
    /// Cells on the right and bottom edges are cut at the region boundary.
    /// A `cell` below 1 is treated as 1.
    pub fn checkerboard_rectangle(&mut self, x: i32, y: i32, w: i32, h: i32, cell: i32) {
        let cell = cell.max(1);
        let max_x = x.saturating_add(w).min(self.width as i32);
        let max_y = y.saturating_add(h).min(self.height as i32);

        let mut row_on = true;
        let mut cy = y.max(0);
        while cy < max_y {
            let cell_h = cell.min(max_y - cy);
            let mut on = row_on;
            let mut cx = x.max(0);
            while cx < max_x {
                let cell_w = cell.min(max_x - cx);
                self.set_rectangle(cx, cy, cell_w, cell_h, on);
                on = !on;
                cx += cell;
            }
            row_on = !row_on;
            cy += cell;
        }
    }

    /// Clear every pixel
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Light every pixel
    pub fn fill(&mut self) {
        self.buffer.fill(0xFF);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sizes() {
        let fb = Framebuffer::new(128, 64).unwrap();
        assert_eq!(fb.as_bytes().len(), 1024);
        assert_eq!(fb.pages(), 8);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));

        let fb = Framebuffer::new(128, 32).unwrap();
        assert_eq!(fb.as_bytes().len(), 512);
    }

    #[test]
    fn test_invalid_sizes() {
        assert_eq!(
            Framebuffer::new(128, 60),
            Err(InvalidArgument::DisplaySize {
                width: 128,
                height: 60
            })
        );
        assert!(Framebuffer::new(0, 64).is_err());
        assert!(Framebuffer::new(129, 64).is_err());
        assert!(Framebuffer::new(128, 72).is_err());
    }

    #[test]
    fn test_addressing() {
        let mut fb = Framebuffer::new(128, 64).unwrap();
        assert_eq!(fb.address(5, 10), (133, 2));

        fb.set_pixel(5, 10, true);
        assert_eq!(fb.as_bytes()[133], 0b0000_0100);
        assert_eq!(fb.as_bytes().iter().filter(|&&b| b != 0).count(), 1);
    }

    #[test]
    fn test_pixel_round_trip() {
        let mut fb = Framebuffer::new(128, 64).unwrap();
        fb.set_pixel(17, 42, true);
        assert!(fb.get_pixel(17, 42));
        fb.set_pixel(17, 42, false);
        assert!(!fb.get_pixel(17, 42));
    }

    #[test]
    fn test_neighbours_untouched() {
        let mut fb = Framebuffer::new(128, 64).unwrap();
        // Rows 8..15 share byte x + 128
        for y in 8..16 {
            fb.set_pixel(3, y, true);
        }
        fb.set_pixel(3, 12, false);
        assert_eq!(fb.as_bytes()[3 + 128], 0b1110_1111);

        fb.set_pixel(3, 12, true);
        assert_eq!(fb.as_bytes()[3 + 128], 0xFF);
        assert_eq!(fb.as_bytes()[2 + 128], 0);
        assert_eq!(fb.as_bytes()[4 + 128], 0);
    }

    #[test]
    fn test_coordinates_clamped() {
        let mut fb = Framebuffer::new(128, 64).unwrap();
        fb.set_pixel(-4, -9, true);
        assert!(fb.get_pixel(0, 0));

        fb.set_pixel(500, 500, true);
        assert!(fb.get_pixel(127, 63));
        assert!(fb.get_pixel(1000, 63));
    }

    #[test]
    fn test_fill_and_clear_rectangle() {
        let mut fb = Framebuffer::new(128, 64).unwrap();
        fb.fill_rectangle(10, 4, 3, 6);
        for x in 10..13 {
            for y in 4..10 {
                assert!(fb.get_pixel(x, y));
            }
        }
        assert!(!fb.get_pixel(9, 4));
        assert!(!fb.get_pixel(13, 4));
        assert!(!fb.get_pixel(10, 3));
        assert!(!fb.get_pixel(10, 10));

        fb.clear_rectangle(11, 5, 1, 1);
        assert!(!fb.get_pixel(11, 5));
        assert!(fb.get_pixel(12, 5));
    }

    #[test]
    fn test_empty_rectangle() {
        let mut fb = Framebuffer::new(128, 64).unwrap();
        fb.fill_rectangle(10, 10, 0, 5);
        fb.fill_rectangle(10, 10, 5, -1);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_checkerboard() {
        let mut fb = Framebuffer::new(128, 64).unwrap();
        fb.checkerboard_rectangle(0, 0, 8, 8, 4);

        for y in 0..8 {
            for x in 0..8 {
                let expected = (x < 4) == (y < 4);
                assert_eq!(fb.get_pixel(x, y), expected, "pixel ({}, {})", x, y);
            }
        }
        assert!(!fb.get_pixel(8, 0));
        assert!(!fb.get_pixel(0, 8));
    }

    #[test]
    fn test_checkerboard_rows_alternate_phase() {
        let mut fb = Framebuffer::new(16, 8).unwrap();
        fb.checkerboard_rectangle(0, 0, 16, 8, 1);
        assert!(fb.get_pixel(0, 0));
        assert!(!fb.get_pixel(1, 0));
        assert!(!fb.get_pixel(0, 1));
        assert!(fb.get_pixel(1, 1));
    }

    #[test]
    fn test_checkerboard_clipped_and_coerced() {
        let mut fb = Framebuffer::new(16, 8).unwrap();
        fb.checkerboard_rectangle(12, 4, 20, 20, 0);
        assert!(fb.get_pixel(12, 4));
        assert!(!fb.get_pixel(13, 4));
        // Nothing drawn outside the region
        assert!(!fb.get_pixel(11, 4));
        assert!(!fb.get_pixel(12, 3));

        let mut fb = Framebuffer::new(16, 8).unwrap();
        fb.checkerboard_rectangle(0, 0, 5, 3, 4);
        assert!(fb.get_pixel(3, 2));
        assert!(!fb.get_pixel(4, 0));
        assert!(!fb.get_pixel(5, 0));
        assert!(!fb.get_pixel(0, 3));
    }

    #[test]
    fn test_clear_and_fill() {
        let mut fb = Framebuffer::new(32, 16).unwrap();
        fb.fill();
        assert!(fb.get_pixel(31, 15));
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));
        fb.clear();
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }
}
