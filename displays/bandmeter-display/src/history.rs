//! Scrolling bandwidth history chart
//!
//! The panel is split into two bands around a two-row gutter in the
//! middle. Download bars grow upward from the gutter, upload bars grow
//! downward from it:
//!
//! ```text
//! row 0           |   ||  |||    download band (band_height rows)
//!                 |||||||||||
//! band_height     -----------    gutter
//!                 |||||||||||
//! height - 1      | |  |         upload band (band_height rows)
//! ```
//!
//! Each history slot owns one column of `width / length` pixels, oldest on
//! the left. The last pixel of each column is left blank as a separator.

use bandmeter_core::config::MAX_HISTORY_LENGTH;
use bandmeter_core::{InvalidArgument, RateReading, RingBuffer};
use micromath::F32Ext;

use crate::framebuffer::Framebuffer;

/// Upload and download rate recorded for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RatePair {
    pub upload_bps: f64,
    pub download_bps: f64,
}

impl RatePair {
    pub fn new(upload: RateReading, download: RateReading) -> Self {
        Self {
            upload_bps: upload.bits_per_second,
            download_bps: download.bits_per_second,
        }
    }
}

/// Fixed-length history of rate pairs
///
/// Starts out holding `length` zero pairs, so the chart always has a full
/// set of columns.
#[derive(Debug, Clone)]
pub struct HistoryTrack {
    slots: RingBuffer<RatePair, MAX_HISTORY_LENGTH>,
}

impl HistoryTrack {
    pub fn new(length: usize) -> Result<Self, InvalidArgument> {
        let slots = RingBuffer::new(length, RatePair::default())
            .map_err(|_| InvalidArgument::HistoryLength { length })?;
        Ok(Self { slots })
    }

    /// Record a new pair, dropping the oldest
    pub fn push(&mut self, pair: RatePair) {
        self.slots.push(pair);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &RatePair> + '_ {
        self.slots.iter()
    }

    /// Most recent pair
    pub fn latest(&self) -> Option<&RatePair> {
        self.slots.latest()
    }

    /// Draw the chart into `fb`, replacing its contents
    ///
    /// Bars are scaled against each band's own maximum rate. Fails when the
    /// panel is too narrow to give every slot a column of at least two
    /// pixels.
    pub fn render(
        &self,
        fb: &mut Framebuffer,
        max_download_bps: f64,
        max_upload_bps: f64,
    ) -> Result<(), InvalidArgument> {
        let length = self.slots.len();
        let column_width = fb.width() / length;
        if column_width < 2 {
            return Err(InvalidArgument::HistoryLength { length });
        }

        let band_height = band_height(fb.height());
        let upload_top = fb.height() - band_height;
        let bar_width = (column_width - 1) as i32;

        fb.clear();
        for (i, pair) in self.slots.iter().enumerate() {
            let x = (i * column_width) as i32;

            let down = bar_height(pair.download_bps, max_download_bps, band_height);
            fb.fill_rectangle(x, (band_height - down) as i32, bar_width, down as i32);

            let up = bar_height(pair.upload_bps, max_upload_bps, band_height);
            fb.fill_rectangle(x, upload_top as i32, bar_width, up as i32);
        }

        Ok(())
    }
}

/// Rows available to each band on a panel `height` rows tall
pub fn band_height(height: usize) -> usize {
    height / 2 - 1
}

/// Bar length in rows for `rate` on a band of `band_height` rows
///
/// Rounded up so any traffic shows at least one row. Rates at or above
/// `max_rate` fill the band; a non-positive maximum draws nothing.
pub fn bar_height(rate: f64, max_rate: f64, band_height: usize) -> usize {
    if !(max_rate > 0.0) || !(rate > 0.0) {
        return 0;
    }
    let scaled = (rate / max_rate).min(1.0) * band_height as f64;
    // Narrowing to f32 can land on the integer just below `scaled`
    let mut rows = F32Ext::ceil(scaled as f32);
    if (rows as f64) < scaled {
        rows += 1.0;
    }
    (rows as usize).min(band_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_DOWN: f64 = 37_000_000.0;
    const MAX_UP: f64 = 8_000_000.0;

    fn pair(upload_bps: f64, download_bps: f64) -> RatePair {
        RatePair {
            upload_bps,
            download_bps,
        }
    }

    fn lit_rows(fb: &Framebuffer, x: i32) -> usize {
        (0..fb.height() as i32)
            .filter(|&y| fb.get_pixel(x, y))
            .count()
    }

    #[test]
    fn test_bar_height() {
        assert_eq!(bar_height(0.0, 100.0, 31), 0);
        assert_eq!(bar_height(100.0, 100.0, 31), 31);
        assert_eq!(bar_height(500.0, 100.0, 31), 31);
        assert_eq!(bar_height(50.0, 100.0, 31), 16);
        assert_eq!(bar_height(0.001, 100.0, 31), 1);
        assert_eq!(bar_height(1.0, 1e60, 31), 1);
        assert_eq!(bar_height(100.000_000_01, 3100.0, 31), 2);
        assert_eq!(bar_height(-5.0, 100.0, 31), 0);
        assert_eq!(bar_height(50.0, 0.0, 31), 0);
    }

    #[test]
    fn test_band_height() {
        assert_eq!(band_height(64), 31);
        assert_eq!(band_height(32), 15);
        assert_eq!(band_height(8), 3);
    }

    #[test]
    fn test_new_fills_with_zero() {
        let track = HistoryTrack::new(16).unwrap();
        assert_eq!(track.len(), 16);
        assert!(track.iter().all(|p| *p == RatePair::default()));
    }

    #[test]
    fn test_new_rejects_bad_length() {
        assert_eq!(
            HistoryTrack::new(0).unwrap_err(),
            InvalidArgument::HistoryLength { length: 0 }
        );
        assert!(HistoryTrack::new(MAX_HISTORY_LENGTH + 1).is_err());
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut track = HistoryTrack::new(3).unwrap();
        track.push(pair(1.0, 2.0));
        track.push(pair(3.0, 4.0));
        track.push(pair(5.0, 6.0));
        track.push(pair(7.0, 8.0));

        let uploads: heapless::Vec<f64, 3> = track.iter().map(|p| p.upload_bps).collect();
        assert_eq!(uploads.as_slice(), &[3.0, 5.0, 7.0]);
        assert_eq!(track.latest(), Some(&pair(7.0, 8.0)));
    }

    #[test]
    fn test_render_empty_history_is_blank() {
        let track = HistoryTrack::new(16).unwrap();
        let mut fb = Framebuffer::new(128, 64).unwrap();
        fb.fill();
        track.render(&mut fb, MAX_DOWN, MAX_UP).unwrap();
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_render_newest_on_the_right() {
        let mut track = HistoryTrack::new(16).unwrap();
        track.push(pair(MAX_UP / 2.0, MAX_DOWN));

        let mut fb = Framebuffer::new(128, 64).unwrap();
        track.render(&mut fb, MAX_DOWN, MAX_UP).unwrap();

        // Column 15 spans x = 120..=127, last pixel is the separator
        for x in 120..127 {
            assert!(fb.get_pixel(x, 0));
            assert!(fb.get_pixel(x, 30));
            assert!(!fb.get_pixel(x, 31));
            assert!(!fb.get_pixel(x, 32));
            assert!(fb.get_pixel(x, 33));
            assert!(fb.get_pixel(x, 48));
            assert!(!fb.get_pixel(x, 49));
        }
        assert_eq!(lit_rows(&fb, 127), 0);
        assert_eq!(lit_rows(&fb, 0), 0);
        assert_eq!(lit_rows(&fb, 119), 0);
    }

    #[test]
    fn test_render_bands_scale_independently() {
        let mut track = HistoryTrack::new(16).unwrap();
        // Same absolute rate, different band maxima
        track.push(pair(4_000_000.0, 4_000_000.0));

        let mut fb = Framebuffer::new(128, 64).unwrap();
        track.render(&mut fb, MAX_DOWN, MAX_UP).unwrap();

        let down = bar_height(4_000_000.0, MAX_DOWN, 31);
        let up = bar_height(4_000_000.0, MAX_UP, 31);
        assert_eq!(down, 4);
        assert_eq!(up, 16);

        let down_rows = (0..31).filter(|&y| fb.get_pixel(120, y)).count();
        let up_rows = (33..64).filter(|&y| fb.get_pixel(120, y)).count();
        assert_eq!(down_rows, down);
        assert_eq!(up_rows, up);
        assert!(fb.get_pixel(120, 30));
        assert!(!fb.get_pixel(120, 26));
    }

    #[test]
    fn test_render_scrolls_left() {
        let mut track = HistoryTrack::new(16).unwrap();
        let mut fb = Framebuffer::new(128, 64).unwrap();

        track.push(pair(0.0, MAX_DOWN));
        track.push(pair(0.0, 0.0));
        track.render(&mut fb, MAX_DOWN, MAX_UP).unwrap();

        assert_eq!(lit_rows(&fb, 112), 31);
        assert_eq!(lit_rows(&fb, 120), 0);
    }

    #[test]
    fn test_render_small_panel() {
        let mut track = HistoryTrack::new(4).unwrap();
        track.push(pair(1.0, 1.0));

        let mut fb = Framebuffer::new(8, 8).unwrap();
        track.render(&mut fb, 1.0, 1.0).unwrap();

        // Column 3 spans x = 6..=7, band height 3, upload starts at row 5
        for y in 0..3 {
            assert!(fb.get_pixel(6, y));
        }
        assert!(!fb.get_pixel(6, 3));
        assert!(!fb.get_pixel(6, 4));
        for y in 5..8 {
            assert!(fb.get_pixel(6, y));
        }
        assert_eq!(lit_rows(&fb, 7), 0);
    }

    #[test]
    fn test_render_rejects_narrow_columns() {
        let track = HistoryTrack::new(64).unwrap();
        let mut fb = Framebuffer::new(64, 64).unwrap();
        assert_eq!(
            track.render(&mut fb, MAX_DOWN, MAX_UP),
            Err(InvalidArgument::HistoryLength { length: 64 })
        );
    }
}
