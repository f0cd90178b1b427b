//! Analog meter gauges
//!
//! Each meter is a moving-coil panel meter on one PWM channel. Full-scale
//! deflection corresponds to the line's maximum rate; the needle position
//! is the rate's share of that maximum, rounded up so any traffic moves it.

use core::time::Duration;

use bandmeter_core::config::GaugeConfig;
use bandmeter_core::traits::{sleep, PwmError, PwmOutput};
use bandmeter_core::RateReading;
use bandmeter_display::MonochromeDisplay;
use embedded_hal::delay::DelayNs;
use micromath::F32Ext;

use crate::error::MonitorError;

/// Hold time for each self-test position
pub const WAGGLE_STEP: Duration = Duration::from_millis(200);

/// One meter and the rate it shows at full scale
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeterGauge {
    channel: usize,
    max_rate_bps: f64,
}

impl MeterGauge {
    pub fn new(channel: usize, max_rate_bps: f64) -> Self {
        Self {
            channel,
            max_rate_bps,
        }
    }

    pub fn from_config(config: &GaugeConfig) -> Self {
        Self::new(config.channel, config.max_bps())
    }

    pub fn channel(&self) -> usize {
        self.channel
    }

    pub fn max_rate_bps(&self) -> f64 {
        self.max_rate_bps
    }

    /// Channel value for `rate_bps` on a channel topping out at `max_value`
    pub fn pwm_value(&self, rate_bps: f64, max_value: u16) -> i32 {
        if !(self.max_rate_bps > 0.0) {
            return 0;
        }
        deflection(rate_bps / self.max_rate_bps, max_value)
    }

    /// Stage the needle position for `reading`; does not flush
    pub fn show<P: PwmOutput>(&self, pwm: &mut P, reading: &RateReading) -> Result<(), PwmError> {
        let value = self.pwm_value(reading.bits_per_second, pwm.max_value());
        pwm.set_value(self.channel, value)
    }

    /// Stage a fixed share of full scale; does not flush
    pub fn point_at<P: PwmOutput>(&self, pwm: &mut P, fraction: f64) -> Result<(), PwmError> {
        let value = deflection(fraction, pwm.max_value());
        pwm.set_value(self.channel, value)
    }
}

/// `ceil(min(fraction, 1) * max_value)`, zero for non-positive input
fn deflection(fraction: f64, max_value: u16) -> i32 {
    if !(fraction > 0.0) {
        return 0;
    }
    let scaled = fraction.min(1.0) * max_value as f64;
    // Narrowing to f32 can land on the integer just below `scaled`
    let mut steps = F32Ext::ceil(scaled as f32);
    if (steps as f64) < scaled {
        steps += 1.0;
    }
    steps as i32
}

/// Swing both needles across the scale and back to rest
///
/// Download 75% / upload 25%, then the reverse, then both at zero, holding
/// each of the first two positions for [`WAGGLE_STEP`].
pub fn waggle<P, D>(
    pwm: &mut P,
    download: &MeterGauge,
    upload: &MeterGauge,
    delay: &mut D,
) -> Result<(), PwmError>
where
    P: PwmOutput,
    D: DelayNs,
{
    for (down, up) in [(0.75, 0.25), (0.25, 0.75)] {
        download.point_at(pwm, down)?;
        upload.point_at(pwm, up)?;
        pwm.flush()?;
        sleep(delay, WAGGLE_STEP);
    }

    download.point_at(pwm, 0.0)?;
    upload.point_at(pwm, 0.0)?;
    pwm.flush()
}

/// Drive every PWM channel to full scale and light every pixel
///
/// Hardware check for wiring and dead pixels.
pub fn light_all<P, M>(pwm: &mut P, display: &mut M) -> Result<(), MonitorError>
where
    P: PwmOutput,
    M: MonochromeDisplay,
{
    let full = pwm.max_value() as i32;
    pwm.set_all(full)?;
    pwm.flush()?;

    display.framebuffer_mut().fill();
    display.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandmeter_display::{DisplayError, Framebuffer};
    use heapless::Vec;

    /// In-memory PWM bank recording every flushed frame
    struct MockPwm {
        values: [u16; 24],
        frames: Vec<[u16; 24], 8>,
    }

    impl MockPwm {
        fn new() -> Self {
            Self {
                values: [0; 24],
                frames: Vec::new(),
            }
        }
    }

    impl PwmOutput for MockPwm {
        fn channel_count(&self) -> usize {
            24
        }

        fn max_value(&self) -> u16 {
            4095
        }

        fn set_value(&mut self, channel: usize, value: i32) -> Result<(), PwmError> {
            let slot = self.values.get_mut(channel).ok_or(PwmError::InvalidArgument(
                bandmeter_core::InvalidArgument::ChannelOutOfRange { channel, count: 24 },
            ))?;
            *slot = value.clamp(0, 4095) as u16;
            Ok(())
        }

        fn value(&self, channel: usize) -> Option<u16> {
            self.values.get(channel).copied()
        }

        fn flush(&mut self) -> Result<(), PwmError> {
            self.frames.push(self.values).map_err(|_| PwmError::Bus)
        }
    }

    struct MockDisplay {
        buffer: Framebuffer,
        flushes: usize,
    }

    impl MonochromeDisplay for MockDisplay {
        fn framebuffer(&self) -> &Framebuffer {
            &self.buffer
        }

        fn framebuffer_mut(&mut self) -> &mut Framebuffer {
            &mut self.buffer
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            self.flushes += 1;
            Ok(())
        }

        fn set_inverted(&mut self, _inverted: bool) -> Result<(), DisplayError> {
            Ok(())
        }

        fn is_inverted(&self) -> bool {
            false
        }

        fn set_contrast(&mut self, _contrast: u8) -> Result<(), DisplayError> {
            Ok(())
        }
    }

    struct CountingDelay {
        total_us: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_us += (ns / 1000) as u64;
        }

        fn delay_us(&mut self, us: u32) {
            self.total_us += us as u64;
        }
    }

    fn gauges() -> (MeterGauge, MeterGauge) {
        (
            MeterGauge::new(18, 37_000_000.0),
            MeterGauge::new(12, 8_000_000.0),
        )
    }

    #[test]
    fn test_pwm_value() {
        let gauge = MeterGauge::new(0, 8_000_000.0);
        assert_eq!(gauge.pwm_value(0.0, 4095), 0);
        assert_eq!(gauge.pwm_value(8_000_000.0, 4095), 4095);
        assert_eq!(gauge.pwm_value(80_000_000.0, 4095), 4095);
        assert_eq!(gauge.pwm_value(4_000_000.0, 4095), 2048);
        // Any traffic moves the needle
        assert_eq!(gauge.pwm_value(1.0, 4095), 1);
        assert_eq!(gauge.pwm_value(-50.0, 4095), 0);
    }

    #[test]
    fn test_pwm_value_rounds_up_past_f32_precision() {
        let gauge = MeterGauge::new(0, 4095.0);
        assert_eq!(gauge.pwm_value(100.0, 4095), 100);
        assert_eq!(gauge.pwm_value(100.000_000_01, 4095), 101);
        // Far below one f32 step of full scale still moves the needle
        assert_eq!(MeterGauge::new(0, 1e60).pwm_value(1.0, 4095), 1);
    }

    #[test]
    fn test_pwm_value_without_max_rate() {
        assert_eq!(MeterGauge::new(0, 0.0).pwm_value(1000.0, 4095), 0);
        assert_eq!(MeterGauge::new(0, -1.0).pwm_value(1000.0, 4095), 0);
    }

    #[test]
    fn test_from_config_converts_kbps() {
        let gauge = MeterGauge::from_config(&GaugeConfig {
            channel: 18,
            max_kbps: 37_000.0,
        });
        assert_eq!(gauge.channel(), 18);
        assert_eq!(gauge.max_rate_bps(), 37_000_000.0);
    }

    #[test]
    fn test_show_stages_without_flush() {
        let (download, _) = gauges();
        let mut pwm = MockPwm::new();
        download
            .show(&mut pwm, &RateReading::from_bps(37_000_000.0))
            .unwrap();
        assert_eq!(pwm.value(18), Some(4095));
        assert!(pwm.frames.is_empty());
    }

    #[test]
    fn test_waggle_sequence() {
        let (download, upload) = gauges();
        let mut pwm = MockPwm::new();
        let mut delay = CountingDelay { total_us: 0 };

        waggle(&mut pwm, &download, &upload, &mut delay).unwrap();

        assert_eq!(pwm.frames.len(), 3);
        assert_eq!((pwm.frames[0][18], pwm.frames[0][12]), (3072, 1024));
        assert_eq!((pwm.frames[1][18], pwm.frames[1][12]), (1024, 3072));
        assert_eq!((pwm.frames[2][18], pwm.frames[2][12]), (0, 0));
        assert_eq!(delay.total_us, 400_000);
    }

    #[test]
    fn test_light_all() {
        let mut pwm = MockPwm::new();
        let mut display = MockDisplay {
            buffer: Framebuffer::new(128, 64).unwrap(),
            flushes: 0,
        };

        light_all(&mut pwm, &mut display).unwrap();

        assert_eq!(pwm.frames.len(), 1);
        assert!(pwm.frames[0].iter().all(|&v| v == 4095));
        assert_eq!(display.flushes, 1);
        assert!(display.buffer.as_bytes().iter().all(|&b| b == 0xFF));
    }
}
