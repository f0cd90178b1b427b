//! Bandwidth monitor loop
//!
//! The monitor owns one rate estimator per direction, the PWM bank driving
//! the meters and the OLED showing the history chart. Every tick:
//!
//! 1. Read the download rate
//! 2. Read the upload rate
//! 3. Stage both meter positions and flush the PWM bank once
//! 4. Append the pair to the history, redraw the chart and flush the display
//!
//! The cancellation token is checked before each step. A failed fetch
//! shows as zero for that tick; a failed bus write is reported and the next
//! tick tries again. Only cancellation ends the loop, after which every
//! meter is driven to zero and the display is cleared.

use core::time::Duration;

use bandmeter_core::config::MeterConfig;
use bandmeter_core::traits::{sleep, Clock, CounterSource, PwmError, PwmOutput};
use bandmeter_core::{InvalidArgument, RateError, RateEstimator, RateReading};
use bandmeter_display::{DisplayError, HistoryTrack, MonochromeDisplay, RatePair};
use embedded_hal::delay::DelayNs;

use crate::cancel::CancelToken;
use crate::error::MonitorError;
use crate::meters::{self, MeterGauge};

/// Faults absorbed during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickFaults {
    pub download: Option<RateError>,
    pub upload: Option<RateError>,
    pub pwm: Option<PwmError>,
    pub display: Option<DisplayError>,
}

impl TickFaults {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Outcome of a completed tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    pub download: RateReading,
    pub upload: RateReading,
    pub faults: TickFaults,
}

/// Download/upload bandwidth monitor
pub struct Monitor<DS, US, C, P, M> {
    download_rate: RateEstimator<DS, C>,
    upload_rate: RateEstimator<US, C>,
    download_gauge: MeterGauge,
    upload_gauge: MeterGauge,
    pwm: P,
    display: M,
    history: HistoryTrack,
    period: Duration,
    run_self_test: bool,
}

impl<DS, US, C, P, M> Monitor<DS, US, C, P, M>
where
    DS: CounterSource,
    US: CounterSource,
    C: Clock + Clone,
    P: PwmOutput,
    M: MonochromeDisplay,
{
    /// Validate `config` against the attached hardware and fill both
    /// estimator windows
    ///
    /// Blocks for `window_size - 1` bootstrap delays per direction. The
    /// display gets the configured contrast and inversion, the meters are
    /// driven to zero.
    pub fn new<D: DelayNs>(
        config: &MeterConfig,
        download_source: DS,
        upload_source: US,
        clock: C,
        mut pwm: P,
        mut display: M,
        delay: &mut D,
    ) -> Result<Self, MonitorError> {
        config.validate()?;

        let count = pwm.channel_count();
        for gauge in [&config.download, &config.upload] {
            if gauge.channel >= count {
                return Err(InvalidArgument::ChannelOutOfRange {
                    channel: gauge.channel,
                    count,
                }
                .into());
            }
        }

        let history = HistoryTrack::new(config.history_length)?;
        if display.framebuffer().width() / history.len() < 2 {
            return Err(InvalidArgument::HistoryLength {
                length: history.len(),
            }
            .into());
        }

        let window = config.sampling.window_size;
        let bootstrap = config.sampling.bootstrap_delay();
        let download_rate =
            RateEstimator::new(window, bootstrap, download_source, clock.clone(), delay)?;
        let upload_rate = RateEstimator::new(window, bootstrap, upload_source, clock, delay)?;

        pwm.reset_all()?;
        display.set_contrast(config.display.contrast)?;
        display.set_inverted(config.display.inverted)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "monitor ready: window {}, period {} ms, {} history slots",
            window,
            config.sampling.sample_period_ms,
            history.len()
        );

        Ok(Self {
            download_rate,
            upload_rate,
            download_gauge: MeterGauge::from_config(&config.download),
            upload_gauge: MeterGauge::from_config(&config.upload),
            pwm,
            display,
            history,
            period: config.sampling.sample_period(),
            run_self_test: config.self_test,
        })
    }

    /// Run one tick
    ///
    /// Returns `None` if `cancel` was set before the tick completed.
    pub fn tick(&mut self, cancel: &CancelToken) -> Option<TickReport> {
        let mut faults = TickFaults::default();

        if cancel.is_cancelled() {
            return None;
        }
        let download = read_rate(&mut self.download_rate, &mut faults.download);

        if cancel.is_cancelled() {
            return None;
        }
        let upload = read_rate(&mut self.upload_rate, &mut faults.upload);

        if cancel.is_cancelled() {
            return None;
        }
        if let Err(e) = self.show_meters(&download, &upload) {
            #[cfg(feature = "defmt")]
            defmt::warn!("meter update failed: {}", e);
            faults.pwm = Some(e);
        }

        if cancel.is_cancelled() {
            return None;
        }
        self.history.push(RatePair::new(upload, download));
        if let Err(e) = self.draw_history() {
            #[cfg(feature = "defmt")]
            defmt::warn!("display update failed: {}", e);
            faults.display = Some(e);
        }

        Some(TickReport {
            download,
            upload,
            faults,
        })
    }

    /// Stage both gauges and flush the bank once
    fn show_meters(&mut self, download: &RateReading, upload: &RateReading) -> Result<(), PwmError> {
        self.download_gauge.show(&mut self.pwm, download)?;
        self.upload_gauge.show(&mut self.pwm, upload)?;
        self.pwm.flush()
    }

    fn draw_history(&mut self) -> Result<(), DisplayError> {
        self.history.render(
            self.display.framebuffer_mut(),
            self.download_gauge.max_rate_bps(),
            self.upload_gauge.max_rate_bps(),
        )?;
        self.display.flush()
    }

    /// Tick every sample period until `cancel` is set, then shut down
    ///
    /// Runs the meter self-test first when the configuration asks for it. A
    /// failed self-test is logged and the loop starts anyway; only the
    /// shutdown result is returned.
    pub fn run<D: DelayNs>(&mut self, cancel: &CancelToken, delay: &mut D) -> Result<(), MonitorError> {
        if self.run_self_test && !cancel.is_cancelled() {
            // The first tick repositions the needles
            if let Err(_e) = self.self_test(delay) {
                #[cfg(feature = "defmt")]
                defmt::warn!("meter self-test failed: {}", _e);
            }
        }

        while let Some(_report) = self.tick(cancel) {
            #[cfg(feature = "defmt")]
            {
                let (down, down_unit) = _report.download.scaled();
                let (up, up_unit) = _report.upload.scaled();
                defmt::debug!(
                    "down {} {} / up {} {}",
                    down,
                    down_unit.symbol(),
                    up,
                    up_unit.symbol()
                );
            }

            if cancel.is_cancelled() {
                break;
            }
            sleep(delay, self.period);
        }

        self.shutdown()
    }

    /// Sweep both meters across the scale
    pub fn self_test<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), MonitorError> {
        #[cfg(feature = "defmt")]
        defmt::info!("meter self-test");

        meters::waggle(&mut self.pwm, &self.download_gauge, &self.upload_gauge, delay)?;
        Ok(())
    }

    /// Every channel at full scale, every pixel lit
    pub fn light_all(&mut self) -> Result<(), MonitorError> {
        meters::light_all(&mut self.pwm, &mut self.display)
    }

    /// Drive every channel to zero and blank the display
    ///
    /// Both outputs are attempted even if the first fails; the first error
    /// is returned.
    pub fn shutdown(&mut self) -> Result<(), MonitorError> {
        #[cfg(feature = "defmt")]
        defmt::info!("shutting down");

        let pwm = self.pwm.reset_all();
        let display = self.display.clear_display();
        pwm?;
        display?;
        Ok(())
    }

    pub fn history(&self) -> &HistoryTrack {
        &self.history
    }

    pub fn pwm(&self) -> &P {
        &self.pwm
    }

    pub fn display(&self) -> &M {
        &self.display
    }

    pub fn download_estimator(&self) -> &RateEstimator<DS, C> {
        &self.download_rate
    }

    pub fn upload_estimator(&self) -> &RateEstimator<US, C> {
        &self.upload_rate
    }

    /// Time between ticks
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Tear down, returning the outputs
    pub fn release(self) -> (P, M) {
        (self.pwm, self.display)
    }
}

/// Current rate, or zero with the fault recorded if the fetch failed
fn read_rate<S: CounterSource, C: Clock>(
    estimator: &mut RateEstimator<S, C>,
    fault: &mut Option<RateError>,
) -> RateReading {
    match estimator.get_current_speed() {
        Ok(reading) => reading,
        Err(e) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("rate fetch failed: {}", e);
            *fault = Some(e);
            RateReading::ZERO
        }
    }
}
