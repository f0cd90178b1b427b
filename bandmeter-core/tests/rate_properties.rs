//! Property tests for the weighted rate estimator

use core::time::Duration;

use bandmeter_core::rate::{gap_weights, weighted_rate, MAX_WINDOW_SIZE};
use bandmeter_core::Sample;
use proptest::prelude::*;

fn build_samples(steps: &[(u64, u64)]) -> Vec<Sample> {
    let mut t = Duration::ZERO;
    steps
        .iter()
        .map(|&(dt_ms, value)| {
            t += Duration::from_millis(dt_ms);
            Sample {
                timestamp: t,
                counter_value: value,
            }
        })
        .collect()
}

proptest! {
    /// Arbitrary counters, including resets and repeated timestamps, never
    /// produce a negative rate.
    #[test]
    fn never_negative(
        steps in proptest::collection::vec((0u64..2_000, any::<u32>().prop_map(u64::from)), 2..=MAX_WINDOW_SIZE),
    ) {
        let samples = build_samples(&steps);
        let weights = gap_weights(samples.len()).unwrap();
        let rate = weighted_rate(&samples, &weights);
        prop_assert!(rate >= 0.0);
        prop_assert!(rate.is_finite());
    }

    /// A constant byte rate over uniform spacing yields that rate.
    #[test]
    fn constant_rate_recovered(
        window in 2usize..=MAX_WINDOW_SIZE,
        bytes_per_tick in 1u64..1_000_000,
        period_ms in 1u64..10_000,
    ) {
        let steps: Vec<(u64, u64)> = (0..window as u64)
            .map(|i| (period_ms, i * bytes_per_tick))
            .collect();
        let samples = build_samples(&steps);
        let weights = gap_weights(window).unwrap();

        let expected = (bytes_per_tick * 8) as f64 / (period_ms as f64 / 1000.0);
        let rate = weighted_rate(&samples, &weights);
        prop_assert!((rate - expected).abs() <= expected * 1e-9);
    }

    /// A single wrapped gap only ever lowers the estimate.
    #[test]
    fn wrap_contributes_zero(
        window in 3usize..=12,
        wrap_at in 1usize..11,
    ) {
        let wrap_at = wrap_at.min(window - 1);
        let mut value = 1_000_000u64;
        let steps: Vec<(u64, u64)> = (0..window)
            .map(|i| {
                if i == wrap_at {
                    value = 0;
                } else {
                    value += 1000;
                }
                (1000, value)
            })
            .collect();
        let samples = build_samples(&steps);
        let weights = gap_weights(window).unwrap();

        let rate = weighted_rate(&samples, &weights);
        prop_assert!(rate >= 0.0);
        prop_assert!(rate < 8000.0);
    }
}
