use serde::Serialize;
use std::f64::consts::TAU;

use crate::random::RandomSource;

/// (frequency in Hz, weight) of each component.
pub const HARMONICS: [(f64, f64); 3] = [(50.0, 1.0), (100.0, 0.5), (150.0, 0.3)];
pub const NOISE_AMPLITUDE: f64 = 0.1;

/// One row of `signal_data.csv`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalSample {
    pub time: f64,
    pub signal: f64,
}

pub fn generate_signal_series(
    sample_rate: u32,
    duration_seconds: u32,
    rng: &mut impl RandomSource,
) -> Vec<SignalSample> {
    let total = sample_rate as usize * duration_seconds as usize;
    let rate = f64::from(sample_rate);
    let samples: Vec<SignalSample> = (0..total)
        .map(|i| {
            let t = i as f64 / rate;
            SignalSample {
                time: t,
                signal: clean_signal(t) + NOISE_AMPLITUDE * rng.uniform(-1.0, 1.0),
            }
        })
        .collect();
    log::debug!("generated {} signal samples at {} Hz", samples.len(), sample_rate);
    samples
}

/// Noise-free composite at time `t` seconds.
pub fn clean_signal(t: f64) -> f64 {
    HARMONICS
        .iter()
        .map(|(freq, weight)| weight * (TAU * freq * t).sin())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::make_rng;

    #[test]
    fn one_second_at_1khz() {
        let samples = generate_signal_series(1000, 1, &mut make_rng(Some(1)));
        assert_eq!(samples.len(), 1000);
        assert_eq!(samples[0].time, 0.0);
        assert!((samples[999].time - 0.999).abs() < 1e-12);
    }

    #[test]
    fn first_sample_is_noise_only() {
        for seed in 0..20 {
            let samples = generate_signal_series(1000, 1, &mut make_rng(Some(seed)));
            assert!(samples[0].signal.abs() <= NOISE_AMPLITUDE);
        }
    }

    #[test]
    fn samples_stay_within_noise_of_the_clean_wave() {
        let samples = generate_signal_series(800, 2, &mut make_rng(Some(8)));
        for s in samples {
            assert!((s.signal - clean_signal(s.time)).abs() <= NOISE_AMPLITUDE + 1e-12);
        }
    }

    #[test]
    fn clean_signal_peaks_below_weight_sum() {
        let max = (0..10_000)
            .map(|i| clean_signal(i as f64 / 10_000.0).abs())
            .fold(0.0, f64::max);
        assert!(max <= 1.8);
        assert!(max > 1.0);
    }
}
