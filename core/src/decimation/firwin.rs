use std::f64::consts::PI;

use crate::math::window::{kaiser_window, sinc};
use crate::prelude::{ExperimentError, ExperimentResult};

/// Kaiser attenuation formulas: tap count and window shape parameter for the
/// requested stopband attenuation and transition width as a fraction of
/// Nyquist.
pub fn kaiser_params(ripple_db: f64, width_ratio: f64) -> (usize, f64) {
    let attenuation = ripple_db.abs();
    let beta = if attenuation > 50.0 {
        0.1102 * (attenuation - 8.7)
    } else if attenuation >= 21.0 {
        0.5842 * (attenuation - 21.0).powf(0.4) + 0.07886 * (attenuation - 21.0)
    } else {
        0.0
    };
    let num_taps = ((attenuation - 7.95) / (2.285 * PI * width_ratio))
        .ceil()
        .max(0.0) as usize
        + 1;
    (num_taps, beta)
}

/// Low-pass FIR design by attenuation: a Kaiser-windowed sinc kernel sized
/// from the stopband ripple and transition width, scaled to unit DC gain.
pub fn create_firwin_filter_by_attenuation(
    sample_rate: f64,
    transition_width: f64,
    cutoff_hz: f64,
    ripple_db: f64,
) -> ExperimentResult<Vec<f64>> {
    if sample_rate <= 0.0 || transition_width <= 0.0 {
        return Err(ExperimentError::InvalidFilter(format!(
            "sample rate {} Hz and transition width {} Hz must be positive",
            sample_rate, transition_width
        )));
    }
    let nyquist = sample_rate / 2.0;
    if cutoff_hz <= 0.0 || cutoff_hz >= nyquist {
        return Err(ExperimentError::InvalidFilter(format!(
            "cutoff {} Hz outside (0, {}) Hz for sample rate {} Hz",
            cutoff_hz, nyquist, sample_rate
        )));
    }

    let (num_taps, beta) = kaiser_params(ripple_db, transition_width / nyquist);
    let window = kaiser_window(num_taps, beta);
    let normalized_cutoff = cutoff_hz / nyquist;
    let alpha = (num_taps - 1) as f64 / 2.0;
    let mut taps: Vec<f64> = (0..num_taps)
        .map(|n| {
            let m = n as f64 - alpha;
            normalized_cutoff * sinc(normalized_cutoff * m) * window[n]
        })
        .collect();

    let dc_gain: f64 = taps.iter().sum();
    for tap in &mut taps {
        *tap /= dc_gain;
    }
    Ok(taps)
}
