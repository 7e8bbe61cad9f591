use std::f64::consts::PI;

/// Zeroth-order modified Bessel function of the first kind, evaluated by
/// power series.
pub fn i0(x: f64) -> f64 {
    let half = x / 2.0;
    let mut term = 1.0;
    let mut sum = 1.0;
    let mut k = 1.0;
    loop {
        term *= (half / k) * (half / k);
        sum += term;
        if term < sum * 1.0e-12 {
            break;
        }
        k += 1.0;
    }
    sum
}

/// Normalized sinc, sin(pi x) / (pi x).
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

/// Kaiser window of the given length and shape parameter.
pub fn kaiser_window(num_taps: usize, beta: f64) -> Vec<f64> {
    if num_taps <= 1 {
        return vec![1.0; num_taps];
    }
    let alpha = (num_taps - 1) as f64 / 2.0;
    let denom = i0(beta);
    (0..num_taps)
        .map(|n| {
            let ratio = (n as f64 - alpha) / alpha;
            i0(beta * (1.0 - ratio * ratio).max(0.0).sqrt()) / denom
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i0_at_zero_is_one() {
        assert_eq!(i0(0.0), 1.0);
    }

    #[test]
    fn i0_grows_monotonically() {
        assert!(i0(1.0) > i0(0.5));
        assert!(i0(5.0) > i0(1.0));
        // reference value for I0(1) is 1.26606587...
        assert!((i0(1.0) - 1.2660658777520084).abs() < 1.0e-10);
    }

    #[test]
    fn sinc_at_zero_and_integers() {
        assert_eq!(sinc(0.0), 1.0);
        assert!(sinc(1.0).abs() < 1.0e-12);
        assert!(sinc(-3.0).abs() < 1.0e-12);
    }

    #[test]
    fn kaiser_window_is_symmetric_with_unit_peak() {
        let window = kaiser_window(33, 8.6);
        assert_eq!(window.len(), 33);
        assert!((window[16] - 1.0).abs() < 1.0e-12);
        for i in 0..window.len() {
            assert!((window[i] - window[window.len() - 1 - i]).abs() < 1.0e-12);
        }
    }

    #[test]
    fn kaiser_window_endpoints_match_shape_parameter() {
        let beta = 5.0;
        let window = kaiser_window(21, beta);
        assert!((window[0] - 1.0 / i0(beta)).abs() < 1.0e-12);
    }
}
