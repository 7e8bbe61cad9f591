//! Sixty-degree field-of-view sounding: a pre-computed phase progression
//! illuminating a 60 degree sector, receiving on all antennas, on two
//! frequencies alternated each averaging period.

use anyhow::Result;
use expcore::experiment::interfacing;
use expcore::experiment::{ExperimentPrototype, InterfacingType, RxBeam, Slice};
use expcore::prelude::{ExperimentError, ExperimentResult};
use ndarray::Array2;
use num_complex::Complex32;

use crate::common;
use crate::kwargs::Kwargs;
use crate::site::SiteOptions;

pub const CPID: i32 = 3807;

/// Cached 60-degree illumination phases (degrees) for 16 antennas at
/// 15.24 m spacing, one row per supported frequency.
const SIXTY_DEG_PHASES_16: [(u32, [f64; 16]); 12] = [
    (
        10400,
        [
            0.0, 33.21168501, 63.39856497, 133.51815213, 232.59694556, 287.65482653, 299.43588532,
            313.30394893, 313.30394893, 299.43588532, 287.65482653, 232.59694556, 133.51815213,
            63.39856497, 33.21168501, 0.0,
        ],
    ),
    (
        10500,
        [
            0.0, 33.22157987, 63.44769218, 134.09072554, 232.41818196, 288.18043116, 299.96678003,
            312.81034918, 312.81034918, 299.96678003, 288.18043116, 232.41818196, 134.09072554,
            63.44769218, 33.22157987, 0.0,
        ],
    ),
    (
        10600,
        [
            0.0, 33.49341546, 63.918406, 135.76673356, 232.41342064, 288.68373728, 299.8089564,
            312.19755493, 312.19755493, 299.8089564, 288.68373728, 232.41342064, 135.76673356,
            63.918406, 33.49341546, 0.0,
        ],
    ),
    (
        10700,
        [
            0.0, 33.42706054, 63.94880958, 136.78441366, 232.43324622, 288.91978353, 299.57226291,
            311.74840496, 311.74840496, 299.57226291, 288.91978353, 232.43324622, 136.78441366,
            63.94880958, 33.42706054, 0.0,
        ],
    ),
    (
        10800,
        [
            0.0, 33.13909903, 63.56879316, 137.23017826, 232.17488475, 289.01436937, 299.53525025,
            311.23785241, 311.23785241, 299.53525025, 289.01436937, 232.17488475, 137.23017826,
            63.56879316, 33.13909903, 0.0,
        ],
    ),
    (
        10900,
        [
            0.0, 33.15305158, 63.55105706, 137.93590292, 232.13550152, 289.46328775, 299.78227805,
            310.57614029, 310.57614029, 299.78227805, 289.46328775, 232.13550152, 137.93590292,
            63.55105706, 33.15305158, 0.0,
        ],
    ),
    (
        12200,
        [
            0.0, 70.91038811, 122.60927618, 214.92179098, 276.38784179, 325.25390655, 351.3873793,
            316.5693829, 316.5693829, 351.3873793, 325.25390655, 276.38784179, 214.92179098,
            122.60927618, 70.91038811, 0.0,
        ],
    ),
    (
        12300,
        [
            0.0, 71.78224973, 124.29124213, 215.26781585, 277.84490172, 326.57004062, 353.22972278,
            318.83181539, 318.83181539, 353.22972278, 326.57004062, 277.84490172, 215.26781585,
            124.29124213, 71.78224973, 0.0,
        ],
    ),
    (
        12500,
        [
            0.0, 75.1870308, 128.12468688, 216.50545923, 281.26273571, 334.23044519, 357.70997722,
            326.41420518, 326.41420518, 357.70997722, 334.23044519, 281.26273571, 216.50545923,
            128.12468688, 75.1870308, 0.0,
        ],
    ),
    (
        13000,
        [
            0.0, 65.30441048, 122.04513377, 208.77532736, 282.14858123, 329.88094473, 368.67442895,
            324.92709286, 324.92709286, 368.67442895, 329.88094473, 282.14858123, 208.77532736,
            122.04513377, 65.30441048, 0.0,
        ],
    ),
    (
        13100,
        [
            0.0, 75.41723909, 133.59413156, 216.03815626, 287.94258174, 343.50035796, 369.91299149,
            337.96682569, 337.96682569, 369.91299149, 343.50035796, 287.94258174, 216.03815626,
            133.59413156, 75.41723909, 0.0,
        ],
    ),
    (
        13200,
        [
            0.0, 67.98474247, 126.21855408, 209.5839628, 285.48610109, 333.17276884, 370.37654775,
            329.43903017, 329.43903017, 370.37654775, 333.17276884, 285.48610109, 209.5839628,
            126.21855408, 67.98474247, 0.0,
        ],
    ),
];

/// Transmit pattern spreading the main beam across a 60-degree sector.
/// Only 16 antennas at 15.24 m spacing and the cached frequencies are
/// supported.
fn sixty_deg_widebeam(
    freq_khz: f64,
    tx_antennas: &[usize],
    antenna_spacing_m: f64,
) -> ExperimentResult<Array2<Complex32>> {
    if (antenna_spacing_m - 15.24).abs() > 1.0e-6 {
        return Err(ExperimentError::InvalidAntennaPattern(format!(
            "antenna spacing must be 15.24 m, got {}",
            antenna_spacing_m
        )));
    }
    if tx_antennas.len() != 16 {
        return Err(ExperimentError::InvalidAntennaPattern(format!(
            "60-degree illumination needs all 16 antennas, got {}",
            tx_antennas.len()
        )));
    }
    let freq = freq_khz.round() as u32;
    let phases = SIXTY_DEG_PHASES_16
        .iter()
        .find(|(cached_freq, _)| *cached_freq == freq)
        .map(|(_, phases)| phases)
        .ok_or_else(|| {
            ExperimentError::InvalidAntennaPattern(format!(
                "no cached 60-degree phases for {} kHz",
                freq_khz
            ))
        })?;

    let mut pattern = Array2::<Complex32>::zeros((1, 16));
    for (&antenna, &degrees) in tx_antennas.iter().zip(phases.iter()) {
        if antenna >= 16 {
            return Err(ExperimentError::InvalidAntennaPattern(format!(
                "tx antenna {} outside the 16-antenna main array",
                antenna
            )));
        }
        pattern[[0, antenna]] = Complex32::from_polar(0.999999, (degrees as f32).to_radians());
    }
    Ok(pattern)
}

pub fn build(site: &SiteOptions, _kwargs: &Kwargs) -> Result<ExperimentPrototype> {
    let mut experiment = ExperimentPrototype::new(CPID);

    let num_antennas = site.main_antenna_count;

    let slice_0 = Slice {
        pulse_sequence: common::SEQUENCE_7P.to_vec(),
        tau_spacing_us: common::TAU_SPACING_7P,
        pulse_len_us: common::PULSE_LEN_45KM,
        num_ranges: common::STD_NUM_RANGES,
        first_range_km: common::STD_FIRST_RANGE_KM,
        intt_ms: Some(common::INTT_7P),
        beam_angle: common::STD_16_BEAM_ANGLE.to_vec(),
        rx_beam_order: RxBeam::all_at_once(num_antennas),
        tx_beam_order: vec![0], // only one pattern
        tx_antenna_pattern: Some(sixty_deg_widebeam),
        freq_khz: common::COMMON_MODE_FREQ_1,
        acf: true,
        xcf: true,
        acfint: true,
        ..Default::default()
    };

    let slice_1 = Slice {
        freq_khz: common::COMMON_MODE_FREQ_2,
        ..slice_0.clone()
    };

    experiment.add_slice(slice_0, None)?;
    experiment.add_slice(
        slice_1,
        Some(interfacing(&[(0, InterfacingType::Aveperiod)])),
    )?;

    Ok(experiment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_frequencies_alternate_by_averaging_period() {
        let experiment = build(&SiteOptions::default(), &Kwargs::new()).unwrap();
        assert_eq!(experiment.num_slices(), 2);
        assert_eq!(
            experiment.interfacing()[&(0, 1)],
            InterfacingType::Aveperiod
        );
        assert_eq!(experiment.slices()[0].freq_khz, common::COMMON_MODE_FREQ_1);
        assert_eq!(experiment.slices()[1].freq_khz, common::COMMON_MODE_FREQ_2);
    }

    #[test]
    fn pattern_rejects_wrong_spacing_and_unknown_frequency() {
        let all: Vec<usize> = (0..16).collect();
        assert!(sixty_deg_widebeam(10500.0, &all, 15.24).is_ok());
        assert!(sixty_deg_widebeam(10500.0, &all, 10.0).is_err());
        assert!(sixty_deg_widebeam(9999.0, &all, 15.24).is_err());
        assert!(sixty_deg_widebeam(10500.0, &all[..8], 15.24).is_err());
    }

    #[test]
    fn pattern_phases_are_symmetric_about_the_array_center() {
        let all: Vec<usize> = (0..16).collect();
        let pattern = sixty_deg_widebeam(12300.0, &all, 15.24).unwrap();
        for i in 0..8 {
            let lhs = pattern[[0, i]];
            let rhs = pattern[[0, 15 - i]];
            assert!((lhs - rhs).norm() < 1.0e-5);
        }
    }
}
