//! Intra-pulse coding test: normalscan carrying a 30-chip binary code on
//! every pulse, with the sign flipped on alternate pulses, received on a
//! single-stage wideband chain that preserves the chip bandwidth.

use anyhow::Result;
use expcore::decimation::{
    create_firwin_filter_by_attenuation, DecimationScheme, DecimationStage,
};
use expcore::experiment::{ExperimentPrototype, PhaseEncoding, RxBeam, Slice};
use log::info;
use ndarray::Array2;
use num_complex::Complex32;

use crate::common;
use crate::kwargs::Kwargs;
use crate::site::SiteOptions;

pub const CPID: i32 = 10052;

/// Single-stage chain keeping 100 kHz of bandwidth for the chip codes.
fn single_stage_scheme() -> Result<DecimationScheme> {
    let rates = [5.0e6];
    let dm_rates = [50];
    let transition_widths = [50.0e3];
    let cutoffs = [100.0e3];
    let ripple_dbs = [100.0];
    let scaling_factors = [100.0];

    let mut stages = Vec::with_capacity(rates.len());
    for stage in 0..rates.len() {
        let taps = create_firwin_filter_by_attenuation(
            rates[stage],
            transition_widths[stage],
            cutoffs[stage],
            ripple_dbs[stage],
        )?;
        let scaled = taps
            .iter()
            .map(|tap| tap * scaling_factors[stage])
            .collect();
        stages.push(DecimationStage::new(
            stage,
            rates[stage],
            dm_rates[stage],
            scaled,
        ));
    }

    Ok(DecimationScheme::new(
        rates[0],
        rates[rates.len() - 1] / dm_rates[dm_rates.len() - 1] as f64,
        stages,
    ))
}

fn pulse_encode(
    _beam_iter: usize,
    _sequence_num: usize,
    num_pulses: usize,
) -> Array2<Complex32> {
    // each pulse is 30 chips long
    const CHIPS: [f32; 30] = [
        -1.0, -1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, -1.0, 1.0, 1.0, -1.0, 1.0, 1.0,
        -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0, -1.0,
    ];
    let mut codes = Array2::<Complex32>::zeros((num_pulses, CHIPS.len()));
    for (pulse, mut row) in codes.outer_iter_mut().enumerate() {
        let sign = if pulse % 2 == 1 { -1.0 } else { 1.0 };
        for (code, chip) in row.iter_mut().zip(CHIPS) {
            *code = Complex32::new(sign * chip, 0.0);
        }
    }
    codes
}

pub fn build(_site: &SiteOptions, kwargs: &Kwargs) -> Result<ExperimentPrototype> {
    let mut experiment = ExperimentPrototype::new(CPID);

    let beams_to_use = common::STD_16_FORWARD_BEAM_ORDER;
    let decimation_scheme = single_stage_scheme()?;

    let freq = kwargs
        .get_u32("freq")?
        .unwrap_or(common::COMMON_MODE_FREQ_1);
    info!("Frequency set to {}", freq);

    experiment.add_slice(
        Slice {
            pulse_sequence: common::SEQUENCE_7P.to_vec(),
            tau_spacing_us: common::TAU_SPACING_7P,
            pulse_len_us: common::PULSE_LEN_45KM,
            num_ranges: common::STD_NUM_RANGES,
            first_range_km: common::STD_FIRST_RANGE_KM,
            intt_ms: Some(common::INTT_7P),
            beam_angle: common::STD_16_BEAM_ANGLE.to_vec(),
            rx_beam_order: RxBeam::each(&beams_to_use),
            tx_beam_order: beams_to_use.to_vec(),
            freq_khz: freq,
            pulse_phase_offset: Some(PhaseEncoding::Codes(pulse_encode)),
            decimation_scheme: Some(decimation_scheme),
            ..Default::default()
        },
        None,
    )?;

    Ok(experiment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_alternate_sign_between_pulses() {
        let codes = pulse_encode(0, 0, 7);
        assert_eq!(codes.dim(), (7, 30));
        assert_eq!(codes[[0, 0]], Complex32::new(-1.0, 0.0));
        assert_eq!(codes[[1, 0]], Complex32::new(1.0, 0.0));
        assert_eq!(codes[[2, 4]], Complex32::new(1.0, 0.0));
        assert_eq!(codes[[3, 4]], Complex32::new(-1.0, 0.0));
    }

    #[test]
    fn slice_carries_codes_and_the_wideband_chain() {
        let experiment = build(&SiteOptions::default(), &Kwargs::new()).unwrap();
        assert_eq!(experiment.num_slices(), 1);
        let slice = &experiment.slices()[0];
        assert!(matches!(
            slice.pulse_phase_offset,
            Some(PhaseEncoding::Codes(_))
        ));
        assert!(!slice.acf);
        let scheme = slice.decimation_scheme.as_ref().unwrap();
        assert_eq!(scheme.rate_reduction(), 50);
        assert_eq!(scheme.output_rate_hz, 100.0e3);
        let reconstructed = scheme.output_rate_hz * scheme.rate_reduction() as f64;
        assert!((reconstructed - scheme.input_rate_hz).abs() < 1.0e-6);
    }
}
