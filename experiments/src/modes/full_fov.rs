//! Full field-of-view sounding: transmits a pre-computed phase progression
//! that illuminates the whole FOV at once and receives on all antennas,
//! with sequences aligned to 0.1 s boundaries for bistatic listening.

use anyhow::Result;
use expcore::decimation::create_default_scheme;
use expcore::experiment::{ExperimentPrototype, RxBeam, Slice};
use log::info;

use crate::common;
use crate::kwargs::Kwargs;
use crate::site::SiteOptions;

pub const CPID: i32 = 3800;

pub fn build(site: &SiteOptions, kwargs: &Kwargs) -> Result<ExperimentPrototype> {
    let mut experiment = ExperimentPrototype::new(CPID);

    let freq = kwargs
        .get_u32("freq")?
        .unwrap_or(common::COMMON_MODE_FREQ_1);
    info!("Frequency set to {}", freq);

    let num_antennas = site.main_antenna_count;

    experiment.add_slice(
        Slice {
            pulse_sequence: common::SEQUENCE_7P.to_vec(),
            tau_spacing_us: common::TAU_SPACING_7P,
            pulse_len_us: common::PULSE_LEN_45KM,
            num_ranges: site.num_ranges(),
            first_range_km: common::STD_FIRST_RANGE_KM,
            intt_ms: Some(common::INTT_7P),
            beam_angle: common::STD_16_BEAM_ANGLE.to_vec(),
            rx_beam_order: RxBeam::all_at_once(num_antennas),
            tx_beam_order: vec![0], // only one transmit pattern
            tx_antenna_pattern: Some(common::easy_widebeam),
            freq_khz: freq,
            acf: true,
            xcf: true,
            acfint: true,
            align_sequences: true,
            decimation_scheme: Some(create_default_scheme()?),
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
    fn single_widebeam_slice_with_default_scheme() {
        let experiment = build(&SiteOptions::default(), &Kwargs::new()).unwrap();
        assert_eq!(experiment.num_slices(), 1);
        let slice = &experiment.slices()[0];
        assert_eq!(slice.tx_beam_order, vec![0]);
        assert!(slice.tx_antenna_pattern.is_some());
        assert!(slice.align_sequences);
        let scheme = slice.decimation_scheme.as_ref().unwrap();
        assert_eq!(
            scheme.input_rate_hz,
            scheme.output_rate_hz * scheme.rate_reduction() as f64
        );
    }

    #[test]
    fn pattern_callable_produces_full_array_phasors() {
        let experiment = build(&SiteOptions::default(), &Kwargs::new()).unwrap();
        let pattern = experiment.slices()[0].tx_antenna_pattern.unwrap();
        let all: Vec<usize> = (0..16).collect();
        let phasors = pattern(10500.0, &all, 15.24).unwrap();
        assert_eq!(phasors.dim(), (1, 16));
    }
}
