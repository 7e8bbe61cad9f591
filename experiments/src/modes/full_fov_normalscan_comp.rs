//! Comparison between full-FOV and normal-scan transmission on one
//! frequency, interleaving the two each averaging period. Sequences start
//! on 0.1 s boundaries so other radars can listen bistatically.

use anyhow::Result;
use expcore::experiment::interfacing;
use expcore::experiment::{ExperimentPrototype, InterfacingType, RxBeam, Slice};

use crate::common;
use crate::kwargs::Kwargs;
use crate::site::SiteOptions;

pub const CPID: i32 = 3814;

pub fn build(_site: &SiteOptions, _kwargs: &Kwargs) -> Result<ExperimentPrototype> {
    let mut experiment = ExperimentPrototype::new(CPID);

    let num_beams = common::STD_16_BEAM_ANGLE.len();
    let beam_steps: Vec<usize> = (0..num_beams).collect();

    let slice_0 = Slice {
        pulse_sequence: common::SEQUENCE_7P.to_vec(),
        tau_spacing_us: common::TAU_SPACING_7P,
        pulse_len_us: common::PULSE_LEN_45KM,
        num_ranges: common::STD_NUM_RANGES,
        first_range_km: common::STD_FIRST_RANGE_KM,
        intt_ms: Some(common::INTT_7P),
        beam_angle: common::STD_16_BEAM_ANGLE.to_vec(),
        rx_beam_order: RxBeam::all_at_once(num_beams),
        tx_beam_order: vec![0], // only one pattern
        tx_antenna_pattern: Some(common::easy_widebeam),
        freq_khz: common::COMMON_MODE_FREQ_1,
        align_sequences: true,
        scanbound: Some(common::easy_scanbound(common::INTT_7P, num_beams)),
        wait_for_first_scanbound: false,
        ..Default::default()
    };

    let slice_1 = Slice {
        tx_antenna_pattern: None,
        rx_beam_order: RxBeam::each(&beam_steps),
        tx_beam_order: beam_steps.clone(),
        ..slice_0.clone()
    };

    experiment.add_slice(slice_0, None)?;
    experiment.add_slice(
        slice_1,
        Some(interfacing(&[(0, InterfacingType::Aveperiod)])),
    )?;

    Ok(experiment)
}
