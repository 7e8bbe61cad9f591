//! Twofsound transmitting its two frequencies concurrently within each
//! sequence instead of alternating between scans.

use anyhow::Result;
use expcore::experiment::interfacing;
use expcore::experiment::{ExperimentPrototype, InterfacingType, RxBeam, Slice};

use crate::common;
use crate::kwargs::Kwargs;
use crate::site::SiteOptions;

pub const CPID: i32 = 3570;

pub fn build(site: &SiteOptions, _kwargs: &Kwargs) -> Result<ExperimentPrototype> {
    let beams_to_use = site.beams_to_use();
    let num_ranges = site.num_ranges();

    let freqs = [common::COMMON_MODE_FREQ_1, common::COMMON_MODE_FREQ_2];
    let center_freq = (freqs.iter().sum::<u32>() / freqs.len() as u32) as f64;

    let slice_1 = Slice {
        pulse_sequence: common::SEQUENCE_7P.to_vec(),
        tau_spacing_us: common::TAU_SPACING_7P,
        pulse_len_us: common::PULSE_LEN_45KM,
        num_ranges,
        first_range_km: common::STD_FIRST_RANGE_KM,
        intt_ms: Some(common::INTT_7P),
        beam_angle: common::STD_16_BEAM_ANGLE.to_vec(),
        rx_beam_order: RxBeam::each(&beams_to_use),
        tx_beam_order: beams_to_use.to_vec(),
        freq_khz: freqs[0],
        txctrfreq_khz: Some(center_freq),
        rxctrfreq_khz: Some(center_freq),
        acf: true,
        xcf: true,
        acfint: true,
        ..Default::default()
    };

    let slice_2 = Slice {
        freq_khz: freqs[1],
        ..slice_1.clone()
    };

    let mut experiment =
        ExperimentPrototype::new(CPID).with_comment("Twofsound simultaneous in-sequence");
    experiment.add_slice(slice_1, None)?;
    experiment.add_slice(
        slice_2,
        Some(interfacing(&[(0, InterfacingType::Concurrent)])),
    )?;

    Ok(experiment)
}
