//! Normalscan restricted to one direction: a single slice sounding beam 3
//! on the common frequency with the 7-pulse sequence.

use anyhow::Result;
use expcore::experiment::{ExperimentPrototype, RxBeam, Slice};

use crate::common;
use crate::kwargs::Kwargs;
use crate::site::SiteOptions;

pub const CPID: i32 = 3581;

pub fn build(_site: &SiteOptions, _kwargs: &Kwargs) -> Result<ExperimentPrototype> {
    let mut experiment = ExperimentPrototype::new(CPID);

    experiment.add_slice(
        Slice {
            pulse_sequence: common::SEQUENCE_7P.to_vec(),
            tau_spacing_us: common::TAU_SPACING_7P,
            pulse_len_us: common::PULSE_LEN_45KM,
            num_ranges: common::STD_NUM_RANGES,
            first_range_km: common::STD_FIRST_RANGE_KM,
            intt_ms: Some(common::INTT_7P),
            beam_angle: common::STD_16_BEAM_ANGLE.to_vec(),
            rx_beam_order: RxBeam::each(&[2]), // beam 3
            tx_beam_order: vec![2],
            freq_khz: common::COMMON_MODE_FREQ_1,
            acf: true,
            xcf: true,
            acfint: true,
            ..Default::default()
        },
        None,
    )?;

    Ok(experiment)
}
