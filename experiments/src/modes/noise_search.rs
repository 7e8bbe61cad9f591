//! Noise survey across three frequencies. Each frequency runs a normal
//! averaging period, then transmits a single sequence while receiving at a
//! high bandwidth, then listens for a single sequence at the same
//! bandwidth. All slices alternate with slice 0 by averaging period.

use anyhow::Result;
use expcore::decimation::{
    create_firwin_filter_by_attenuation, DecimationScheme, DecimationStage,
};
use expcore::experiment::interfacing;
use expcore::experiment::{ExperimentPrototype, InterfacingDict, InterfacingType, RxBeam, Slice};

use crate::common;
use crate::kwargs::Kwargs;
use crate::site::SiteOptions;

pub const CPID: i32 = 3386;

/// Wide-passband single-stage chain (high output sample rate, beware).
fn wideband_scheme() -> Result<DecimationScheme> {
    let sample_rate = 5.0e6;
    let dm_rates = [15];
    let transition_widths = [100.0e3];
    let cutoffs = [165.0e3];
    let ripple_dbs = [200.0];

    let mut dm_rate_so_far = 1u32;
    let mut stages = Vec::with_capacity(dm_rates.len());
    for stage in 0..dm_rates.len() {
        let rate = sample_rate / dm_rate_so_far as f64;
        let taps = create_firwin_filter_by_attenuation(
            rate,
            transition_widths[stage],
            cutoffs[stage],
            ripple_dbs[stage],
        )?;
        stages.push(DecimationStage::new(stage, rate, dm_rates[stage], taps));
        dm_rate_so_far *= dm_rates[stage];
    }

    Ok(DecimationScheme::new(
        sample_rate,
        sample_rate / dm_rate_so_far as f64,
        stages,
    ))
}

pub fn build(site: &SiteOptions, _kwargs: &Kwargs) -> Result<ExperimentPrototype> {
    let mut experiment = ExperimentPrototype::new(CPID).with_comment(
        "Switches between three frequencies, each of which runs normally, then sends out \
         two sequences while receiving at a high bandwidth. The first sequence transmits, \
         while the second only receives.",
    );

    let beams_to_use = site.beams_to_use();

    let slice_template = Slice {
        pulse_sequence: common::SEQUENCE_7P.to_vec(),
        tau_spacing_us: common::TAU_SPACING_7P,
        pulse_len_us: common::PULSE_LEN_45KM,
        num_ranges: common::STD_NUM_RANGES,
        first_range_km: common::STD_FIRST_RANGE_KM,
        intt_ms: Some(3500.0),
        beam_angle: common::STD_16_BEAM_ANGLE.to_vec(),
        rx_beam_order: RxBeam::each(&beams_to_use),
        tx_beam_order: beams_to_use.to_vec(),
        acf: true,
        xcf: true,
        acfint: true,
        ..Default::default()
    };

    // None for the first slice; all later slices alternate with slice 0
    let mut interfacing_dict: Option<InterfacingDict> = None;

    let freqs = [common::COMMON_MODE_FREQ_1, 12350, 12800];
    for freq in freqs {
        let default_slice = Slice {
            freq_khz: freq,
            ..slice_template.clone()
        };
        experiment.add_slice(default_slice.clone(), interfacing_dict.clone())?;
        interfacing_dict = Some(interfacing(&[(0, InterfacingType::Aveperiod)]));

        let high_bandwidth_tx_slice = Slice {
            decimation_scheme: Some(wideband_scheme()?),
            intt_ms: None,
            intn: Some(1), // only run for one sequence
            acf: false,
            xcf: false,
            acfint: false,
            ..default_slice.clone()
        };
        experiment.add_slice(high_bandwidth_tx_slice.clone(), interfacing_dict.clone())?;

        let high_bandwidth_rx_slice = Slice {
            tx_beam_order: Vec::new(),
            rxonly: true,
            ..high_bandwidth_tx_slice
        };
        experiment.add_slice(high_bandwidth_rx_slice, interfacing_dict.clone())?;
    }

    Ok(experiment)
}
