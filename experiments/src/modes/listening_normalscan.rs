//! Normalscan with an added clear-frequency listening period: the standard
//! sweep plus a receive-only slice that collects one wideband sequence per
//! averaging period.

use anyhow::Result;
use expcore::decimation::{
    create_firwin_filter_by_attenuation, DecimationScheme, DecimationStage,
};
use expcore::experiment::interfacing;
use expcore::experiment::{ExperimentPrototype, InterfacingType, RxBeam, Slice};
use log::info;

use crate::common;
use crate::kwargs::Kwargs;
use crate::site::SiteOptions;

pub const CPID: i32 = 3385;

/// Wide-passband chain for listening only (high output sample rate,
/// beware).
fn clrfrq_scheme() -> Result<DecimationScheme> {
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

pub fn build(site: &SiteOptions, kwargs: &Kwargs) -> Result<ExperimentPrototype> {
    let mut experiment = ExperimentPrototype::new(CPID);

    let beams_to_use = site.beams_to_use();

    let freq = kwargs
        .get_u32("freq")?
        .unwrap_or(common::COMMON_MODE_FREQ_1);
    info!("Frequency set to {}", freq);

    let slice_0 = Slice {
        pulse_sequence: common::SEQUENCE_7P.to_vec(),
        tau_spacing_us: common::TAU_SPACING_7P,
        pulse_len_us: common::PULSE_LEN_45KM,
        num_ranges: site.num_ranges(),
        first_range_km: common::STD_FIRST_RANGE_KM,
        intt_ms: Some(common::INTT_7P),
        beam_angle: common::STD_16_BEAM_ANGLE.to_vec(),
        rx_beam_order: RxBeam::each(&beams_to_use),
        tx_beam_order: beams_to_use.to_vec(),
        freq_khz: freq,
        acf: true,
        xcf: true,
        acfint: true,
        wait_for_first_scanbound: false,
        ..Default::default()
    };

    // does not transmit, and only collects one sequence
    let slice_1 = Slice {
        tx_beam_order: Vec::new(),
        intt_ms: None,
        intn: Some(1),
        acf: false,
        xcf: false,
        acfint: false,
        decimation_scheme: Some(clrfrq_scheme()?),
        rxonly: true,
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
    fn listening_slice_is_rxonly_for_one_sequence() {
        let experiment = build(&SiteOptions::default(), &Kwargs::new()).unwrap();
        assert_eq!(experiment.num_slices(), 2);
        let listener = &experiment.slices()[1];
        assert!(listener.rxonly);
        assert!(listener.tx_beam_order.is_empty());
        assert_eq!(listener.intn, Some(1));
        assert!(listener.intt_ms.is_none());
        assert!(!listener.acf);
        assert_eq!(
            experiment.interfacing()[&(0, 1)],
            InterfacingType::Aveperiod
        );
    }

    #[test]
    fn both_slices_share_the_operating_frequency() {
        let kwargs = Kwargs::of(&[("freq", "11800")]);
        let experiment = build(&SiteOptions::default(), &kwargs).unwrap();
        assert_eq!(experiment.slices()[0].freq_khz, 11800);
        assert_eq!(experiment.slices()[1].freq_khz, 11800);
        let scheme = experiment.slices()[1].decimation_scheme.as_ref().unwrap();
        assert_eq!(scheme.rate_reduction(), 15);
    }
}
