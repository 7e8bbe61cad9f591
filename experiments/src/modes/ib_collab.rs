//! Collaboration mode with an e-region scatter receiver: 15 km range gates
//! on five interleaved beams with 2 s integrations, on a receive chain
//! built for the shorter gates.

use anyhow::Result;
use expcore::decimation::{
    create_firwin_filter_by_attenuation, DecimationScheme, DecimationStage,
};
use expcore::experiment::{ExperimentPrototype, RxBeam, Slice};
use log::info;

use crate::common;
use crate::kwargs::Kwargs;
use crate::site::SiteOptions;

pub const CPID: i32 = 3700;

/// Receive chain for 15 km range gates, built off the default 45 km chain
/// with a shallower third stage and a 10 kHz output rate.
fn fifteen_km_scheme() -> Result<DecimationScheme> {
    let rates = [5.0e6, 500.0e3, 100.0e3, 50.0e3];
    let dm_rates = [10, 5, 2, 5];
    let transition_widths = [150.0e3, 40.0e3, 15.0e3, 1.0e3];
    let cutoffs = [20.0e3, 10.0e3, 10.0e3, 5.0e3];
    let ripple_dbs = [150.0, 80.0, 35.0, 8.0];
    let scaling_factors = [10.0, 100.0, 100.0, 100.0];

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

pub fn build(_site: &SiteOptions, kwargs: &Kwargs) -> Result<ExperimentPrototype> {
    let freq = match kwargs.get_u32("freq")? {
        Some(freq) => {
            info!("Using scheduled frequency: {} kHz", freq);
            freq
        }
        None => {
            let freq = 10800;
            info!("Frequency not found: using default frequency {} kHz", freq);
            freq
        }
    };

    let decimation_scheme = fifteen_km_scheme()?;

    let beams_arr: Vec<usize> = [0, 2, 4, 6, 8]
        .iter()
        .copied()
        .cycle()
        .take(30)
        .collect();
    let scanbound = (0..beams_arr.len()).map(|i| i as f64 * 2.0).collect();

    let mut experiment = ExperimentPrototype::new(CPID)
        .with_output_rx_rate(decimation_scheme.output_rate_hz)
        .with_comment("E-region collab, 5 beam, 2 s integration, 15 km gates");

    experiment.add_slice(
        Slice {
            pulse_sequence: common::SEQUENCE_7P.to_vec(),
            tau_spacing_us: common::TAU_SPACING_7P,
            pulse_len_us: common::PULSE_LEN_15KM,
            // only out to 1500 km with 15 km range gates
            num_ranges: 100,
            first_range_km: 90.0, // closer than the standard first range
            intt_ms: Some(1900.0),
            beam_angle: common::STD_16_BEAM_ANGLE.to_vec(),
            rx_beam_order: RxBeam::each(&beams_arr),
            tx_beam_order: beams_arr.clone(),
            scanbound: Some(scanbound),
            freq_khz: freq,
            txctrfreq_khz: Some((freq + 100) as f64),
            rxctrfreq_khz: Some((freq + 100) as f64),
            acf: true,
            xcf: true,
            acfint: true,
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
    fn scheme_reaches_ten_khz_output() {
        let scheme = fifteen_km_scheme().unwrap();
        assert_eq!(scheme.rate_reduction(), 500);
        assert_eq!(scheme.output_rate_hz, 10.0e3);
        let reconstructed = scheme.output_rate_hz * scheme.rate_reduction() as f64;
        assert!((reconstructed - scheme.input_rate_hz).abs() < 1.0e-6);
    }

    #[test]
    fn experiment_output_rate_follows_the_scheme() {
        let experiment = build(&SiteOptions::default(), &Kwargs::new()).unwrap();
        assert_eq!(experiment.output_rx_rate_hz(), 10.0e3);
        let slice = &experiment.slices()[0];
        assert_eq!(slice.pulse_len_us, common::PULSE_LEN_15KM);
        assert_eq!(slice.num_ranges, 100);
        assert_eq!(slice.first_range_km, 90.0);
        assert_eq!(slice.rx_beam_order.len(), 30);
    }

    #[test]
    fn center_frequency_sits_above_the_operating_frequency() {
        let kwargs = Kwargs::of(&[("freq", "10700")]);
        let experiment = build(&SiteOptions::default(), &kwargs).unwrap();
        let slice = &experiment.slices()[0];
        assert_eq!(slice.freq_khz, 10700);
        assert_eq!(slice.txctrfreq_khz, Some(10800.0));
    }
}
