//! Wide-beam sounding using transmitters 7 and 8 only, zero phase across
//! the pair, receiving on all antennas. No scan boundary beyond the fixed
//! cadence and no correlation products; antennas_iq data only.

use anyhow::Result;
use expcore::decimation::create_default_scheme;
use expcore::experiment::{ExperimentPrototype, RxBeam, Slice};
use log::info;

use crate::common;
use crate::kwargs::Kwargs;
use crate::site::SiteOptions;

pub const CPID: i32 = 3711;

pub fn build(site: &SiteOptions, kwargs: &Kwargs) -> Result<ExperimentPrototype> {
    let mut experiment = ExperimentPrototype::new(CPID);

    let freq = kwargs
        .get_u32("freq")?
        .unwrap_or(common::COMMON_MODE_FREQ_1);
    info!("Frequency set to {}", freq);

    let scanbound = (0..common::STD_16_BEAM_ANGLE.len())
        .map(|i| i as f64 * common::INTT_7P * 1.0e-3)
        .collect();

    experiment.add_slice(
        Slice {
            pulse_sequence: common::SEQUENCE_7P.to_vec(),
            tau_spacing_us: common::TAU_SPACING_7P,
            pulse_len_us: common::PULSE_LEN_45KM,
            num_ranges: site.num_ranges(),
            first_range_km: common::STD_FIRST_RANGE_KM,
            intt_ms: Some(common::INTT_7P),
            beam_angle: vec![0.0],
            rx_beam_order: RxBeam::each(&[0]),
            tx_beam_order: vec![0],
            freq_khz: freq,
            tx_antennas: Some(vec![7, 8]), // two transmitters from the middle of the array
            align_sequences: true,
            scanbound: Some(scanbound),
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
    fn uses_two_mid_array_transmitters() {
        let experiment = build(&SiteOptions::default(), &Kwargs::new()).unwrap();
        let slice = &experiment.slices()[0];
        assert_eq!(slice.tx_antennas.as_deref(), Some(&[7, 8][..]));
        assert!(slice.align_sequences);
        assert_eq!(slice.scanbound.as_ref().unwrap().len(), 16);
        assert!(!slice.acf);
    }

    #[test]
    fn polar_site_gets_more_range_gates() {
        let site = SiteOptions {
            site_id: "cly".to_string(),
            ..Default::default()
        };
        let experiment = build(&site, &Kwargs::new()).unwrap();
        assert_eq!(
            experiment.slices()[0].num_ranges,
            common::POLARDARN_NUM_RANGES
        );
    }
}
