//! Transmitter test mode for use with an in-line power meter: one pulse,
//! one range gate, boresight only, no correlation products.

use anyhow::Result;
use expcore::decimation::create_default_scheme;
use expcore::experiment::{ExperimentPrototype, RxBeam, Slice};
use log::info;

use crate::common;
use crate::kwargs::Kwargs;
use crate::site::SiteOptions;

pub const CPID: i32 = 3580;

pub fn build(_site: &SiteOptions, kwargs: &Kwargs) -> Result<ExperimentPrototype> {
    let mut experiment = ExperimentPrototype::new(CPID);

    let freq = kwargs
        .get_u32("freq")?
        .unwrap_or(common::COMMON_MODE_FREQ_1);
    info!("Frequency set to {}", freq);

    experiment.add_slice(
        Slice {
            pulse_sequence: vec![0],
            tau_spacing_us: 300,
            pulse_len_us: common::PULSE_LEN_45KM,
            num_ranges: 1,
            first_range_km: 0.0,
            intt_ms: Some(4000.0),
            beam_angle: vec![0.0],
            rx_beam_order: RxBeam::each(&[0]),
            tx_beam_order: vec![0],
            freq_khz: freq,
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
    fn builds_single_gate_slice_without_products() {
        let experiment = build(&SiteOptions::default(), &Kwargs::new()).unwrap();
        assert_eq!(experiment.num_slices(), 1);
        let slice = &experiment.slices()[0];
        assert_eq!(slice.pulse_sequence, vec![0]);
        assert_eq!(slice.num_ranges, 1);
        assert!(!slice.acf && !slice.xcf && !slice.acfint);
        assert!(slice.decimation_scheme.is_some());
    }

    #[test]
    fn frequency_override_is_applied() {
        let kwargs = Kwargs::of(&[("freq", "12500")]);
        let experiment = build(&SiteOptions::default(), &kwargs).unwrap();
        assert_eq!(experiment.slices()[0].freq_khz, 12500);
    }
}
