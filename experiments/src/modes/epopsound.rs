//! Conjunction mode for a topside sounder pass: up to four frequencies
//! sounded on a fixed beam with the 8-pulse sequence, each for ten
//! sequences at a time, with an optional 7-pulse marker integration to
//! delimit the cycle.

use anyhow::Result;
use expcore::decimation::create_default_scheme;
use expcore::experiment::interfacing;
use expcore::experiment::{ExperimentPrototype, InterfacingType, RxBeam, Slice};
use log::info;

use crate::common;
use crate::kwargs::Kwargs;
use crate::site::SiteOptions;

pub const CPID: i32 = 3371;

pub fn build(site: &SiteOptions, kwargs: &Kwargs) -> Result<ExperimentPrototype> {
    // freq2..freq4 are only honoured when each lower-numbered one is given
    let freqs = match kwargs.get_u32("freq1")? {
        Some(freq1) => {
            let mut freqs = vec![freq1];
            if let Some(freq2) = kwargs.get_u32("freq2")? {
                freqs.push(freq2);
                if let Some(freq3) = kwargs.get_u32("freq3")? {
                    freqs.push(freq3);
                    if let Some(freq4) = kwargs.get_u32("freq4")? {
                        freqs.push(freq4);
                    }
                }
            }
            freqs
        }
        None => vec![common::COMMON_MODE_FREQ_1],
    };
    let beam = kwargs.get_u32("beam")?.unwrap_or(7) as usize;
    let marker_period = kwargs.get_u32("marker_period")?.unwrap_or(0) as usize;

    info!(
        "Freqs (kHz): {:?}, Beam: {}, Marker Period: {}",
        freqs, beam, marker_period
    );

    let center_freq = (freqs.iter().sum::<u32>() / freqs.len() as u32) as f64;

    let base_slice = Slice {
        pulse_sequence: common::SEQUENCE_8P.to_vec(),
        tau_spacing_us: common::TAU_SPACING_8P,
        pulse_len_us: common::PULSE_LEN_45KM,
        num_ranges: site.num_ranges(),
        first_range_km: common::STD_FIRST_RANGE_KM,
        intn: Some(10),
        beam_angle: common::STD_16_BEAM_ANGLE.to_vec(),
        acf: true,
        xcf: true,
        acfint: true,
        decimation_scheme: Some(create_default_scheme()?),
        ..Default::default()
    };

    let mut slices = Vec::new();
    for (num, &freq) in freqs.iter().enumerate() {
        let beams_to_use = if marker_period > 0 {
            // spread the marker period across the frequencies
            let mut repeats = marker_period / freqs.len();
            if num < marker_period % freqs.len() {
                repeats += 1;
            }
            vec![beam; repeats]
        } else {
            vec![beam]
        };
        slices.push(Slice {
            freq_khz: freq,
            rx_beam_order: RxBeam::each(&beams_to_use),
            tx_beam_order: beams_to_use,
            ..base_slice.clone()
        });
    }

    let mut experiment = ExperimentPrototype::new(CPID)
        .with_ctr_freqs(center_freq, center_freq)
        .with_comment("Topside sounder conjunction mode");

    for (num, slice) in slices.into_iter().enumerate() {
        let dict = if num == 0 {
            None
        } else {
            Some(interfacing(&[(0, InterfacingType::Aveperiod)]))
        };
        experiment.add_slice(slice, dict)?;
    }

    if marker_period > 0 {
        let marker_slice = Slice {
            pulse_sequence: common::SEQUENCE_7P.to_vec(),
            tau_spacing_us: common::TAU_SPACING_7P,
            rx_beam_order: RxBeam::each(&[beam]),
            tx_beam_order: vec![beam],
            freq_khz: freqs[0],
            ..base_slice
        };
        experiment.add_slice(
            marker_slice,
            Some(interfacing(&[(0, InterfacingType::Scan)])),
        )?;
    }

    Ok(experiment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_one_slice_on_beam_seven() {
        let experiment = build(&SiteOptions::default(), &Kwargs::new()).unwrap();
        assert_eq!(experiment.num_slices(), 1);
        let slice = &experiment.slices()[0];
        assert_eq!(slice.tx_beam_order, vec![7]);
        assert_eq!(slice.intn, Some(10));
        assert_eq!(slice.freq_khz, common::COMMON_MODE_FREQ_1);
    }

    #[test]
    fn one_slice_per_frequency_plus_marker() {
        let kwargs = Kwargs::of(&[
            ("freq1", "10200"),
            ("freq2", "11400"),
            ("beam", "3"),
            ("marker_period", "5"),
        ]);
        let experiment = build(&SiteOptions::default(), &kwargs).unwrap();
        // two frequency slices and the marker slice
        assert_eq!(experiment.num_slices(), 3);
        // the marker period splits 5 = 3 + 2 across the two frequencies
        assert_eq!(experiment.slices()[0].tx_beam_order, vec![3, 3, 3]);
        assert_eq!(experiment.slices()[1].tx_beam_order, vec![3, 3]);
        let marker = &experiment.slices()[2];
        assert_eq!(marker.pulse_sequence, common::SEQUENCE_7P.to_vec());
        assert_eq!(marker.freq_khz, 10200);
        assert_eq!(experiment.interfacing()[&(0, 2)], InterfacingType::Scan);
    }

    #[test]
    fn later_frequencies_need_the_earlier_ones() {
        // freq3 without freq2 is ignored
        let kwargs = Kwargs::of(&[("freq1", "10200"), ("freq3", "12000")]);
        let experiment = build(&SiteOptions::default(), &kwargs).unwrap();
        assert_eq!(experiment.num_slices(), 1);
    }

    #[test]
    fn center_frequency_is_the_mean_of_the_freq_list() {
        let kwargs = Kwargs::of(&[("freq1", "10000"), ("freq2", "12000")]);
        let experiment = build(&SiteOptions::default(), &kwargs).unwrap();
        assert_eq!(experiment.txctrfreq_khz(), 11000.0);
        assert_eq!(
            experiment.interfacing()[&(0, 1)],
            InterfacingType::Aveperiod
        );
    }
}
