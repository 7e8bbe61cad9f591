//! Interleaved scan with added sounding-frequency data: a non-sequential
//! sweep on the common frequency, then short sounding integrations on each
//! sounding frequency packed into the end of the scan.

use anyhow::Result;
use expcore::experiment::interfacing;
use expcore::experiment::{ExperimentPrototype, InterfacingType, RxBeam, Slice};

use crate::common;
use crate::kwargs::Kwargs;
use crate::site::SiteOptions;

pub const CPID: i32 = 197;

const FORWARD_BEAMS: [usize; 16] = [0, 4, 8, 12, 2, 6, 10, 14, 1, 5, 9, 13, 3, 7, 11, 15];
const REVERSE_BEAMS: [usize; 16] = [15, 11, 7, 3, 13, 9, 5, 1, 14, 10, 6, 2, 12, 8, 4, 0];
const SOUNDING_BEAMS: [usize; 16] = [0, 2, 4, 6, 8, 10, 12, 14, 1, 3, 5, 7, 9, 11, 13, 15];

pub fn build(site: &SiteOptions, _kwargs: &Kwargs) -> Result<ExperimentPrototype> {
    let beams_to_use = if site.is_forward_radar {
        FORWARD_BEAMS
    } else {
        REVERSE_BEAMS
    };

    let common_scanbound_spacing = 3.0; // seconds
    let common_intt_ms = common_scanbound_spacing * 1.0e3 - 100.0; // leave time for processing

    let mut freq_list = vec![common::COMMON_MODE_FREQ_1];
    freq_list.extend(common::SOUNDING_FREQS);
    let max_freq = *freq_list.iter().max().unwrap();
    let min_freq = *freq_list.iter().min().unwrap();
    let center_freq = ((max_freq + min_freq) / 2) as f64;

    let mut slices = Vec::new();
    slices.push(Slice {
        pulse_sequence: common::SEQUENCE_8P.to_vec(),
        tau_spacing_us: common::TAU_SPACING_8P,
        pulse_len_us: common::PULSE_LEN_45KM,
        num_ranges: common::STD_NUM_RANGES,
        first_range_km: common::STD_FIRST_RANGE_KM,
        intt_ms: Some(common_intt_ms),
        beam_angle: common::STD_16_BEAM_ANGLE.to_vec(),
        rx_beam_order: RxBeam::each(&beams_to_use),
        tx_beam_order: beams_to_use.to_vec(),
        // aligned because the scanbound has one entry per beam
        scanbound: Some(
            (0..beams_to_use.len())
                .map(|i| i as f64 * common_scanbound_spacing)
                .collect(),
        ),
        freq_khz: common::COMMON_MODE_FREQ_1,
        txctrfreq_khz: Some(center_freq),
        rxctrfreq_khz: Some(center_freq),
        acf: true,
        xcf: true,
        acfint: true,
        // not all lags are used by the 8-pulse sequence
        lag_table: Some(common::STD_8P_LAG_TABLE.to_vec()),
        ..Default::default()
    });

    let sounding_scanbound_spacing = 1.5; // seconds
    let sounding_intt_ms = sounding_scanbound_spacing * 1.0e3 - 250.0;
    let sounding_scanbound: Vec<f64> = (0..8)
        .map(|i| 48.0 + i as f64 * sounding_scanbound_spacing)
        .collect();

    for &freq in &common::SOUNDING_FREQS {
        slices.push(Slice {
            intt_ms: Some(sounding_intt_ms),
            rx_beam_order: RxBeam::each(&SOUNDING_BEAMS),
            tx_beam_order: SOUNDING_BEAMS.to_vec(),
            scanbound: Some(sounding_scanbound.clone()),
            freq_khz: freq,
            ..slices[0].clone()
        });
    }

    let mut experiment = ExperimentPrototype::new(CPID)
        .with_comment("Interleaved scan with added sounding-frequency data");

    for (num, slice) in slices.into_iter().enumerate() {
        let dict = match num {
            0 => None,
            1 => Some(interfacing(&[(0, InterfacingType::Scan)])),
            _ => Some(interfacing(&[(1, InterfacingType::Aveperiod)])),
        };
        experiment.add_slice(slice, dict)?;
    }

    Ok(experiment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_sounding_slice_per_sounding_frequency() {
        let experiment = build(&SiteOptions::default(), &Kwargs::new()).unwrap();
        assert_eq!(experiment.num_slices(), 1 + common::SOUNDING_FREQS.len());
        for (slice, freq) in experiment.slices()[1..]
            .iter()
            .zip(common::SOUNDING_FREQS)
        {
            assert_eq!(slice.freq_khz, freq);
            assert_eq!(slice.scanbound.as_ref().unwrap()[0], 48.0);
        }
    }

    #[test]
    fn sounding_slices_alternate_with_the_first_sounder() {
        let experiment = build(&SiteOptions::default(), &Kwargs::new()).unwrap();
        assert_eq!(experiment.interfacing()[&(0, 1)], InterfacingType::Scan);
        for slice_id in 2..experiment.num_slices() {
            assert_eq!(
                experiment.interfacing()[&(1, slice_id)],
                InterfacingType::Aveperiod
            );
        }
    }

    #[test]
    fn center_frequency_covers_scan_and_sounding_bands() {
        let experiment = build(&SiteOptions::default(), &Kwargs::new()).unwrap();
        let mut freq_list = vec![common::COMMON_MODE_FREQ_1];
        freq_list.extend(common::SOUNDING_FREQS);
        let expected =
            ((freq_list.iter().max().unwrap() + freq_list.iter().min().unwrap()) / 2) as f64;
        assert_eq!(experiment.slices()[0].txctrfreq_khz, Some(expected));
        assert!(experiment.slices()[0].lag_table.is_some());
    }
}
