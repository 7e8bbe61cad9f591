//! Retuning twofsound variant: four frequencies spanning two widely
//! separated center-frequency pairs, mixing averaging-period and scan
//! alternation so the hardware retunes between the pairs.

use anyhow::Result;
use expcore::experiment::interfacing;
use expcore::experiment::{ExperimentPrototype, InterfacingType, RxBeam, Slice};

use crate::common;
use crate::kwargs::Kwargs;
use crate::site::SiteOptions;

pub const CPID: i32 = 404;

pub fn build(site: &SiteOptions, kwargs: &Kwargs) -> Result<ExperimentPrototype> {
    let beams_to_use = site.beams_to_use();
    let num_ranges = site.num_ranges();

    let tx_freq_1 = kwargs
        .get_u32("freq1")?
        .unwrap_or(common::COMMON_MODE_FREQ_1);
    let tx_freq_2 = kwargs
        .get_u32("freq2")?
        .unwrap_or(common::COMMON_MODE_FREQ_1 - 1900);
    let tx_freq_3 = kwargs
        .get_u32("freq3")?
        .unwrap_or(common::COMMON_MODE_FREQ_2);
    let tx_freq_4 = kwargs
        .get_u32("freq4")?
        .unwrap_or(common::COMMON_MODE_FREQ_2 + 2500);

    let mut freqs = [tx_freq_1, tx_freq_2, tx_freq_3, tx_freq_4];
    freqs.sort_unstable();
    let [freq1, freq2, freq3, freq4] = freqs;

    let center_freq_low = (freq1 + freq2) as f64 / 2.0;
    let center_freq_high = (freq3 + freq4) as f64 / 2.0;

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
        scanbound: Some(common::easy_scanbound(common::INTT_7P, beams_to_use.len())),
        freq_khz: freq1,
        acf: true,
        xcf: true,
        acfint: true,
        txctrfreq_khz: Some(center_freq_low),
        rxctrfreq_khz: Some(center_freq_low),
        ..Default::default()
    };

    let slice_2 = Slice {
        freq_khz: freq2,
        ..slice_1.clone()
    };

    let slice_3 = Slice {
        freq_khz: freq3,
        txctrfreq_khz: Some(center_freq_high),
        rxctrfreq_khz: Some(center_freq_high),
        ..slice_1.clone()
    };

    let slice_4 = Slice {
        freq_khz: freq4,
        ..slice_3.clone()
    };

    let mut experiment = ExperimentPrototype::new(CPID)
        .with_comment("Retuning twofsound spanning two center-frequency pairs");

    experiment.add_slice(slice_1, None)?;
    experiment.add_slice(
        slice_3,
        Some(interfacing(&[(0, InterfacingType::Aveperiod)])),
    )?;
    experiment.add_slice(
        slice_2,
        Some(interfacing(&[
            (0, InterfacingType::Scan),
            (1, InterfacingType::Scan),
        ])),
    )?;
    experiment.add_slice(
        slice_4,
        Some(interfacing(&[
            (0, InterfacingType::Scan),
            (1, InterfacingType::Scan),
            (2, InterfacingType::Aveperiod),
        ])),
    )?;

    Ok(experiment)
}
