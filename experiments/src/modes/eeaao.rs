//! Flexible multistatic multifrequency full-FOV mode. Transmit and receive
//! frequencies in kHz are supplied as arguments, e.g.
//! `tx_freqs=10500,12000`. Every TX frequency is also received, and at
//! least one frequency must be given as either TX or RX.

use std::collections::BTreeSet;

use anyhow::{bail, Context, Result};
use expcore::experiment::interfacing;
use expcore::experiment::{ExperimentPrototype, InterfacingType, RxBeam, Slice};
use log::info;

use crate::common;
use crate::kwargs::Kwargs;
use crate::site::SiteOptions;

pub const CPID: i32 = 3777;

fn parse_freqs(raw: &str) -> Result<Vec<u32>> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    let mut freqs = Vec::new();
    for part in raw.split(',') {
        let freq = part
            .trim()
            .parse::<u32>()
            .with_context(|| format!("frequency {:?} is not an integer", part))?;
        freqs.push(freq);
    }
    Ok(freqs)
}

fn has_duplicates(freqs: &[u32]) -> bool {
    let unique: BTreeSet<u32> = freqs.iter().copied().collect();
    unique.len() != freqs.len()
}

pub fn build(site: &SiteOptions, kwargs: &Kwargs) -> Result<ExperimentPrototype> {
    let tx_raw = kwargs.get("tx_freqs").unwrap_or("");
    let rx_raw = kwargs.get("rx_freqs").unwrap_or("");
    let tx_freqs = parse_freqs(tx_raw)?;
    let rx_freqs = parse_freqs(rx_raw)?;

    if has_duplicates(&tx_freqs) {
        bail!("duplicate TX frequencies specified: {}", tx_raw);
    }
    if has_duplicates(&rx_freqs) {
        bail!("duplicate RX frequencies specified: {}", rx_raw);
    }

    let all_freqs: BTreeSet<u32> = tx_freqs.iter().chain(rx_freqs.iter()).copied().collect();
    if all_freqs.is_empty() {
        bail!("no RX or TX frequencies specified");
    }

    // center frequency in the middle of the occupied band
    let min_freq = *all_freqs.iter().next().unwrap();
    let max_freq = *all_freqs.iter().next_back().unwrap();
    let center_freq = (max_freq + min_freq) as f64 / 2.0;

    let comment = format!("TX freqs: {:?}, RX freqs: {:?}", tx_freqs, rx_freqs);
    info!("{}", comment);

    let mut experiment = ExperimentPrototype::new(CPID)
        .with_ctr_freqs(center_freq, center_freq)
        .with_comment(comment);

    let num_beams = common::STD_16_BEAM_ANGLE.len();
    let default_slice = Slice {
        pulse_sequence: common::SEQUENCE_7P.to_vec(),
        tau_spacing_us: common::TAU_SPACING_7P,
        pulse_len_us: common::PULSE_LEN_45KM,
        num_ranges: common::STD_NUM_RANGES,
        first_range_km: common::STD_FIRST_RANGE_KM,
        intt_ms: Some(common::INTT_7P),
        beam_angle: common::STD_16_BEAM_ANGLE.to_vec(),
        rx_beam_order: RxBeam::all_at_once(num_beams),
        // each averaging period starts on a 3.7 s boundary
        scanbound: Some((0..num_beams).map(|i| i as f64 * 3.7).collect()),
        wait_for_first_scanbound: false,
        align_sequences: true,
        ..Default::default()
    };

    let num_antennas = site.main_antenna_count;
    let left_half: Vec<usize> = (0..num_antennas / 2).collect();
    let right_half: Vec<usize> = (num_antennas / 2..num_antennas).collect();
    let all_antennas: Vec<usize> = (0..num_antennas).collect();

    let mut all_slices = Vec::new();
    for (i, &freq) in tx_freqs.iter().enumerate() {
        // 8-antenna wide-beam halves when transmitting on exactly two
        // frequencies, the full array otherwise
        let tx_antennas = if tx_freqs.len() == 2 {
            if i == 0 {
                left_half.clone()
            } else {
                right_half.clone()
            }
        } else {
            all_antennas.clone()
        };
        all_slices.push(Slice {
            freq_khz: freq,
            tx_antenna_pattern: Some(common::easy_widebeam),
            tx_antennas: Some(tx_antennas),
            tx_beam_order: vec![0],
            comment: format!("TX slice with frequency {}", freq),
            ..default_slice.clone()
        });
    }

    for &freq in &rx_freqs {
        if tx_freqs.contains(&freq) {
            continue; // already listening on this frequency
        }
        all_slices.push(Slice {
            freq_khz: freq,
            rxonly: true,
            comment: format!("RX slice with frequency {}", freq),
            ..default_slice.clone()
        });
    }

    let mut remaining = all_slices.into_iter();
    if let Some(first) = remaining.next() {
        experiment.add_slice(first, None)?;
    }
    for slice in remaining {
        experiment.add_slice(
            slice,
            Some(interfacing(&[(0, InterfacingType::Concurrent)])),
        )?;
    }

    Ok(experiment)
}
