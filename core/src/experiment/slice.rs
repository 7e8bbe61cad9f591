use ndarray::Array2;
use num_complex::Complex32;
use serde_json::json;

use crate::decimation::DecimationScheme;
use crate::prelude::ExperimentResult;

/// Transmit-phasing callable: one row of complex phasors across the main
/// array for the given frequency and transmit-antenna subset.
pub type TxAntennaPattern = fn(
    freq_khz: f64,
    tx_antennas: &[usize],
    antenna_spacing_m: f64,
) -> ExperimentResult<Array2<Complex32>>;

/// Per-pulse phase encoding, evaluated once per sequence by the control
/// program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseEncoding {
    /// Phase offsets in degrees, one per pulse.
    Degrees(fn(beam_iter: usize, sequence_num: usize, num_pulses: usize) -> Vec<f64>),
    /// Intra-pulse chip codes, one row per pulse.
    Codes(fn(beam_iter: usize, sequence_num: usize, num_pulses: usize) -> Array2<Complex32>),
}

/// One receive-beam step: a single direction, or a simultaneous (imaging)
/// set of directions formed in post-processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RxBeam {
    Single(usize),
    Simultaneous(Vec<usize>),
}

impl RxBeam {
    /// Beam order stepping through each index in turn.
    pub fn each(indices: &[usize]) -> Vec<RxBeam> {
        indices.iter().map(|&i| RxBeam::Single(i)).collect()
    }

    /// One entry forming beams 0..count all at once.
    pub fn all_at_once(count: usize) -> Vec<RxBeam> {
        vec![RxBeam::Simultaneous((0..count).collect())]
    }
}

/// One independently configured transmit/receive operation. Field semantics
/// follow the control program's slice vocabulary; structural validation
/// (beam monotonicity, pulse length vs. output rate, frequency within the
/// center-frequency band) is performed there, not here.
#[derive(Debug, Clone)]
pub struct Slice {
    /// Pulse positions as multiples of `tau_spacing_us`.
    pub pulse_sequence: Vec<u32>,
    pub tau_spacing_us: u32,
    pub pulse_len_us: u32,
    pub num_ranges: u32,
    pub first_range_km: f64,
    /// Averaging-period duration in ms; exclusive with `intn`.
    pub intt_ms: Option<f64>,
    /// Fixed number of sequences per averaging period.
    pub intn: Option<u32>,
    /// Beam directions in degrees off boresight, strictly increasing.
    pub beam_angle: Vec<f64>,
    pub rx_beam_order: Vec<RxBeam>,
    /// Transmit beam/pattern index sequence; empty for receive-only slices.
    pub tx_beam_order: Vec<usize>,
    pub freq_khz: u32,
    pub txctrfreq_khz: Option<f64>,
    pub rxctrfreq_khz: Option<f64>,
    pub acf: bool,
    pub xcf: bool,
    pub acfint: bool,
    pub rxonly: bool,
    /// Transmit-antenna subset; `None` uses the whole main array.
    pub tx_antennas: Option<Vec<usize>>,
    pub tx_antenna_pattern: Option<TxAntennaPattern>,
    pub pulse_phase_offset: Option<PhaseEncoding>,
    pub decimation_scheme: Option<DecimationScheme>,
    /// Scan-boundary alignment times in seconds.
    pub scanbound: Option<Vec<f64>>,
    pub wait_for_first_scanbound: bool,
    /// Align the start of each sequence to tenths of a second.
    pub align_sequences: bool,
    /// Explicit lag table for sequences that do not use all pulse pairs.
    pub lag_table: Option<Vec<(u32, u32)>>,
    pub comment: String,
}

impl Default for Slice {
    fn default() -> Self {
        Self {
            pulse_sequence: Vec::new(),
            tau_spacing_us: 0,
            pulse_len_us: 0,
            num_ranges: 0,
            first_range_km: 0.0,
            intt_ms: None,
            intn: None,
            beam_angle: Vec::new(),
            rx_beam_order: Vec::new(),
            tx_beam_order: Vec::new(),
            freq_khz: 0,
            txctrfreq_khz: None,
            rxctrfreq_khz: None,
            acf: false,
            xcf: false,
            acfint: false,
            rxonly: false,
            tx_antennas: None,
            tx_antenna_pattern: None,
            pulse_phase_offset: None,
            decimation_scheme: None,
            scanbound: None,
            wait_for_first_scanbound: true,
            align_sequences: false,
            lag_table: None,
            comment: String::new(),
        }
    }
}

impl Slice {
    /// The fields a configuration printout reports for this slice.
    pub fn summary(&self) -> serde_json::Value {
        json!({
            "freq_khz": self.freq_khz,
            "num_pulses": self.pulse_sequence.len(),
            "tau_spacing_us": self.tau_spacing_us,
            "pulse_len_us": self.pulse_len_us,
            "num_ranges": self.num_ranges,
            "first_range_km": self.first_range_km,
            "intt_ms": self.intt_ms,
            "intn": self.intn,
            "num_beam_steps": self.rx_beam_order.len(),
            "rxonly": self.rxonly,
            "acf": self.acf,
            "xcf": self.xcf,
            "acfint": self.acfint,
            "custom_decimation": self.decimation_scheme.is_some(),
            "comment": self.comment,
        })
    }
}
