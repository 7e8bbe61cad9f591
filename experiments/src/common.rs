//! Operating constants shared by every experiment: standard pulse
//! sequences, beam tables, common frequencies, and the wide-beam transmit
//! helper.

use expcore::prelude::{ExperimentError, ExperimentResult};
use ndarray::Array2;
use num_complex::Complex32;

/// Standard 7-pulse sequence, in multiples of the tau spacing.
pub const SEQUENCE_7P: [u32; 7] = [0, 9, 12, 20, 22, 26, 27];
/// Standard 8-pulse sequence.
pub const SEQUENCE_8P: [u32; 8] = [0, 14, 22, 24, 27, 31, 42, 43];

/// Multi-pulse increments, in microseconds.
pub const TAU_SPACING_7P: u32 = 2400;
pub const TAU_SPACING_8P: u32 = 1500;

/// Pulse lengths matching 45 km and 15 km range separation, in microseconds.
pub const PULSE_LEN_45KM: u32 = 300;
pub const PULSE_LEN_15KM: u32 = 100;

pub const STD_NUM_RANGES: u32 = 75;
pub const POLARDARN_NUM_RANGES: u32 = 100;
pub const STD_FIRST_RANGE_KM: f64 = 180.0;

/// Standard averaging-period durations, in milliseconds.
pub const INTT_7P: f64 = 3700.0;
pub const INTT_8P: f64 = 3700.0;

/// Common operating frequencies, in kHz.
pub const COMMON_MODE_FREQ_1: u32 = 10500;
pub const COMMON_MODE_FREQ_2: u32 = 13000;

/// Frequencies cycled through by the sounding modes, in kHz.
pub const SOUNDING_FREQS: [u32; 3] = [10400, 11100, 12300];

/// Sixteen standard beam directions, degrees off boresight, 3.24 deg apart.
pub const STD_16_BEAM_ANGLE: [f64; 16] = [
    -24.3, -21.06, -17.82, -14.58, -11.34, -8.1, -4.86, -1.62, 1.62, 4.86, 8.1, 11.34, 14.58,
    17.82, 21.06, 24.3,
];

pub const STD_16_FORWARD_BEAM_ORDER: [usize; 16] =
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];
pub const STD_16_REVERSE_BEAM_ORDER: [usize; 16] =
    [15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0];

/// Lags used by the 8-pulse sequence; not all pulse pairs contribute.
pub const STD_8P_LAG_TABLE: [(u32, u32); 24] = [
    (0, 0),
    (42, 43),
    (22, 24),
    (24, 27),
    (27, 31),
    (22, 27),
    (24, 31),
    (14, 22),
    (22, 31),
    (14, 24),
    (31, 42),
    (31, 43),
    (14, 27),
    (0, 14),
    (27, 42),
    (27, 43),
    (14, 31),
    (24, 42),
    (24, 43),
    (22, 42),
    (22, 43),
    (0, 22),
    (0, 24),
    (43, 43),
];

/// Scan boundary with one step per beam, spaced at `intt_ms` rounded up to
/// the next tenth of a second.
pub fn easy_scanbound(intt_ms: f64, num_beams: usize) -> Vec<f64> {
    let spacing = (intt_ms / 100.0).ceil() / 10.0;
    (0..num_beams).map(|i| i as f64 * spacing).collect()
}

/// Cached wide-beam phase progressions (degrees) for the full 16-antenna
/// main array at 15.24 m spacing. Derived offline from the array geometry;
/// each row is symmetric about the array center.
const WIDEBEAM_PHASES_16: [(u32, [f64; 16]); 8] = [
    (
        10400,
        [
            0.0, 31.73, 61.92, 131.84, 230.71, 286.17, 297.92, 311.86, 311.86, 297.92, 286.17,
            230.71, 131.84, 61.92, 31.73, 0.0,
        ],
    ),
    (
        10500,
        [
            0.0, 31.95, 62.41, 132.49, 230.54, 286.71, 298.47, 311.37, 311.37, 298.47, 286.71,
            230.54, 132.49, 62.41, 31.95, 0.0,
        ],
    ),
    (
        10600,
        [
            0.0, 32.21, 62.88, 134.11, 230.53, 287.22, 298.31, 310.75, 310.75, 298.31, 287.22,
            230.53, 134.11, 62.88, 32.21, 0.0,
        ],
    ),
    (
        10700,
        [
            0.0, 32.15, 62.91, 135.13, 230.55, 287.46, 298.07, 310.30, 310.30, 298.07, 287.46,
            230.55, 135.13, 62.91, 32.15, 0.0,
        ],
    ),
    (
        10800,
        [
            0.0, 31.87, 62.53, 135.57, 230.29, 287.55, 298.03, 309.79, 309.79, 298.03, 287.55,
            230.29, 135.57, 62.53, 31.87, 0.0,
        ],
    ),
    (
        10900,
        [
            0.0, 31.88, 62.51, 136.28, 230.25, 288.00, 298.28, 309.13, 309.13, 298.28, 288.00,
            230.25, 136.28, 62.51, 31.88, 0.0,
        ],
    ),
    (
        12200,
        [
            0.0, 68.91, 120.77, 212.48, 273.89, 322.99, 349.05, 314.29, 314.29, 349.05, 322.99,
            273.89, 212.48, 120.77, 68.91, 0.0,
        ],
    ),
    (
        13000,
        [
            0.0, 63.41, 120.12, 206.35, 279.86, 327.51, 366.23, 322.67, 322.67, 366.23, 327.51,
            279.86, 206.35, 120.12, 63.41, 0.0,
        ],
    ),
];

/// Cached phase progressions for 8-antenna half-array transmission.
const WIDEBEAM_PHASES_8: [(u32, [f64; 8]); 3] = [
    (
        10500,
        [0.0, 23.95, 76.81, 124.40, 124.40, 76.81, 23.95, 0.0],
    ),
    (
        12000,
        [0.0, 27.64, 86.63, 140.71, 140.71, 86.63, 27.64, 0.0],
    ),
    (
        13000,
        [0.0, 30.21, 93.88, 152.04, 152.04, 93.88, 30.21, 0.0],
    ),
];

/// Wide-beam transmit pattern illuminating the full field of view, from the
/// cached per-frequency phase tables. Supports the full 16-antenna array or
/// an 8-antenna half at 15.24 m spacing; anything else is rejected.
pub fn easy_widebeam(
    freq_khz: f64,
    tx_antennas: &[usize],
    antenna_spacing_m: f64,
) -> ExperimentResult<Array2<Complex32>> {
    if (antenna_spacing_m - 15.24).abs() > 1.0e-6 {
        return Err(ExperimentError::InvalidAntennaPattern(format!(
            "antenna spacing must be 15.24 m, got {}",
            antenna_spacing_m
        )));
    }
    let freq = freq_khz.round() as u32;
    let phases: Vec<f64> = match tx_antennas.len() {
        16 => lookup_phases(&WIDEBEAM_PHASES_16, freq)?,
        8 => lookup_phases(&WIDEBEAM_PHASES_8, freq)?,
        other => {
            return Err(ExperimentError::InvalidAntennaPattern(format!(
                "wide-beam transmission needs 16 antennas or an 8-antenna half, got {}",
                other
            )))
        }
    };

    let mut pattern = Array2::<Complex32>::zeros((1, 16));
    for (&antenna, &degrees) in tx_antennas.iter().zip(phases.iter()) {
        if antenna >= 16 {
            return Err(ExperimentError::InvalidAntennaPattern(format!(
                "tx antenna {} outside the 16-antenna main array",
                antenna
            )));
        }
        pattern[[0, antenna]] = Complex32::from_polar(0.999999, (degrees as f32).to_radians());
    }
    Ok(pattern)
}

fn lookup_phases<const N: usize>(
    table: &[(u32, [f64; N])],
    freq_khz: u32,
) -> ExperimentResult<Vec<f64>> {
    table
        .iter()
        .find(|(freq, _)| *freq == freq_khz)
        .map(|(_, phases)| phases.to_vec())
        .ok_or_else(|| {
            ExperimentError::InvalidAntennaPattern(format!(
                "no cached wide-beam phases for {} kHz",
                freq_khz
            ))
        })
}
