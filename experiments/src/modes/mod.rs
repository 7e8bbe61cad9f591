//! One module per experiment. Each exposes a `build` function assembling
//! slices from the shared constants and registering them with explicit
//! interfacing.

pub mod eeaao;
pub mod epopsound;
pub mod full_fov;
pub mod full_fov_60deg;
pub mod full_fov_normalscan_comp;
pub mod ib_collab;
pub mod interleavesound;
pub mod listening_normalscan;
pub mod multifreq_tuning;
pub mod noise_search;
pub mod normalscan_single_beam;
pub mod power_meter_mode;
pub mod pulse_codes_test;
pub mod two_multifsound;
pub mod widebeam_2tx;
