//! Experiment-prototype support for the phased-array radar experiment suite.
//!
//! The modules cover the registration surface the experiment definitions
//! build against: the slice data model, interfacing declarations, the
//! experiment container, and decimation filter-chain construction. Sequence
//! building, timing, and full structural validation belong to the radar
//! control program and are not implemented here.

pub mod decimation;
pub mod experiment;
pub mod math;
pub mod prelude;
pub mod telemetry;

pub use prelude::{ExperimentError, ExperimentResult};
