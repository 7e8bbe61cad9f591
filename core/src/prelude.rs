/// Common error type for experiment construction.
#[derive(thiserror::Error, Debug)]
pub enum ExperimentError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid interfacing: {0}")]
    InvalidInterfacing(String),
    #[error("invalid filter: {0}")]
    InvalidFilter(String),
    #[error("invalid antenna pattern: {0}")]
    InvalidAntennaPattern(String),
}

pub type ExperimentResult<T> = Result<T, ExperimentError>;

pub use crate::decimation::{DecimationScheme, DecimationStage};
pub use crate::experiment::{ExperimentPrototype, InterfacingDict, InterfacingType, Slice};
