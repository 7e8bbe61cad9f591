pub mod interfacing;
pub mod prototype;
pub mod slice;

pub use interfacing::{interfacing, InterfacingDict, InterfacingType};
pub use prototype::ExperimentPrototype;
pub use slice::{PhaseEncoding, RxBeam, Slice, TxAntennaPattern};
