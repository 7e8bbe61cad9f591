pub mod firwin;
pub mod scheme;

pub use firwin::{create_firwin_filter_by_attenuation, kaiser_params};
pub use scheme::{create_default_scheme, DecimationScheme, DecimationStage};
