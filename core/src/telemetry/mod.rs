pub mod log;

pub use self::log::BuildLog;
