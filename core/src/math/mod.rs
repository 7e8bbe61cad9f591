pub mod window;

pub use window::{i0, kaiser_window, sinc};
