pub mod focus;

pub use focus::{FocusEvent, FocusSample, FocusTransition};
