//! GeometryProbe service: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for answering one
//! question per poll: "what is the on-screen rectangle of the currently
//! focused window, if any?". Filtering belongs here too: windows below the
//! minimum size, on non-standard layers or fully transparent (where the host
//! tool can tell) are reported as "none". The probe is infallible at this
//! layer - any failure is "none", never an error. Debouncing and all surface
//! placement decisions belong to FocusTracker / OverlayCompositor.

mod dry_run;
mod sway;
mod r#trait;
mod xdotool;

pub use self::dry_run::DryRunProbe;
pub use self::r#trait::{create_geometry_probe, GeometryProbe};
