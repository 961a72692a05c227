//! DisplayEnumerator service: responsibility and boundaries
//!
//! Responsible ONLY for taking one startup snapshot of the attached displays:
//! per-display geometry and usable area in toolkit coordinates plus the union
//! box in compositor coordinates. Display hot-plug is out of scope - the
//! snapshot lives for the process lifetime. Zero displays is a degenerate
//! topology, not an error (CoordinateMapper falls back to identity).

mod dry_run;
mod r#trait;
mod xrandr;

pub use self::dry_run::DryRunDisplayEnumerator;
pub use self::r#trait::{create_display_enumerator, DisplayEnumerator};
