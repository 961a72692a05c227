//! Surface service: responsibility and boundaries
//!
//! This module owns ONLY the abstract overlay-surface seam consumed by
//! OverlayCompositor: the Surface/SurfaceFactory traits, the capability
//! negotiation table resolved once at startup, and the dry-run recording
//! implementation. A real rendering-toolkit backend (Cocoa panel, layer-shell
//! surface, ...) is an external collaborator implementing these traits; no
//! placement decisions are made here - those belong to OverlayCompositor.

pub mod capabilities;
mod dry_run;
mod r#trait;

pub use self::capabilities::{negotiate_capabilities, EffectMaterial, OverlayLayer, SurfaceCapabilities};
pub use self::dry_run::{DryRunSurface, DryRunSurfaceFactory, SurfaceOp, SurfaceState};
pub use self::r#trait::{create_surface_factory, Surface, SurfaceFactory, SurfaceRole};
