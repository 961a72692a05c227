pub mod display_enumerator;
pub mod focus_tracker;
pub mod geometry_probe;
pub mod overlay_compositor;
pub mod surface;

pub use display_enumerator::create_display_enumerator;
pub use focus_tracker::FocusTracker;
pub use geometry_probe::create_geometry_probe;
pub use overlay_compositor::OverlayCompositor;
pub use surface::create_surface_factory;
