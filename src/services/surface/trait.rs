use crate::config::Config;
use crate::error::Result;
use crate::geometry::Rect;
use crate::services::surface::capabilities::{EffectMaterial, OverlayLayer, SurfaceCapabilities};
use std::sync::Arc;
use tracing::warn;

/// Роль поверхности определяет её отрисовку в конкретном бэкенде
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceRole {
    /// Рамка вокруг окна в фокусе
    Border,
    /// Панель размытия/затемнения вне окна в фокусе
    Effect,
}

/// Abstract overlay surface exposed by the host rendering toolkit.
///
/// Frames are given in compositor coordinates (origin bottom-left, Y up).
/// Every method must be safe to call on a hidden or never-shown surface.
/// Calls are synchronous and must stay within one poll tick's budget.
pub trait Surface: Send + Sync {
    fn set_frame(&self, rect: Rect, animated: bool) -> Result<()>;
    fn show(&self) -> Result<()>;
    fn hide(&self) -> Result<()>;
    fn set_opacity(&self, value: f64) -> Result<()>;
    fn close(&self) -> Result<()>;
}

/// Factory for overlay surfaces plus the capability set it can render.
/// Capabilities are advertised once; negotiation happens at startup.
pub trait SurfaceFactory: Send + Sync {
    fn available_materials(&self) -> Vec<EffectMaterial>;
    fn available_layers(&self) -> Vec<OverlayLayer>;
    fn create_surface(
        &self,
        role: SurfaceRole,
        capabilities: SurfaceCapabilities,
    ) -> Result<Arc<dyn Surface>>;
}

/// Factory function to create a surface factory based on the dry_run flag
pub fn create_surface_factory(config: &Config, dry_run: bool) -> Result<Arc<dyn SurfaceFactory>> {
    if !dry_run {
        // Реальный тулкит-бэкенд подключается снаружи через трейты выше;
        // в этой сборке поверхности размещаются "вхолостую" с логированием.
        warn!("Бэкенд отрисовки не собран - поверхности будут только логироваться");
    }

    Ok(Arc::new(super::dry_run::DryRunSurfaceFactory::new(
        config.overlay.highlight_color.clone(),
        dry_run,
    )))
}
