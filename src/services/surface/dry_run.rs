use crate::error::{FocusViewError, Result};
use crate::geometry::Rect;
use crate::services::surface::capabilities::{EffectMaterial, OverlayLayer, SurfaceCapabilities};
use crate::services::surface::r#trait::{Surface, SurfaceFactory, SurfaceRole};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Вызов поверхности, записанный для инспекции в тестах
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceOp {
    SetFrame(Rect, bool),
    Show,
    Hide,
    SetOpacity(f64),
    Close,
}

/// Видимое состояние поверхности после всех вызовов
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceState {
    pub frame: Rect,
    pub visible: bool,
    pub opacity: f64,
    pub closed: bool,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            frame: Rect::ZERO,
            visible: false,
            opacity: 1.0,
            closed: false,
        }
    }
}

/// Поверхность-регистратор: ничего не рисует, запоминает состояние и вызовы.
/// Используется в dry-run режиме и в тестах; каждый вызов безопасен на
/// скрытой или ни разу не показанной поверхности.
pub struct DryRunSurface {
    id: u32,
    role: SurfaceRole,
    dry_run: bool,
    state: Mutex<SurfaceState>,
    ops: Mutex<Vec<SurfaceOp>>,
}

impl DryRunSurface {
    fn new(id: u32, role: SurfaceRole, dry_run: bool) -> Self {
        Self {
            id,
            role,
            dry_run,
            state: Mutex::new(SurfaceState::default()),
            ops: Mutex::new(Vec::new()),
        }
    }

    pub fn role(&self) -> SurfaceRole {
        self.role
    }

    pub fn state(&self) -> SurfaceState {
        *self.state.lock()
    }

    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.ops.lock().clone()
    }

    /// Число показов поверхности (для проверок идемпотентности)
    pub fn show_count(&self) -> usize {
        self.ops
            .lock()
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Show))
            .count()
    }

    fn record(&self, op: SurfaceOp) {
        if self.dry_run {
            info!("[DRY RUN] Поверхность #{} ({:?}): {:?}", self.id, self.role, op);
        } else {
            debug!("Поверхность #{} ({:?}): {:?}", self.id, self.role, op);
        }
        self.ops.lock().push(op);
    }

    // Размещение на закрытой поверхности - ошибка вызывающей стороны;
    // hide/close остаются безопасными no-op
    fn ensure_open(&self) -> Result<()> {
        if self.state.lock().closed {
            Err(FocusViewError::Surface(format!(
                "Поверхность #{} уже закрыта",
                self.id
            )))
        } else {
            Ok(())
        }
    }
}

impl Surface for DryRunSurface {
    fn set_frame(&self, rect: Rect, animated: bool) -> Result<()> {
        self.ensure_open()?;
        self.record(SurfaceOp::SetFrame(rect, animated));
        self.state.lock().frame = rect;
        Ok(())
    }

    fn show(&self) -> Result<()> {
        self.ensure_open()?;
        self.record(SurfaceOp::Show);
        self.state.lock().visible = true;
        Ok(())
    }

    fn hide(&self) -> Result<()> {
        self.record(SurfaceOp::Hide);
        self.state.lock().visible = false;
        Ok(())
    }

    fn set_opacity(&self, value: f64) -> Result<()> {
        self.ensure_open()?;
        self.record(SurfaceOp::SetOpacity(value));
        self.state.lock().opacity = value;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.record(SurfaceOp::Close);
        let mut state = self.state.lock();
        state.visible = false;
        state.closed = true;
        Ok(())
    }
}

/// Фабрика поверхностей-регистраторов.
/// Материал не рисуется, поэтому заявляется только терминальное затемнение.
pub struct DryRunSurfaceFactory {
    highlight_color: String,
    dry_run: bool,
    next_id: AtomicU32,
    created: Mutex<Vec<Arc<DryRunSurface>>>,
}

impl DryRunSurfaceFactory {
    pub fn new(highlight_color: String, dry_run: bool) -> Self {
        info!(
            "Инициализация DryRunSurfaceFactory (цвет рамки: {}, dry_run: {})",
            highlight_color, dry_run
        );
        Self {
            highlight_color,
            dry_run,
            next_id: AtomicU32::new(0),
            created: Mutex::new(Vec::new()),
        }
    }

    /// Все созданные поверхности в порядке создания (для тестов)
    pub fn created_surfaces(&self) -> Vec<Arc<DryRunSurface>> {
        self.created.lock().clone()
    }

    #[allow(dead_code)]
    pub fn highlight_color(&self) -> &str {
        &self.highlight_color
    }
}

impl SurfaceFactory for DryRunSurfaceFactory {
    fn available_materials(&self) -> Vec<EffectMaterial> {
        vec![EffectMaterial::Dim]
    }

    fn available_layers(&self) -> Vec<OverlayLayer> {
        vec![OverlayLayer::Floating, OverlayLayer::ScreenSaver]
    }

    fn create_surface(
        &self,
        role: SurfaceRole,
        capabilities: SurfaceCapabilities,
    ) -> Result<Arc<dyn Surface>> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(
            "Создание поверхности #{} ({:?}, материал {:?}, слой {:?})",
            id, role, capabilities.material, capabilities.layer
        );

        let surface = Arc::new(DryRunSurface::new(id, role, self.dry_run));
        self.created.lock().push(surface.clone());
        Ok(surface)
    }
}
