use crate::config::Config;
use crate::debug_if_enabled;
use crate::error::Result;
use crate::events::{FocusEvent, FocusTransition};
use crate::geometry::{partition_outside, CoordinateMapper, DisplayInfo, DisplayTopology, Rect};
use crate::services::surface::{
    negotiate_capabilities, Surface, SurfaceCapabilities, SurfaceFactory, SurfaceRole,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info};

/// Поверхности одного дисплея: рамка и фиксированный набор панелей эффекта
struct OverlaySet {
    border: Arc<dyn Surface>,
    effects: [Arc<dyn Surface>; 4],
}

/// Владеющая обёртка над задачей анимации появления рамки.
/// Замена обёртки прерывает предыдущую анимацию: Drop снимает задачу,
/// поэтому анимации замещаются, а не накапливаются.
struct FadeAnimation {
    handle: JoinHandle<()>,
}

impl FadeAnimation {
    const STEPS: u32 = 20;

    fn start(surface: Arc<dyn Surface>, duration: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let step = duration / Self::STEPS;
            for i in 1..=Self::STEPS {
                sleep(step).await;
                let opacity = f64::from(i) / f64::from(Self::STEPS);
                if let Err(e) = surface.set_opacity(opacity) {
                    debug!("Анимация появления прервана: {}", e);
                    break;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for FadeAnimation {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Размещает поверхности оверлея по событиям трекера фокуса.
///
/// На каждый дисплей приходится одна рамка и ровно 4 панели эффекта;
/// области вне окна в фокусе считаются крестовым разбиением в координатах
/// композитора. Повторный вызов с тем же прямоугольником сходится к тому же
/// видимому состоянию.
pub struct OverlayCompositor {
    config: Arc<Config>,
    topology: DisplayTopology,
    mapper: CoordinateMapper,
    overlays: Vec<OverlaySet>,
    blur_enabled: AtomicBool,
    fade: Mutex<Option<FadeAnimation>>,
}

impl OverlayCompositor {
    pub fn new(
        config: Arc<Config>,
        topology: DisplayTopology,
        factory: &dyn SurfaceFactory,
    ) -> Result<Self> {
        let capabilities = negotiate_capabilities(factory);
        info!(
            "Инициализация OverlayCompositor: дисплеев {}, материал {:?}, слой {:?}",
            topology.displays.len(),
            capabilities.material,
            capabilities.layer
        );

        let mut overlays = Vec::with_capacity(topology.displays.len());
        for _ in &topology.displays {
            overlays.push(Self::create_overlay_set(factory, capabilities)?);
        }

        let mapper = CoordinateMapper::from_topology(&topology);
        let blur_enabled = AtomicBool::new(config.overlay.blur_enabled);

        Ok(Self {
            config,
            topology,
            mapper,
            overlays,
            blur_enabled,
            fade: Mutex::new(None),
        })
    }

    fn create_overlay_set(
        factory: &dyn SurfaceFactory,
        capabilities: SurfaceCapabilities,
    ) -> Result<OverlaySet> {
        Ok(OverlaySet {
            border: factory.create_surface(SurfaceRole::Border, capabilities)?,
            effects: [
                factory.create_surface(SurfaceRole::Effect, capabilities)?,
                factory.create_surface(SurfaceRole::Effect, capabilities)?,
                factory.create_surface(SurfaceRole::Effect, capabilities)?,
                factory.create_surface(SurfaceRole::Effect, capabilities)?,
            ],
        })
    }

    /// Обработка события трекера фокуса
    pub fn handle_focus_event(&self, event: FocusEvent) {
        debug_if_enabled!("Обработка события фокуса: {}", event);

        match event.transition {
            FocusTransition::Cleared => self.on_focus_cleared(),
            FocusTransition::Settled(rect) => self.on_focus_settled(rect),
        }
    }

    /// Немедленно скрыть все поверхности на всех дисплеях (без анимации),
    /// чтобы не было артефактов при быстрых перемещениях окна
    pub fn on_focus_cleared(&self) {
        // Незавершённая анимация появления снимается вместе с обёрткой
        self.fade.lock().take();

        for set in &self.overlays {
            Self::call_surface("hide border", set.border.hide());
            for effect in &set.effects {
                Self::call_surface("hide effect", effect.hide());
            }
        }
    }

    /// Разместить рамку и панели эффекта для стабилизировавшегося
    /// прямоугольника фокуса
    pub fn on_focus_settled(&self, rect: Rect) {
        let owning = self.topology.display_index_at(rect.center());
        info!("Фокус стабилизировался: {} (дисплей: {:?})", rect, owning);

        for (index, set) in self.overlays.iter().enumerate() {
            if Some(index) == owning {
                self.place_border(set, rect);

                if self.blur_enabled.load(Ordering::Relaxed) {
                    self.place_effects(set, &self.topology.displays[index], rect);
                } else {
                    Self::hide_effects(set);
                }
            } else {
                Self::call_surface("hide border", set.border.hide());
                Self::hide_effects(set);
            }
        }
    }

    fn place_border(&self, set: &OverlaySet, rect: Rect) {
        let frame = self.mapper.to_compositor_space(rect);

        Self::call_surface("set_frame border", set.border.set_frame(frame, false));
        Self::call_surface("set_opacity border", set.border.set_opacity(0.0));
        Self::call_surface("show border", set.border.show());

        // Новая анимация замещает предыдущую, а не накладывается на неё
        let animation = FadeAnimation::start(
            set.border.clone(),
            Duration::from_millis(self.config.overlay.fade_duration_ms),
        );
        *self.fade.lock() = Some(animation);
    }

    fn place_effects(&self, set: &OverlaySet, display: &DisplayInfo, rect: Rect) {
        let outer = self.mapper.to_compositor_space(display.usable_area);
        let hole = rect.inflated(self.config.overlay.blur_hole_padding);
        let inner = self.mapper.to_compositor_space(hole);

        let regions = partition_outside(outer, inner);
        debug_if_enabled!(
            "Размытие: областей {} вне {} в {}",
            regions.len(),
            inner,
            outer
        );

        // Неиспользованные слоты дополняются "скрыто"
        for (slot, effect) in set.effects.iter().enumerate() {
            match regions.get(slot) {
                Some(region) => {
                    Self::call_surface("set_frame effect", effect.set_frame(*region, false));
                    Self::call_surface("show effect", effect.show());
                }
                None => {
                    Self::call_surface("hide effect", effect.hide());
                }
            }
        }
    }

    fn hide_effects(set: &OverlaySet) {
        for effect in &set.effects {
            Self::call_surface("hide effect", effect.hide());
        }
    }

    /// Включить/выключить размытие вне окна в фокусе.
    /// При выключении панели скрываются сразу; при включении размытие
    /// появится на следующей стабилизации фокуса.
    pub fn set_blur_enabled(&self, enabled: bool) {
        info!("Размытие вне окна в фокусе: {}", enabled);
        self.blur_enabled.store(enabled, Ordering::Relaxed);

        if !enabled {
            for set in &self.overlays {
                Self::hide_effects(set);
            }
        }
    }

    /// Скрыть и закрыть все поверхности при завершении работы
    pub fn shutdown(&self) {
        info!("Освобождение поверхностей оверлея...");
        self.fade.lock().take();

        for set in &self.overlays {
            Self::call_surface("hide border", set.border.hide());
            Self::call_surface("close border", set.border.close());
            for effect in &set.effects {
                Self::call_surface("hide effect", effect.hide());
                Self::call_surface("close effect", effect.close());
            }
        }
    }

    // Ошибки размещения логируются на месте вызова; цикл трекера продолжает
    // работу на следующем тике
    fn call_surface(what: &str, result: Result<()>) {
        if let Err(e) = result {
            error!("Ошибка вызова поверхности ({}): {}", what, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::surface::{DryRunSurface, DryRunSurfaceFactory, SurfaceState};

    fn single_display_topology() -> DisplayTopology {
        let geometry = Rect::new(0, 0, 1920, 1080);
        DisplayTopology::new(
            vec![DisplayInfo {
                geometry,
                usable_area: geometry,
            }],
            geometry,
        )
    }

    fn build(
        topology: DisplayTopology,
        mutate: impl FnOnce(&mut Config),
    ) -> (OverlayCompositor, DryRunSurfaceFactory) {
        let mut config = Config::default();
        mutate(&mut config);
        let factory = DryRunSurfaceFactory::new(config.overlay.highlight_color.clone(), false);
        let compositor =
            OverlayCompositor::new(Arc::new(config), topology, &factory).unwrap();
        (compositor, factory)
    }

    fn states(factory: &DryRunSurfaceFactory) -> Vec<SurfaceState> {
        factory.created_surfaces().iter().map(|s| s.state()).collect()
    }

    // Поверхности создаются по 5 на дисплей: рамка, затем 4 панели эффекта
    fn display_surfaces(
        factory: &DryRunSurfaceFactory,
        index: usize,
    ) -> (Arc<DryRunSurface>, Vec<Arc<DryRunSurface>>) {
        let all = factory.created_surfaces();
        let base = index * 5;
        (all[base].clone(), all[base + 1..base + 5].to_vec())
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_places_border_and_effects() {
        let (compositor, factory) = build(single_display_topology(), |_| {});

        compositor.on_focus_settled(Rect::new(100, 100, 800, 600));

        let (border, effects) = display_surfaces(&factory, 0);
        // Рамка в координатах композитора: Y отражён вокруг объединения
        assert!(border.state().visible);
        assert_eq!(border.state().frame, Rect::new(100, 380, 800, 600));
        assert_eq!(border.state().opacity, 0.0);

        // Крестовое разбиение в координатах композитора, порядок фиксирован
        let expected = [
            Rect::new(0, 0, 1920, 380),
            Rect::new(0, 980, 1920, 100),
            Rect::new(0, 380, 100, 600),
            Rect::new(900, 380, 1020, 600),
        ];
        for (effect, frame) in effects.iter().zip(expected) {
            assert!(effect.state().visible);
            assert_eq!(effect.state().frame, frame);
        }

        // Анимация появления доводит непрозрачность рамки до единицы
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(border.state().opacity, 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_full_area_shows_border_without_effects() {
        let (compositor, factory) = build(single_display_topology(), |_| {});

        // Окно на всю рабочую область: все четыре полосы вырождаются
        compositor.on_focus_settled(Rect::new(0, 0, 1920, 1080));

        let (border, effects) = display_surfaces(&factory, 0);
        assert!(border.state().visible);
        assert_eq!(border.state().frame, Rect::new(0, 0, 1920, 1080));
        assert!(effects.iter().all(|e| !e.state().visible));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_is_idempotent() {
        let (compositor, factory) = build(single_display_topology(), |_| {});
        let rect = Rect::new(100, 100, 800, 600);

        compositor.on_focus_settled(rect);
        tokio::time::sleep(Duration::from_millis(600)).await;
        let once = states(&factory);

        compositor.on_focus_settled(rect);
        tokio::time::sleep(Duration::from_millis(600)).await;
        let twice = states(&factory);

        // Повторный вызов сходится к тому же видимому состоянию,
        // анимации не накапливаются
        assert_eq!(once, twice);
        let (border, _) = display_surfaces(&factory, 0);
        assert_eq!(border.state().opacity, 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleared_hides_everything() {
        let (compositor, factory) = build(single_display_topology(), |_| {});

        compositor.on_focus_settled(Rect::new(100, 100, 800, 600));
        compositor.on_focus_cleared();

        assert!(states(&factory).iter().all(|s| !s.visible));
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_display_is_hidden() {
        let topology = DisplayTopology::new(
            vec![
                DisplayInfo {
                    geometry: Rect::new(0, 0, 1920, 1080),
                    usable_area: Rect::new(0, 0, 1920, 1080),
                },
                DisplayInfo {
                    geometry: Rect::new(1920, 0, 1920, 1080),
                    usable_area: Rect::new(1920, 0, 1920, 1080),
                },
            ],
            Rect::new(0, 0, 3840, 1080),
        );
        let (compositor, factory) = build(topology, |_| {});

        // Центр окна на втором дисплее
        compositor.on_focus_settled(Rect::new(2000, 100, 800, 600));

        let (border0, effects0) = display_surfaces(&factory, 0);
        let (border1, _) = display_surfaces(&factory, 1);
        assert!(!border0.state().visible);
        assert!(effects0.iter().all(|e| !e.state().visible));
        assert!(border1.state().visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blur_disabled_and_toggle() {
        let (compositor, factory) =
            build(single_display_topology(), |c| c.overlay.blur_enabled = false);
        let rect = Rect::new(100, 100, 800, 600);

        compositor.on_focus_settled(rect);
        let (border, effects) = display_surfaces(&factory, 0);
        assert!(border.state().visible);
        assert!(effects.iter().all(|e| !e.state().visible));

        // Включение даёт эффект только на следующей стабилизации
        compositor.set_blur_enabled(true);
        assert!(effects.iter().all(|e| !e.state().visible));
        compositor.on_focus_settled(rect);
        assert!(effects.iter().any(|e| e.state().visible));

        // Выключение скрывает панели сразу
        compositor.set_blur_enabled(false);
        assert!(effects.iter().all(|e| !e.state().visible));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blur_hole_padding_inflates_hole() {
        let (compositor, factory) =
            build(single_display_topology(), |c| c.overlay.blur_hole_padding = 50);

        compositor.on_focus_settled(Rect::new(100, 100, 800, 600));

        let (_, effects) = display_surfaces(&factory, 0);
        // Верхняя полоса в координатах композитора заканчивается на 50
        // ячеек ниже из-за расширенной дырки
        assert_eq!(effects[0].state().frame, Rect::new(0, 0, 1920, 330));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_closes_surfaces() {
        let (compositor, factory) = build(single_display_topology(), |_| {});
        compositor.on_focus_settled(Rect::new(100, 100, 800, 600));
        compositor.shutdown();

        assert!(states(&factory).iter().all(|s| s.closed && !s.visible));
    }
}
