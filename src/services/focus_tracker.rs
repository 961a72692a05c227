use crate::config::Config;
use crate::debug_if_enabled;
use crate::error::Result;
use crate::events::{FocusEvent, FocusSample};
use crate::geometry::Rect;
use crate::services::geometry_probe::GeometryProbe;
use crate::services::overlay_compositor::OverlayCompositor;
use std::sync::Arc;
use tokio::time::{interval, sleep_until, Duration, Instant};
use tracing::info;

/// Состояние машины дебаунса. Владеет им исключительно FocusTracker,
/// мутации происходят только на тике опроса и на срабатывании таймера.
///
/// Idle: стабильного прямоугольника нет. Pending: замечен новый сэмпл,
/// ждём истечения окна дебаунса. Stable: опубликованный прямоугольник.
struct TrackedFocusState {
    last_sample: FocusSample,
    pending: Option<Rect>,
    debounce_deadline: Option<Instant>,
    stable: Option<Rect>,
    debounce_delay: Duration,
}

impl TrackedFocusState {
    fn new(debounce_delay: Duration) -> Self {
        Self {
            last_sample: FocusSample::new(None),
            pending: None,
            debounce_deadline: None,
            stable: None,
            debounce_delay,
        }
    }

    /// Обработать один сэмпл зонда. Возвращает true, если сырой сэмпл
    /// изменился и все поверхности надо немедленно скрыть.
    ///
    /// Чистый дебаунс, не троттлинг: каждое изменение перевзводит дедлайн,
    /// событие стабилизации случается только после периода полной тишины.
    fn on_tick(&mut self, rect: Option<Rect>, now: Instant) -> bool {
        let sample = FocusSample::new(rect);
        if sample == self.last_sample {
            return false;
        }

        debug_if_enabled!(
            "Сырой сэмпл изменился: {} -> {} ({}мс после предыдущего)",
            self.last_sample,
            sample,
            self.last_sample.timestamp.elapsed().as_millis()
        );

        self.last_sample = sample;
        self.stable = None;

        match rect {
            Some(candidate) => {
                self.pending = Some(candidate);
                self.debounce_deadline = Some(now + self.debounce_delay);
            }
            None => {
                // Потеря фокуса: в Idle, отложенной работы нет
                self.pending = None;
                self.debounce_deadline = None;
            }
        }

        true
    }

    /// Таймер дебаунса истёк: кандидат не менялся весь интервал,
    /// публикуем его как стабильный
    fn on_debounce_expired(&mut self) -> Option<Rect> {
        self.debounce_deadline = None;
        let candidate = self.pending.take()?;
        self.stable = Some(candidate);
        Some(candidate)
    }

    fn debounce_deadline(&self) -> Option<Instant> {
        self.debounce_deadline
    }

    #[cfg(test)]
    fn stable(&self) -> Option<Rect> {
        self.stable
    }
}

/// Опрашивает зонд геометрии с фиксированным периодом, гасит переходные
/// изменения и транслирует стабильные переходы фокуса в OverlayCompositor.
///
/// Один таймер опроса и один одноразовый таймер дебаунса обслуживаются
/// одной задачей: перезапуск дебаунса - единственный примитив отмены.
pub struct FocusTracker {
    config: Arc<Config>,
    probe: Box<dyn GeometryProbe>,
    compositor: Arc<OverlayCompositor>,
    state: TrackedFocusState,
}

impl FocusTracker {
    pub fn new(
        config: Arc<Config>,
        probe: Box<dyn GeometryProbe>,
        compositor: Arc<OverlayCompositor>,
    ) -> Self {
        info!(
            "Инициализация FocusTracker (период {}мс, дебаунс {}мс)",
            config.tracking.poll_interval_ms, config.tracking.debounce_delay_ms
        );

        let state = TrackedFocusState::new(Duration::from_millis(
            config.tracking.debounce_delay_ms,
        ));

        Self {
            config,
            probe,
            compositor,
            state,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        info!("FocusTracker запущен");

        let mut ticker = interval(Duration::from_millis(
            self.config.tracking.poll_interval_ms,
        ));

        loop {
            let deadline = self.state.debounce_deadline();

            tokio::select! {
                _ = ticker.tick() => {
                    // Зонд не возвращает ошибок: сбой - это "окна нет",
                    // следующая попытка произойдёт сама на новом тике
                    let sample = self.probe.sample().await;
                    if self.state.on_tick(sample, Instant::now()) {
                        self.compositor.handle_focus_event(FocusEvent::cleared());
                    }
                }
                _ = sleep_until(deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600))), if deadline.is_some() => {
                    if let Some(rect) = self.state.on_debounce_expired() {
                        self.compositor.handle_focus_event(FocusEvent::settled(rect));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{DisplayInfo, DisplayTopology};
    use crate::services::geometry_probe::DryRunProbe;
    use crate::services::surface::{DryRunSurface, DryRunSurfaceFactory};

    const DELAY: Duration = Duration::from_millis(200);

    fn rect_a() -> Rect {
        Rect::new(100, 100, 800, 600)
    }

    fn rect_b() -> Rect {
        Rect::new(150, 100, 800, 600)
    }

    #[test]
    fn test_state_initial_none_sample_is_quiet() {
        let mut state = TrackedFocusState::new(DELAY);
        // Стартовое отсутствие окна не отличается от последнего сэмпла
        assert!(!state.on_tick(None, Instant::now()));
        assert!(state.debounce_deadline().is_none());
    }

    #[test]
    fn test_state_change_arms_debounce() {
        let mut state = TrackedFocusState::new(DELAY);
        let now = Instant::now();

        assert!(state.on_tick(Some(rect_a()), now));
        assert_eq!(state.debounce_deadline(), Some(now + DELAY));

        // Тот же сэмпл не перевзводит таймер
        assert!(!state.on_tick(Some(rect_a()), now + Duration::from_millis(100)));
        assert_eq!(state.debounce_deadline(), Some(now + DELAY));

        assert_eq!(state.on_debounce_expired(), Some(rect_a()));
        assert_eq!(state.stable(), Some(rect_a()));
    }

    #[test]
    fn test_state_changed_candidate_rearms() {
        let mut state = TrackedFocusState::new(DELAY);
        let now = Instant::now();

        assert!(state.on_tick(Some(rect_a()), now));
        let later = now + Duration::from_millis(100);
        assert!(state.on_tick(Some(rect_b()), later));
        // Дедлайн перевзведён от последнего изменения
        assert_eq!(state.debounce_deadline(), Some(later + DELAY));
        assert_eq!(state.on_debounce_expired(), Some(rect_b()));
    }

    #[test]
    fn test_state_focus_lost_goes_idle() {
        let mut state = TrackedFocusState::new(DELAY);
        let now = Instant::now();

        state.on_tick(Some(rect_a()), now);
        state.on_debounce_expired();
        assert_eq!(state.stable(), Some(rect_a()));

        // none после Stable: немедленная очистка, без отложенной работы
        assert!(state.on_tick(None, now + DELAY));
        assert!(state.debounce_deadline().is_none());
        assert_eq!(state.stable(), None);
        assert_eq!(state.on_debounce_expired(), None);
    }

    // --- Интеграционные тесты цикла на остановленных часах ---

    fn test_topology() -> DisplayTopology {
        let geometry = Rect::new(0, 0, 1920, 1080);
        DisplayTopology::new(
            vec![DisplayInfo {
                geometry,
                usable_area: geometry,
            }],
            geometry,
        )
    }

    async fn run_scripted(
        script: Vec<Option<Rect>>,
        run_for: Duration,
    ) -> (DryRunSurfaceFactory, tokio::task::JoinHandle<Result<()>>) {
        let config = Arc::new(Config::default());
        let factory = DryRunSurfaceFactory::new("#FF0000".to_string(), false);
        let compositor = Arc::new(
            OverlayCompositor::new(config.clone(), test_topology(), &factory).unwrap(),
        );
        let probe = Box::new(DryRunProbe::new(script, 1));
        let tracker = FocusTracker::new(config, probe, compositor);

        let handle = tokio::spawn(tracker.run());
        tokio::time::sleep(run_for).await;
        handle.abort();
        (factory, handle)
    }

    fn border(factory: &DryRunSurfaceFactory) -> Arc<DryRunSurface> {
        factory.created_surfaces()[0].clone()
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_suppresses_transient_changes() {
        // Сэмпл меняется на каждом из первых четырёх тиков, затем замирает:
        // ровно одно событие стабилизации, и только для последнего значения
        let mut script = vec![
            Some(Rect::new(0, 0, 100, 100)),
            Some(Rect::new(10, 0, 100, 100)),
            Some(Rect::new(20, 0, 100, 100)),
            Some(rect_a()),
        ];
        script.extend(std::iter::repeat(Some(rect_a())).take(40));

        let (factory, _) = run_scripted(script, Duration::from_secs(2)).await;

        let border = border(&factory);
        assert_eq!(border.show_count(), 1);
        assert!(border.state().visible);
        // Рамка размещена для последнего сэмпла (в координатах композитора)
        assert_eq!(border.state().frame, Rect::new(100, 380, 800, 600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settles_after_quiet_period() {
        let mut script = vec![Some(rect_a())];
        script.extend(std::iter::repeat(Some(rect_a())).take(40));

        let (factory, _) = run_scripted(script, Duration::from_secs(1)).await;

        let border = border(&factory);
        assert_eq!(border.show_count(), 1);
        assert!(border.state().visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_focus_lost_clears_without_resettle() {
        // Стабилизация на окне, затем зонд 5+ тиков подряд отвечает "none":
        // очистка на первом же none, повторных стабилизаций нет
        let mut script = Vec::new();
        script.extend(std::iter::repeat(Some(rect_a())).take(5));
        script.extend(std::iter::repeat(None).take(40));

        let (factory, _) = run_scripted(script, Duration::from_secs(3)).await;

        let border = border(&factory);
        assert_eq!(border.show_count(), 1);
        assert!(!border.state().visible);
        assert!(factory
            .created_surfaces()
            .iter()
            .all(|s| !s.state().visible));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_changes_never_settle() {
        // Сэмпл меняется каждый тик (период 100мс < дебаунс 200мс):
        // ни одной стабилизации за всё время
        let script = vec![
            Some(Rect::new(0, 0, 100, 100)),
            Some(Rect::new(10, 0, 100, 100)),
            Some(Rect::new(20, 0, 100, 100)),
            Some(Rect::new(30, 0, 100, 100)),
            Some(Rect::new(40, 0, 100, 100)),
        ];

        let (factory, _) = run_scripted(script, Duration::from_secs(2)).await;

        assert_eq!(border(&factory).show_count(), 0);
    }
}
