use crate::geometry::Rect;
use crate::services::geometry_probe::r#trait::GeometryProbe;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

/// Зонд-эмулятор: прокручивает заданный сценарий сэмплов по кругу.
/// Каждый шаг сценария удерживается `samples_per_step` опросов, чтобы
/// трекер успевал стабилизироваться между сменами.
pub struct DryRunProbe {
    script: Vec<Option<Rect>>,
    samples_per_step: usize,
    counter: AtomicUsize,
}

impl DryRunProbe {
    pub fn new(script: Vec<Option<Rect>>, samples_per_step: usize) -> Self {
        assert!(!script.is_empty());
        assert!(samples_per_step > 0);
        Self {
            script,
            samples_per_step,
            counter: AtomicUsize::new(0),
        }
    }

    /// Сценарий по умолчанию для dry-run режима: несколько "окон" и
    /// период без фокуса, каждое состояние держится ~5 секунд при опросе 100мс
    pub fn default_script() -> Self {
        info!("Dry-run режим - GeometryProbe работает в режиме эмуляции");
        Self::new(
            vec![
                Some(Rect::new(100, 100, 800, 600)),
                Some(Rect::new(400, 200, 1024, 768)),
                None,
                Some(Rect::new(0, 0, 1920, 1080)),
            ],
            50,
        )
    }
}

#[async_trait::async_trait]
impl GeometryProbe for DryRunProbe {
    async fn sample(&self) -> Option<Rect> {
        let tick = self.counter.fetch_add(1, Ordering::Relaxed);
        let step = (tick / self.samples_per_step) % self.script.len();
        self.script[step]
    }
}
