use crate::error::Result;
use crate::geometry::{DisplayInfo, DisplayTopology, Rect};
use crate::services::display_enumerator::r#trait::DisplayEnumerator;
use std::process::Command;
use tracing::{info, warn};

/// Перечисление дисплеев через `xrandr --listactivemonitors`
pub struct XrandrDisplayEnumerator;

impl XrandrDisplayEnumerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl DisplayEnumerator for XrandrDisplayEnumerator {
    async fn snapshot(&self) -> Result<DisplayTopology> {
        let output = match Command::new("xrandr").arg("--listactivemonitors").output() {
            Ok(output) if output.status.success() => output,
            _ => {
                // Вырожденная топология допустима: mapper перейдёт в
                // тождественный режим, приложение продолжит работу
                warn!("xrandr недоступен - продолжаем с пустой топологией дисплеев");
                return Ok(DisplayTopology::new(Vec::new(), Rect::ZERO));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let displays = parse_active_monitors(&stdout);

        info!("Обнаружено дисплеев: {}", displays.len());

        let toolkit_union = displays
            .iter()
            .fold(Rect::ZERO, |acc, d| acc.united(&d.geometry));

        // Композитор этого бэкенда привязывает нижне-левый угол объединения
        // дисплеев к нулевой высоте (Y растёт вверх)
        let compositor_union = Rect::new(
            toolkit_union.x,
            0,
            toolkit_union.width,
            toolkit_union.height,
        );

        Ok(DisplayTopology::new(displays, compositor_union))
    }
}

/// Разобрать вывод `xrandr --listactivemonitors`:
/// строки вида ` 0: +*eDP-1 1920/344x1080/194+0+0  eDP-1`
fn parse_active_monitors(stdout: &str) -> Vec<DisplayInfo> {
    let mut displays = Vec::new();

    for line in stdout.lines().skip(1) {
        let geometry_token = line
            .split_whitespace()
            .find(|token| token.contains('x') && token.contains('+'));

        if let Some(token) = geometry_token {
            if let Some(geometry) = parse_monitor_geometry(token) {
                displays.push(DisplayInfo {
                    geometry,
                    // X11-бэкенд не сообщает зарезервированные панелями зоны;
                    // рабочая область совпадает с геометрией
                    usable_area: geometry,
                });
            } else {
                warn!("Не удалось разобрать геометрию монитора: {}", token);
            }
        }
    }

    displays
}

/// Геометрия в формате WIDTH/WMMxHEIGHT/HMM+X+Y
fn parse_monitor_geometry(token: &str) -> Option<Rect> {
    let (width_part, rest) = token.split_once('x')?;
    let width: i32 = width_part.split('/').next()?.parse().ok()?;

    let mut parts = rest.splitn(3, '+');
    let height: i32 = parts.next()?.split('/').next()?.parse().ok()?;
    let x: i32 = parts.next()?.parse().ok()?;
    let y: i32 = parts.next()?.parse().ok()?;

    Some(Rect::new(x, y, width, height))
}
