use crate::config::Config;
use crate::error::{FocusViewError, Result};
use crate::geometry::Rect;
use crate::services::geometry_probe::r#trait::{filter_min_size, GeometryProbe};
use std::process::Command;
use std::sync::Arc;
use tracing::debug;

/// Зонд геометрии через xdotool (X11 и XWayland)
pub struct XdotoolProbe {
    config: Arc<Config>,
}

impl XdotoolProbe {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    pub async fn test(&self) -> Result<()> {
        let output = Command::new("xdotool").arg("--version").output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(FocusViewError::ProbeUnavailable(
                "xdotool не отвечает".to_string(),
            ))
        }
    }

    fn query_geometry(&self) -> Option<Rect> {
        let output = Command::new("xdotool")
            .args(["getactivewindow", "getwindowgeometry", "--shell"])
            .output()
            .ok()?;

        if !output.status.success() {
            debug!("xdotool вернул ошибку - считаем, что активного окна нет");
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_shell_geometry(&stdout)
    }
}

/// Разобрать вывод `getwindowgeometry --shell` (строки вида X=123)
fn parse_shell_geometry(stdout: &str) -> Option<Rect> {
    let mut x = None;
    let mut y = None;
    let mut width = None;
    let mut height = None;

    for line in stdout.lines() {
        if let Some((key, value)) = line.split_once('=') {
            let value: Option<i32> = value.trim().parse().ok();
            match key.trim() {
                "X" => x = value,
                "Y" => y = value,
                "WIDTH" => width = value,
                "HEIGHT" => height = value,
                _ => {}
            }
        }
    }

    Some(Rect::new(x?, y?, width?, height?))
}

#[async_trait::async_trait]
impl GeometryProbe for XdotoolProbe {
    async fn sample(&self) -> Option<Rect> {
        let rect = self.query_geometry()?;
        filter_min_size(
            rect,
            self.config.tracking.min_window_width,
            self.config.tracking.min_window_height,
        )
    }
}
