use crate::config::Config;
use crate::error::Result;
use crate::focusview_error;
use crate::geometry::Rect;
use std::sync::Arc;
use tracing::info;

/// Trait for geometry probes queried once per poll tick
#[async_trait::async_trait]
pub trait GeometryProbe: Send + Sync {
    /// Прямоугольник окна в фокусе в координатах тулкита, либо None.
    /// Любой сбой хост-инструмента - это None, повторная попытка
    /// произойдёт сама на следующем тике.
    async fn sample(&self) -> Option<Rect>;
}

/// Отбросить окна меньше минимального размера (тултипы, всплывающие окна)
pub(super) fn filter_min_size(rect: Rect, min_width: i32, min_height: i32) -> Option<Rect> {
    if rect.width < min_width || rect.height < min_height {
        None
    } else {
        Some(rect)
    }
}

/// Factory function to create a geometry probe based on config and dry_run flag
pub async fn create_geometry_probe(
    config: Arc<Config>,
    dry_run: bool,
) -> Result<Box<dyn GeometryProbe>> {
    if dry_run {
        return Ok(Box::new(super::dry_run::DryRunProbe::default_script()));
    }

    let xdotool = super::xdotool::XdotoolProbe::new(config.clone());
    let sway = super::sway::SwayProbe::new(config.clone());

    match config.tracking.probe_mode.as_str() {
        "xdotool" => {
            xdotool.test().await?;
            info!("Зонд геометрии: xdotool");
            Ok(Box::new(xdotool))
        }
        "sway" => {
            sway.test().await?;
            info!("Зонд геометрии: sway");
            Ok(Box::new(sway))
        }
        // auto: первый работающий инструмент выигрывает
        _ => {
            if xdotool.test().await.is_ok() {
                info!("Зонд геометрии: xdotool (auto)");
                return Ok(Box::new(xdotool));
            }
            if sway.test().await.is_ok() {
                info!("Зонд геометрии: sway (auto)");
                return Ok(Box::new(sway));
            }
            Err(focusview_error!(
                probe_unavailable,
                "Ни один инструмент определения геометрии окна не работает (xdotool, swaymsg)"
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_min_size() {
        // Окна меньше порога по любой из осей считаются отсутствием окна
        assert_eq!(filter_min_size(Rect::new(0, 0, 49, 300), 50, 50), None);
        assert_eq!(filter_min_size(Rect::new(0, 0, 300, 49), 50, 50), None);
        assert_eq!(
            filter_min_size(Rect::new(0, 0, 50, 50), 50, 50),
            Some(Rect::new(0, 0, 50, 50))
        );
        assert_eq!(
            filter_min_size(Rect::new(0, 0, 10, 10), 0, 0),
            Some(Rect::new(0, 0, 10, 10))
        );
    }
}
