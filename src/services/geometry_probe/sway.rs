use crate::config::Config;
use crate::error::{FocusViewError, Result};
use crate::geometry::Rect;
use crate::services::geometry_probe::r#trait::{filter_min_size, GeometryProbe};
use std::process::Command;
use std::sync::Arc;
use tracing::debug;

/// Зонд геометрии через swaymsg (Sway / wlroots-композиторы)
pub struct SwayProbe {
    config: Arc<Config>,
}

impl SwayProbe {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    pub async fn test(&self) -> Result<()> {
        let output = Command::new("swaymsg").args(["-t", "get_tree"]).output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(FocusViewError::ProbeUnavailable(
                "swaymsg вернул ошибку".to_string(),
            ))
        }
    }

    fn query_geometry(&self) -> Option<Rect> {
        let output = Command::new("swaymsg").args(["-t", "get_tree"]).output().ok()?;

        if !output.status.success() {
            debug!("swaymsg вернул ошибку - считаем, что активного окна нет");
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_focused_rect(&stdout)
    }
}

/// Вытащить rect сфокусированного контейнера из JSON дерева sway.
/// Формальный JSON-парсер здесь не нужен: ищем маркер "focused":true и
/// ближайший к нему блок "rect":{...}.
fn parse_focused_rect(tree: &str) -> Option<Rect> {
    let focused_pos = tree.find("\"focused\":true")?;

    // rect узла обычно сериализуется до флага focused; на всякий случай
    // смотрим и после него
    let rect_start = tree[..focused_pos]
        .rfind("\"rect\":{")
        .or_else(|| tree[focused_pos..].find("\"rect\":{").map(|p| p + focused_pos))?;

    let body_start = rect_start + "\"rect\":{".len();
    let body_end = tree[body_start..].find('}')? + body_start;
    let body = &tree[body_start..body_end];

    Some(Rect::new(
        parse_i32_field(body, "x")?,
        parse_i32_field(body, "y")?,
        parse_i32_field(body, "width")?,
        parse_i32_field(body, "height")?,
    ))
}

fn parse_i32_field(body: &str, key: &str) -> Option<i32> {
    let marker = format!("\"{}\":", key);
    let start = body.find(&marker)? + marker.len();
    let rest = &body[start..];
    let end = rest.find(',').unwrap_or(rest.len());
    rest[..end].trim().parse().ok()
}

#[async_trait::async_trait]
impl GeometryProbe for SwayProbe {
    async fn sample(&self) -> Option<Rect> {
        let rect = self.query_geometry()?;
        filter_min_size(
            rect,
            self.config.tracking.min_window_width,
            self.config.tracking.min_window_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_focused_rect() {
        let tree = r#"{"id":1,"nodes":[{"id":7,"name":"term","rect":{"x":10,"y":20,"width":800,"height":600},"focused":true,"window_rect":{"x":2,"y":2,"width":796,"height":596}}]}"#;
        assert_eq!(
            parse_focused_rect(tree),
            Some(Rect::new(10, 20, 800, 600))
        );
    }

    #[test]
    fn test_parse_focused_rect_after_marker() {
        // Порядок ключей с rect после focused тоже принимается
        let tree = r#"{"nodes":[{"id":7,"focused":true,"rect":{"x":0,"y":0,"width":1920,"height":1080}}]}"#;
        assert_eq!(
            parse_focused_rect(tree),
            Some(Rect::new(0, 0, 1920, 1080))
        );
    }

    #[test]
    fn test_parse_no_focused_node() {
        let tree = r#"{"nodes":[{"id":7,"rect":{"x":0,"y":0,"width":100,"height":100},"focused":false}]}"#;
        assert_eq!(parse_focused_rect(tree), None);
        assert_eq!(parse_focused_rect(""), None);
    }
}
