use crate::error::Result;
use crate::geometry::{DisplayInfo, DisplayTopology, Rect};
use crate::services::display_enumerator::r#trait::DisplayEnumerator;
use tracing::info;

/// Эмулятор топологии: один дисплей 1920x1080 с рабочей областью без
/// верхней системной панели
pub struct DryRunDisplayEnumerator;

impl DryRunDisplayEnumerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl DisplayEnumerator for DryRunDisplayEnumerator {
    async fn snapshot(&self) -> Result<DisplayTopology> {
        info!("Dry-run режим - эмулируем один дисплей 1920x1080");

        let geometry = Rect::new(0, 0, 1920, 1080);
        Ok(DisplayTopology::new(
            vec![DisplayInfo {
                geometry,
                usable_area: Rect::new(0, 25, 1920, 1055),
            }],
            geometry,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_snapshot_is_single_display() {
        let topology = DryRunDisplayEnumerator::new().snapshot().await.unwrap();
        assert_eq!(topology.displays.len(), 1);
        assert_eq!(topology.toolkit_union(), Rect::new(0, 0, 1920, 1080));
        assert_eq!(topology.compositor_union, Rect::new(0, 0, 1920, 1080));
    }
}
