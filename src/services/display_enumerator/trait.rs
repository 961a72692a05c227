use crate::error::Result;
use crate::geometry::DisplayTopology;

/// Trait for display enumerators producing a startup topology snapshot
#[async_trait::async_trait]
pub trait DisplayEnumerator: Send + Sync {
    async fn snapshot(&self) -> Result<DisplayTopology>;
}

/// Factory function to create a display enumerator based on the dry_run flag
pub fn create_display_enumerator(dry_run: bool) -> Box<dyn DisplayEnumerator> {
    if dry_run {
        Box::new(super::dry_run::DryRunDisplayEnumerator::new())
    } else {
        Box::new(super::xrandr::XrandrDisplayEnumerator::new())
    }
}
