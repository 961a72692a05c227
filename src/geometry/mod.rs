pub mod display;
pub mod mapper;
pub mod partition;
pub mod rect;

pub use display::{DisplayInfo, DisplayTopology};
pub use mapper::CoordinateMapper;
pub use partition::{partition_outside, MAX_REGIONS};
pub use rect::Rect;
