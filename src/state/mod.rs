pub mod board;
pub mod config;
pub mod geometry;
pub mod interaction;
pub mod touch;

pub use board::Board;
pub use config::{LabConfig, ScaleMode, StickyTracking};
pub use geometry::Point;
pub use interaction::{InputEvent, InteractionController, Mode};
pub use touch::PointerId;
