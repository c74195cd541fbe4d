//! Block-grid geometry

pub mod bounds;
pub mod facing;

pub use bounds::BoundingBox;
pub use facing::{Exit, Facing};
