#![deny(clippy::all)]

pub mod coord2d;

pub use coord2d::grid::{Grid, ParseGridError};
pub use coord2d::map::Map;
pub use coord2d::pathfinder::Pathfinder;
pub use coord2d::{BoundingBox, Direction, ParsePointError, Point};

/// Data type used for coordinates
pub type Position = i32;
