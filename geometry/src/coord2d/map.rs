//! Walkable surfaces for grid searches.
use std::fmt;

use super::grid::Grid;
use super::pathfinder::Pathfinder;
use super::Point;

/// Character marking an impassable cell on a [Grid].
pub const WALL: char = '#';

/// Anything which can say where a walker may stand.
///
/// Movement is always a single step up, down, left or right, so a map
/// only has to answer for one point at a time. The searches built on top
/// never look at how the map stores its cells.
pub trait Map: Sized + fmt::Debug {
    fn is_traversable(&self, location: Point) -> bool;

    /// Points one step away from `location` that can be walked on,
    /// in reading order.
    fn exits(&self, location: Point) -> Vec<Point> {
        location
            .adjacent()
            .filter(|p| self.is_traversable(*p))
            .collect()
    }

    fn pathfinder(&self) -> Pathfinder<Self> {
        Pathfinder::new(self)
    }

    /// Shortest walk from `origin` to `destination`, both included.
    fn path(&self, origin: Point, destination: Point) -> Option<Vec<Point>> {
        self.pathfinder().find_path(origin, destination)
    }
}

/// Cells off the grid, and walls, block the way.
impl Map for Grid {
    fn is_traversable(&self, location: Point) -> bool {
        matches!(self.get(location), Some(c) if c != WALL)
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn exits() {
        let grid: Grid = "
            #.#
            ..#
            #.#
        "
        .parse()
        .unwrap();

        let centre = Point::new(1, 1);
        assert_eq!(
            grid.exits(centre),
            vec![Point::new(1, 0), Point::new(0, 1), Point::new(1, 2)]
        );
        assert!(!grid.is_traversable(Point::new(2, 1)));
        assert!(!grid.is_traversable(Point::new(-1, 1)));
        assert_eq!(grid.exits(Point::new(0, 1)), vec![centre]);
    }
}
