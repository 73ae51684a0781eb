//! Pathfinding in two dimensions using a breadth first search
use searcher::{bfs, SearchOptions, SearchResult};

pub use super::map::Map;
use super::Point;

/// Implements pathfinding for a map.
///
/// Every step costs the same, so a breadth first search finds
/// a shortest path. Points are their own search keys.
#[derive(Debug, Clone)]
pub struct Pathfinder<'m, M> {
    map: &'m M,
    options: SearchOptions,
}

impl<'m, M> Pathfinder<'m, M>
where
    M: Map,
{
    /// Construct a new pathfinder.
    pub(crate) fn new(map: &'m M) -> Self {
        Self {
            map,
            options: SearchOptions::default(),
        }
    }

    /// Stop searching after this many points have been explored.
    ///
    /// Needed on maps which are unbounded.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.options.limit = Some(limit);
        self
    }

    /// Search for a path, reporting a step limit which ran out.
    pub fn search(&self, origin: Point, destination: Point) -> SearchResult<Option<Vec<Point>>> {
        if !self.map.is_traversable(origin) {
            return Ok(None);
        }

        let solution = bfs::build_by_key(origin, |p: &Point| self.map.exits(*p), |p: &Point| *p)
            .with_options(self.options.clone())
            .run(|p| *p == destination)?;

        Ok(solution.map(|s| {
            let mut points = Vec::with_capacity(s.path.len() + 1);
            points.push(origin);
            points.extend(s.path);
            points
        }))
    }

    /// Find a path between the origin and destination given,
    /// including both ends.
    ///
    /// When no path exists and the search is exhausted, return None.
    pub fn find_path(&self, origin: Point, destination: Point) -> Option<Vec<Point>> {
        self.search(origin, destination).ok().flatten()
    }

    /// Number of steps on a shortest path.
    pub fn distance(&self, origin: Point, destination: Point) -> Option<usize> {
        self.find_path(origin, destination).map(|p| p.len() - 1)
    }
}

#[cfg(test)]
mod test {
    use super::super::grid::Grid;
    use super::super::map::helpers::*;
    use super::*;
    use searcher::SearchError;

    const MULTI: &str = "
        #######
        #.....#
        #.###.#
        #.#...#
        #.#.###
        #...#.#
        ###.#.#
        #.....#
        #######
    ";

    #[test]
    fn simple() {
        let grid: Grid = ".".parse().unwrap();

        assert_eq!(
            grid.path((0, 0).into(), (0, 0).into()),
            Some(vec![(0, 0).into()])
        );
    }

    #[test]
    fn shortest() {
        let grid: Grid = MULTI.parse().unwrap();

        let path = grid.path((1, 1).into(), (5, 6).into()).unwrap();
        assert_eq!(path.len() - 1, 11);
        assert!(path.windows(2).all(|w| w[0].is_adjacent(&w[1])));
        assert!(path.iter().all(|p| grid.is_traversable(*p)));
    }

    #[test]
    fn blocked() {
        let grid: Grid = "..#..".parse().unwrap();
        assert_eq!(grid.path((0, 0).into(), (4, 0).into()), None);
        assert_eq!(grid.path((2, 0).into(), (4, 0).into()), None);
    }

    #[test]
    fn openmap() {
        // The short way round passes through negative coordinates.
        let map: OpenMap = vec![(1, 0).into(), (1, 1).into(), (1, 2).into()].into();

        let pathfinder = map.pathfinder().with_limit(1000);
        assert_eq!(pathfinder.distance((0, 0).into(), (2, 0).into()), Some(4));
    }

    #[test]
    fn unbounded() {
        // Walled in, so an unbounded map never runs out of points.
        let map: OpenMap = vec![(0, -1).into(), (-1, 0).into(), (1, 0).into(), (0, 1).into()].into();
        let result = map
            .pathfinder()
            .with_limit(100)
            .search((5, 5).into(), (0, 0).into());
        assert_eq!(result, Err(SearchError::StepLimitExhausted(100)));
    }
}
