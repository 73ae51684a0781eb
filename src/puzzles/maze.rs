//! Routes through a walled maze with numbered markers.
//!
//! Walls are `#`, open floor `.`, and digits mark places which must
//! be visited in order, starting from `0`.

use std::collections::BTreeMap;
use std::io::Read;
use std::str::FromStr;

use anyhow::{anyhow, Error};
use geometry::{Grid, Map, ParseGridError, Point};
use searcher::{dijkstra, SearchError, SearchOptions};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("No markers found in maze")]
    NoMarkers,

    #[error("Route {from} to {to}: breadth first found {breadth:?} steps, Dijkstra {weighted:?}")]
    Disagreement {
        from: Point,
        to: Point,
        breadth: Option<usize>,
        weighted: Option<usize>,
    },

    #[error(transparent)]
    Grid(#[from] ParseGridError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

#[derive(Debug, Clone)]
pub struct Maze {
    grid: Grid,
    markers: BTreeMap<char, Point>,
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let grid: Grid = s.parse()?;
        let markers: BTreeMap<char, Point> = grid
            .points()
            .filter_map(|p| grid.get(p).filter(char::is_ascii_digit).map(|c| (c, p)))
            .collect();
        if markers.is_empty() {
            return Err(MazeError::NoMarkers);
        }
        Ok(Maze { grid, markers })
    }
}

impl Maze {
    pub fn marker(&self, label: char) -> Option<Point> {
        self.markers.get(&label).copied()
    }

    fn open(&self, point: &Point) -> Vec<(Point, u32)> {
        self.grid.exits(*point).into_iter().map(|p| (p, 1)).collect()
    }

    /// Shortest route between two points, as a number of steps.
    ///
    /// Computed twice, by breadth first search and by Dijkstra's
    /// algorithm with unit costs. Both searches share the step limit in
    /// `options`, and a mismatch between them is an error.
    pub fn route(&self, from: Point, to: Point, options: &SearchOptions) -> Result<Option<usize>, MazeError> {
        let mut pathfinder = self.grid.pathfinder();
        if let Some(limit) = options.limit {
            pathfinder = pathfinder.with_limit(limit);
        }
        let breadth = pathfinder.search(from, to)?.map(|p| p.len() - 1);

        let weighted = dijkstra::build_by_key(from, |p: &Point| self.open(p), |p: &Point| *p)
            .with_options(options.clone())
            .run(|p| *p == to)?
            .map(|s| s.cost as usize);

        if breadth != weighted {
            warn!(%from, %to, ?breadth, ?weighted, "searches disagree on route length");
            return Err(MazeError::Disagreement {
                from,
                to,
                breadth,
                weighted,
            });
        }
        debug!(%from, %to, steps = ?weighted, "route");
        Ok(weighted)
    }

    /// Total steps to visit every marker in order.
    pub fn tour(&self, options: &SearchOptions) -> Result<Option<usize>, MazeError> {
        let stops: Vec<Point> = self.markers.values().copied().collect();
        let mut total = 0;
        for leg in stops.windows(2) {
            match self.route(leg[0], leg[1], options)? {
                Some(steps) => total += steps,
                None => return Ok(None),
            }
        }
        Ok(Some(total))
    }
}

pub fn main(mut input: Box<dyn Read + 'static>, options: &SearchOptions) -> ::std::result::Result<(), Error> {
    let mut buffer = String::new();
    input.read_to_string(&mut buffer)?;
    let maze: Maze = buffer.parse()?;

    let first = maze.marker('0').ok_or_else(|| anyhow!("No marker 0 in maze"))?;
    for (label, point) in maze.markers.iter().skip(1) {
        match maze.route(first, *point, options)? {
            Some(steps) => println!("0 -> {}: {} steps", label, steps),
            None => println!("0 -> {}: unreachable", label),
        }
    }

    let total = maze
        .tour(options)?
        .ok_or_else(|| anyhow!("Some marker is unreachable"))?;
    println!("Tour: {} steps", total);

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE: &str = "
        ###########
        #0.1.....2#
        #.#######.#
        #4.......3#
        ###########
    ";

    #[test]
    fn markers() {
        let maze: Maze = SAMPLE.parse().unwrap();
        assert_eq!(maze.marker('0'), Some(Point::new(1, 1)));
        assert_eq!(maze.marker('4'), Some(Point::new(1, 3)));
        assert_eq!(maze.marker('7'), None);
    }

    #[test]
    fn route() {
        let maze: Maze = SAMPLE.parse().unwrap();
        let options = SearchOptions::default();
        let route = |a, b| maze.route(maze.marker(a).unwrap(), maze.marker(b).unwrap(), &options);

        assert_eq!(route('0', '4'), Ok(Some(2)));
        assert_eq!(route('0', '2'), Ok(Some(8)));
        assert_eq!(route('4', '1'), Ok(Some(4)));
    }

    #[test]
    fn tour() {
        let maze: Maze = SAMPLE.parse().unwrap();
        // 0 -> 1 -> 2 -> 3 -> 4
        assert_eq!(maze.tour(&SearchOptions::default()), Ok(Some(2 + 6 + 2 + 8)));
    }

    #[test]
    fn every_pair() {
        let maze: Maze = SAMPLE.parse().unwrap();
        let options = SearchOptions::default();
        for from in maze.markers.values() {
            for to in maze.markers.values() {
                let steps = maze.route(*from, *to, &options).unwrap();
                assert_eq!(steps, maze.grid.pathfinder().distance(*from, *to));
                assert!(steps.is_some());
            }
        }
    }

    #[test]
    fn limited() {
        let maze: Maze = SAMPLE.parse().unwrap();
        let options = SearchOptions {
            limit: Some(3),
            ..SearchOptions::default()
        };
        let (start, end) = (maze.marker('0').unwrap(), maze.marker('2').unwrap());
        assert_eq!(
            maze.route(start, end, &options),
            Err(MazeError::Search(SearchError::StepLimitExhausted(3)))
        );
        assert_eq!(maze.tour(&options), Err(MazeError::Search(SearchError::StepLimitExhausted(3))));
    }

    #[test]
    fn sealed() {
        let maze: Maze = "0#1".parse().unwrap();
        assert_eq!(maze.tour(&SearchOptions::default()), Ok(None));
    }

    #[test]
    fn empty() {
        assert!(matches!("#.#".parse::<Maze>(), Err(MazeError::NoMarkers)));
    }
}
