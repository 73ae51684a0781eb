//! Climbing a height map from `S` to `E`.
//!
//! Heights run from `a` (lowest) to `z`; `S` sits at height `a` and
//! `E` at height `z`. A step may climb at most one unit, but may drop
//! any distance.

use std::io::Read;
use std::str::FromStr;

use anyhow::{anyhow, Error};
use geometry::{Grid, ParseGridError, Point};
use searcher::{astar, bfs, SearchOptions, SearchResult};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum HillsError {
    #[error("No start (S) marked on the map")]
    MissingStart,

    #[error("No summit (E) marked on the map")]
    MissingSummit,

    #[error("Unknown height {mark:?} at {at}")]
    InvalidHeight { mark: char, at: Point },

    #[error(transparent)]
    Grid(#[from] ParseGridError),
}

fn elevation(mark: char) -> Option<u8> {
    match mark {
        'S' => Some(b'a'),
        'E' => Some(b'z'),
        'a'..='z' => Some(mark as u8),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct Hills {
    grid: Grid,
    start: Point,
    summit: Point,
}

impl FromStr for Hills {
    type Err = HillsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let grid: Grid = s.parse()?;
        for at in grid.points() {
            let mark = grid.get(at).unwrap_or_default();
            if elevation(mark).is_none() {
                return Err(HillsError::InvalidHeight { mark, at });
            }
        }

        let start = grid.find('S').ok_or(HillsError::MissingStart)?;
        let summit = grid.find('E').ok_or(HillsError::MissingSummit)?;
        Ok(Hills {
            grid,
            start,
            summit,
        })
    }
}

impl Hills {
    fn height(&self, point: Point) -> Option<u8> {
        self.grid.get(point).and_then(elevation)
    }

    /// Neighbors which can be climbed to from `point`.
    fn upwards(&self, point: &Point) -> Vec<(Point, usize)> {
        let limit = self.height(*point).unwrap_or(0).saturating_add(1);
        self.grid
            .neighbors(*point)
            .filter(|n| self.height(*n).map_or(false, |h| h <= limit))
            .map(|n| (n, 1))
            .collect()
    }

    /// Neighbors which could have been climbed from, to reach `point`.
    fn downwards(&self, point: &Point) -> Vec<Point> {
        let floor = self.height(*point).unwrap_or(0);
        self.grid
            .neighbors(*point)
            .filter(|n| self.height(*n).map_or(false, |h| h.saturating_add(1) >= floor))
            .collect()
    }

    /// Fewest steps from the start to the summit.
    ///
    /// Each step costs one and moves one unit, so the manhattan
    /// distance to the summit never overestimates.
    pub fn climb(&self, options: &SearchOptions) -> SearchResult<Option<usize>> {
        let summit = self.summit;
        let solution = astar::build_by_key(
            self.start,
            |p: &Point| self.upwards(p),
            move |p: &Point| p.manhattan_distance(summit) as usize,
            |p: &Point| *p,
        )
        .with_options(options.clone())
        .run(|p| *p == summit)?;

        Ok(solution.map(|s| s.cost))
    }

    /// Fewest steps from any lowest cell to the summit.
    ///
    /// Searches backwards from the summit, so the first lowest cell
    /// reached is the closest one.
    pub fn scenic(&self, options: &SearchOptions) -> SearchResult<Option<usize>> {
        let solution = bfs::build_by_key(self.summit, |p: &Point| self.downwards(p), |p: &Point| *p)
            .with_options(options.clone())
            .run(|p| self.height(*p) == Some(b'a'))?;

        Ok(solution.map(|s| s.path.len()))
    }
}

pub fn main(mut input: Box<dyn Read + 'static>, options: &SearchOptions) -> ::std::result::Result<(), Error> {
    let mut buffer = String::new();
    input.read_to_string(&mut buffer)?;
    let hills: Hills = buffer.parse()?;
    info!(start = %hills.start, summit = %hills.summit, "parsed height map");

    let steps = hills
        .climb(options)?
        .ok_or_else(|| anyhow!("No route to the summit"))?;
    println!("Part 1: {} steps from the start", steps);

    let steps = hills
        .scenic(options)?
        .ok_or_else(|| anyhow!("No lowest cell connects to the summit"))?;
    println!("Part 2: {} steps from the best trailhead", steps);

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use searcher::SearchError;

    const SAMPLE: &str = "
        Sabqponm
        abcryxxl
        accszExk
        acctuvwj
        abdefghi
    ";

    #[test]
    fn examples_part1() {
        let hills: Hills = SAMPLE.parse().unwrap();
        assert_eq!(hills.climb(&SearchOptions::default()), Ok(Some(31)));
    }

    #[test]
    fn examples_part2() {
        let hills: Hills = SAMPLE.parse().unwrap();
        assert_eq!(hills.scenic(&SearchOptions::default()), Ok(Some(29)));
    }

    #[test]
    fn breadth_first_agrees() {
        let hills: Hills = SAMPLE.parse().unwrap();
        let path = bfs::build_by_key(
            hills.start,
            |p: &Point| hills.upwards(p).into_iter().map(|(n, _)| n).collect::<Vec<_>>(),
            |p: &Point| *p,
        )
        .solve(|p| *p == hills.summit)
        .unwrap()
        .path;
        assert_eq!(path.len(), 31);
        assert_eq!(path.last(), Some(&hills.summit));
    }

    #[test]
    fn cliff() {
        let hills: Hills = "SacE".parse().unwrap();
        assert_eq!(hills.climb(&SearchOptions::default()), Ok(None));
    }

    #[test]
    fn limited() {
        let hills: Hills = SAMPLE.parse().unwrap();
        let options = SearchOptions {
            limit: Some(5),
            ..SearchOptions::default()
        };
        assert_eq!(hills.climb(&options), Err(SearchError::StepLimitExhausted(5)));
    }

    #[test]
    fn markers() {
        assert!(matches!("abc".parse::<Hills>(), Err(HillsError::MissingStart)));
        assert!(matches!("Sbc".parse::<Hills>(), Err(HillsError::MissingSummit)));
        assert!(matches!("".parse::<Hills>(), Err(HillsError::Grid(_))));
    }

    #[test]
    fn unknown_heights() {
        assert!(matches!(
            "Sa~E".parse::<Hills>(),
            Err(HillsError::InvalidHeight { mark: '~', at }) if at == Point::new(2, 0)
        ));
        assert!(matches!(
            "SaBE".parse::<Hills>(),
            Err(HillsError::InvalidHeight { mark: 'B', .. })
        ));
    }
}
