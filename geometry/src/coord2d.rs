//! Coordinate work in two dimensions.

use std::cmp;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use itertools::iproduct;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::Position;

pub mod grid;
pub mod map;
pub mod pathfinder;

/// A movement direction in two dimensions.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Right,
    Direction::Down,
];

impl Direction {
    /// Enumerates all directions of movement in "reading order",
    /// i.e. such that the resulting points are in reading order
    /// from the current position.
    pub fn all() -> impl Iterator<Item = Self> {
        DIRECTIONS.iter().cloned()
    }
}

/// A location in 2D space, with y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: Position,
    pub y: Position,
}

impl Point {
    pub fn new(x: Position, y: Position) -> Self {
        Self { x, y }
    }

    /// Step in a given direction.
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Left => Self::new(self.x - 1, self.y),
            Direction::Right => Self::new(self.x + 1, self.y),
            Direction::Up => Self::new(self.x, self.y - 1),
            Direction::Down => Self::new(self.x, self.y + 1),
        }
    }

    /// Iterate over all adjacent points, in reading order.
    pub fn adjacent(self) -> impl Iterator<Item = Self> {
        Direction::all().map(move |d| self.step(d))
    }

    /// Distance along each axis, summed.
    pub fn manhattan_distance(self, other: Point) -> Position {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn is_adjacent(&self, other: &Point) -> bool {
        self.manhattan_distance(*other) == 1
    }
}

impl cmp::Ord for Point {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl cmp::PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl From<(Position, Position)> for Point {
    fn from(coordinates: (Position, Position)) -> Self {
        Self::new(coordinates.0, coordinates.1)
    }
}

/// Error when parsing a point from string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParsePointError {
    #[error("Invalid Point: {}", _0)]
    InvalidLiteral(String),

    #[error("Invalid Number Literal")]
    InvalidNumber,
}

impl From<::std::num::ParseIntError> for ParsePointError {
    fn from(_: ::std::num::ParseIntError) -> Self {
        ParsePointError::InvalidNumber
    }
}

impl FromStr for Point {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref RE: Regex = Regex::new(r"^\s*(?P<x>-?\d+)\s*,\s*(?P<y>-?\d+)\s*$").unwrap();
        };

        let cap = match RE.captures(s) {
            None => return Err(ParsePointError::InvalidLiteral(s.to_string())),
            Some(c) => c,
        };

        Ok(Self::new(cap["x"].parse()?, cap["y"].parse()?))
    }
}

/// A rectangle which encloses points and is aligned
/// with the coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    left: Position,
    right: Position,
    top: Position,
    bottom: Position,
}

impl BoundingBox {
    /// Box spanning `width` columns and `height` rows from the origin.
    pub fn sized(width: usize, height: usize) -> Self {
        Self {
            left: 0,
            right: width as Position - 1,
            top: 0,
            bottom: height as Position - 1,
        }
    }

    pub fn vertical(&self) -> RangeInclusive<Position> {
        self.top..=self.bottom
    }

    pub fn horizontal(&self) -> RangeInclusive<Position> {
        self.left..=self.right
    }

    /// Check if a point is contained within this bounding
    /// box, including the edges.
    pub fn contains(&self, point: Point) -> bool {
        self.horizontal().contains(&point.x) && self.vertical().contains(&point.y)
    }

    /// Iterate through all the points in this box, in reading order.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        iproduct!(self.vertical(), self.horizontal()).map(|(y, x)| Point::new(x, y))
    }

    /// Call a function which writes a single character at every position
    /// in this bounding box, one row per line.
    pub fn printer<F>(&self, f: &mut fmt::Formatter, cb: F) -> fmt::Result
    where
        F: Fn(&mut fmt::Formatter, &Point) -> fmt::Result,
    {
        for y in self.vertical() {
            for x in self.horizontal() {
                cb(f, &Point::new(x, y))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point() {
        let point = Point::new(1, 1);

        assert_eq!(point.step(Direction::Up), Point::new(1, 0));
        assert_eq!(point.step(Direction::Down), Point::new(1, 2));
        assert_eq!(point.step(Direction::Left), Point::new(0, 1));
        assert_eq!(point.step(Direction::Right), Point::new(2, 1));

        assert_eq!(&point.to_string(), "1,1");

        assert_eq!(
            point.adjacent().collect::<Vec<_>>(),
            vec![
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(1, 2)
            ]
        );
        assert_eq!(Point::from((1, 1)), point);
        assert!(Point::new(0, 2) < Point::new(1, 1));
    }

    #[test]
    fn parse() {
        assert_eq!("3,4".parse::<Point>(), Ok(Point::new(3, 4)));
        assert_eq!(" -2, 7 ".parse::<Point>(), Ok(Point::new(-2, 7)));
        assert_eq!(
            "3;4".parse::<Point>(),
            Err(ParsePointError::InvalidLiteral("3;4".to_string()))
        );
        assert_eq!(
            "99999999999,1".parse::<Point>(),
            Err(ParsePointError::InvalidNumber)
        );
    }

    #[test]
    fn distance() {
        let a = Point::new(0, 0);
        let b = Point::new(3, -4);
        assert_eq!(a.manhattan_distance(b), 7);
        assert!(a.is_adjacent(&Point::new(0, 1)));
        assert!(!a.is_adjacent(&Point::new(1, 1)));
    }

    #[test]
    fn bbox() {
        let bbox = BoundingBox::sized(2, 2);

        assert_eq!(bbox.horizontal(), 0..=1);
        assert_eq!(bbox.vertical(), 0..=1);
        assert!(bbox.contains(Point::new(1, 1)));
        assert!(!bbox.contains(Point::new(2, 0)));
        assert!(!bbox.contains(Point::new(0, -1)));

        assert_eq!(
            bbox.points().collect::<Vec<_>>(),
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(1, 1)
            ]
        );
        assert_eq!(BoundingBox::sized(3, 2).points().count(), 6);
    }
}
