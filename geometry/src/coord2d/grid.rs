//! Character grids parsed from text.
//!
//! Each line of the input is a row, and each character a cell. The first
//! row is `y = 0` and the first column `x = 0`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::{BoundingBox, Point};

/// Error when parsing a grid from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseGridError {
    #[error("Grid has no rows")]
    Empty,

    #[error("Row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A rectangular grid of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<char>,
    width: usize,
    height: usize,
}

impl Grid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::sized(self.width, self.height)
    }

    fn index(&self, point: Point) -> Option<usize> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as usize, point.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// The character at `point`, or `None` off the grid.
    pub fn get(&self, point: Point) -> Option<char> {
        self.index(point).map(|i| self.cells[i])
    }

    /// Every point on the grid, in reading order.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        self.bbox().points()
    }

    /// The first point holding `target`, in reading order.
    pub fn find(&self, target: char) -> Option<Point> {
        self.find_all(target).next()
    }

    /// All points holding `target`, in reading order.
    pub fn find_all(&self, target: char) -> impl Iterator<Item = Point> + '_ {
        self.points()
            .filter(move |p| self.get(*p) == Some(target))
    }

    /// Neighbors of `point` which lie on the grid, in reading order.
    pub fn neighbors(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        point.adjacent().filter(move |p| self.index(*p).is_some())
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;

        for line in s.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let row: Vec<char> = line.chars().collect();
            let expected = *width.get_or_insert(row.len());
            if row.len() != expected {
                return Err(ParseGridError::Ragged {
                    row: height,
                    expected,
                    found: row.len(),
                });
            }
            cells.extend(row);
            height += 1;
        }

        match width {
            Some(width) => Ok(Grid {
                cells,
                width,
                height,
            }),
            None => Err(ParseGridError::Empty),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.bbox().printer(f, |f, p| {
            write!(f, "{}", self.get(*p).unwrap_or(' '))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        let grid: Grid = "
            ab.
            c#d
        "
        .parse()
        .unwrap();

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(Point::new(1, 1)), Some('#'));
        assert_eq!(grid.get(Point::new(3, 0)), None);
        assert_eq!(grid.get(Point::new(-1, 0)), None);
        assert_eq!(grid.find('d'), Some(Point::new(2, 1)));
        assert_eq!(grid.find('z'), None);
        assert_eq!(grid.to_string(), "ab.\nc#d\n");
    }

    #[test]
    fn errors() {
        assert_eq!("".parse::<Grid>(), Err(ParseGridError::Empty));
        assert_eq!(
            "abc\nab".parse::<Grid>(),
            Err(ParseGridError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn neighbors() {
        let grid: Grid = "...\n..x".parse().unwrap();
        assert_eq!(
            grid.neighbors(Point::new(0, 0)).collect::<Vec<_>>(),
            vec![Point::new(1, 0), Point::new(0, 1)]
        );
        assert_eq!(grid.neighbors(Point::new(2, 1)).count(), 2);
        assert_eq!(grid.find_all('x').collect::<Vec<_>>(), vec![Point::new(2, 1)]);
        assert_eq!(grid.find('.'), Some(Point::new(0, 0)));
    }
}
