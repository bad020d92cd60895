use std::fmt;
use std::ops;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::EnumIter;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    // (row, col) offset. Rows grow downwards.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    // How "nothing selected" looks on screen and in logs.
    pub const NONE_SENTINEL: (i32, i32) = (-1, -1);

    pub const fn new(row: i32, col: i32) -> Self { Self { row, col } }

    pub fn step(self, direction: Direction) -> Self { self + direction.offset() }
}

impl ops::Add<(i32, i32)> for Coord {
    type Output = Self;
    fn add(self, other: (i32, i32)) -> Self::Output {
        Self { row: self.row + other.0, col: self.col + other.1 }
    }
}

impl ops::Sub for Coord {
    type Output = (i32, i32);
    fn sub(self, other: Self) -> Self::Output {
        (self.row - other.row, self.col - other.col)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({}, {})", self.row, self.col)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct BoardShape {
    pub num_rows: usize,
    pub num_cols: usize,
}

impl BoardShape {
    pub fn is_empty(self) -> bool { self.num_rows == 0 || self.num_cols == 0 }

    pub fn contains_coord(self, coord: Coord) -> bool {
        usize::try_from(coord.row).is_ok_and(|row| row < self.num_rows)
            && usize::try_from(coord.col).is_ok_and(|col| col < self.num_cols)
    }

    // Row-major. Coords beyond `i32::MAX` are not representable and are skipped.
    pub fn coords(self) -> impl Iterator<Item = Coord> {
        let num_rows = i32::try_from(self.num_rows).unwrap_or(i32::MAX);
        let num_cols = i32::try_from(self.num_cols).unwrap_or(i32::MAX);
        (0..num_rows)
            .cartesian_product(0..num_cols)
            .map(|(row, col)| Coord { row, col })
    }
}
