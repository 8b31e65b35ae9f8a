//! Coordinates and the move table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Row, growing downwards.
    pub row: i32,
    /// Column, growing rightwards.
    pub col: i32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Coordinate reached by applying `mv` once.
    #[must_use]
    #[inline]
    pub const fn step(self, mv: Move) -> Self {
        let (dr, dc) = mv.delta();
        Self::new(self.row + dr, self.col + dc)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the eight compass moves.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Up one row.
    N,
    /// Down one row.
    S,
    /// Right one column.
    E,
    /// Left one column.
    W,
    /// Up and right.
    NE,
    /// Up and left.
    NW,
    /// Down and right.
    SE,
    /// Down and left.
    SW,
}

/// Row/column offsets indexed by `Move as usize`.
const DELTAS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, -1),
    (1, 1),
    (1, -1),
];

impl Move {
    /// Every move, in table order.
    pub const ALL: [Move; 8] = [
        Move::N,
        Move::S,
        Move::E,
        Move::W,
        Move::NE,
        Move::NW,
        Move::SE,
        Move::SW,
    ];

    /// `(d_row, d_col)` for this move.
    #[must_use]
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        DELTAS[self as usize]
    }

    /// Whether the move changes both row and column.
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        matches!(self, Move::NE | Move::NW | Move::SE | Move::SW)
    }

    /// Compass symbol, e.g. `"NE"`.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Move::N => "N",
            Move::S => "S",
            Move::E => "E",
            Move::W => "W",
            Move::NE => "NE",
            Move::NW => "NW",
            Move::SE => "SE",
            Move::SW => "SW",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
