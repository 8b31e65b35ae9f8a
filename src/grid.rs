//! Maze grid: typed cells, start and exit.
//!
//! A [`Grid`] is built once (usually by parsing a maze file) and is read-only
//! afterwards. Both search strategies borrow it immutably.

// Grid coordinates are signed so moves can step off the edge; indexing converts after a bounds check
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]

mod coord;
mod parse;

pub use coord::{Coord, Move};

use crate::error::{PathError, PathResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Type of a maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Open floor (`0`).
    Free,
    /// Wall (`1`).
    Blocked,
    /// Walkable but penalized (`B`).
    Bonus,
    /// Where routes begin (`S`).
    Start,
    /// Where routes end (`E`).
    Exit,
}

impl CellKind {
    /// Parse a single maze code.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            '0' => Some(Self::Free),
            '1' => Some(Self::Blocked),
            'B' => Some(Self::Bonus),
            'S' => Some(Self::Start),
            'E' => Some(Self::Exit),
            _ => None,
        }
    }

    /// The maze code for this kind.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Free => '0',
            Self::Blocked => '1',
            Self::Bonus => 'B',
            Self::Start => 'S',
            Self::Exit => 'E',
        }
    }

    /// Free, Start and Exit cells. Bonus cells are walkable too but carry a cost.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Free | Self::Start | Self::Exit)
    }
}

/// A square maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Side length.
    size: usize,
    /// Cells in row-major order.
    cells: Vec<CellKind>,
    start: Coord,
    exit: Coord,
}

impl Grid {
    /// Build a grid from rows of cells.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidConfiguration`] if the grid is empty or not
    /// square, or does not hold exactly one start and one exit.
    pub fn from_rows(rows: Vec<Vec<CellKind>>) -> PathResult<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(PathError::invalid("maze is empty"));
        }
        if size > i32::MAX as usize {
            return Err(PathError::invalid(format!("maze size {size} is too large")));
        }

        let mut cells = Vec::with_capacity(size * size);
        let mut start = None;
        let mut exit = None;

        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(PathError::invalid(format!(
                    "maze is not square: row {r} has {} cells, expected {size}",
                    row.len()
                )));
            }
            for (c, kind) in row.into_iter().enumerate() {
                let here = Coord::new(r as i32, c as i32);
                match kind {
                    CellKind::Start if start.replace(here).is_some() => {
                        return Err(PathError::invalid("maze has more than one start cell"));
                    }
                    CellKind::Exit if exit.replace(here).is_some() => {
                        return Err(PathError::invalid("maze has more than one exit cell"));
                    }
                    _ => {}
                }
                cells.push(kind);
            }
        }

        let start = start.ok_or_else(|| PathError::invalid("maze has no start cell"))?;
        let exit = exit.ok_or_else(|| PathError::invalid("maze has no exit cell"))?;

        Ok(Self {
            size,
            cells,
            start,
            exit,
        })
    }

    /// Read and parse a maze file.
    ///
    /// # Errors
    ///
    /// I/O failures and malformed content both surface as
    /// [`PathError::InvalidConfiguration`].
    pub fn load(path: &Path) -> PathResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            PathError::invalid(format!("failed to read {}: {e}", path.display()))
        })?;
        text.parse()
    }

    /// Side length of the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// The start cell.
    #[must_use]
    pub const fn start(&self) -> Coord {
        self.start
    }

    /// The exit cell.
    #[must_use]
    pub const fn exit(&self) -> Coord {
        self.exit
    }

    /// Check if a coordinate lies inside the grid.
    #[must_use]
    #[inline]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.row >= 0
            && coord.col >= 0
            && (coord.row as usize) < self.size
            && (coord.col as usize) < self.size
    }

    /// Row-major index of a coordinate, for per-cell side tables.
    #[must_use]
    #[inline]
    pub(crate) fn cell_index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(coord.row as usize * self.size + coord.col as usize)
        } else {
            None
        }
    }

    /// Kind of the cell at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::OutOfBounds`] outside `[0, size) x [0, size)`.
    pub fn cell_at(&self, coord: Coord) -> PathResult<CellKind> {
        self.get(coord).ok_or(PathError::OutOfBounds {
            coord,
            size: self.size,
        })
    }

    /// Kind of the cell at `coord`, or `None` when out of bounds.
    #[must_use]
    #[inline]
    pub fn get(&self, coord: Coord) -> Option<CellKind> {
        self.cell_index(coord).map(|i| self.cells[i])
    }

    /// True iff the cell is in bounds and Free, Start or Exit.
    #[must_use]
    pub fn is_walkable(&self, coord: Coord) -> bool {
        self.get(coord).is_some_and(CellKind::is_walkable)
    }

    /// Number of cells of the given kind.
    #[must_use]
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&k| k == kind).count()
    }

    /// Moves each agent gets: the number of Free and Start cells, at least one.
    #[must_use]
    pub fn move_budget(&self) -> usize {
        (self.count(CellKind::Free) + self.count(CellKind::Start)).max(1)
    }

    /// Iterate over rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellKind]> {
        self.cells.chunks(self.size)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.size)?;
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(|k| k.code().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Grid {
        "4\nE 0 0 0\n1 B 1 0\n0 0 0 0\n1 B S 1\n".parse().unwrap()
    }

    #[test]
    fn test_start_and_exit() {
        let grid = scenario();
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.start(), Coord::new(3, 2));
        assert_eq!(grid.exit(), Coord::new(0, 0));
    }

    #[test]
    fn test_cell_at_bounds() {
        let grid = scenario();
        assert_eq!(grid.cell_at(Coord::new(1, 1)), Ok(CellKind::Bonus));
        assert_eq!(grid.cell_at(Coord::new(3, 3)), Ok(CellKind::Blocked));
        assert_eq!(
            grid.cell_at(Coord::new(-1, 0)),
            Err(PathError::OutOfBounds {
                coord: Coord::new(-1, 0),
                size: 4
            })
        );
        assert!(grid.cell_at(Coord::new(0, 4)).is_err());
    }

    #[test]
    fn test_walkable() {
        let grid = scenario();
        assert!(grid.is_walkable(Coord::new(0, 0)));
        assert!(grid.is_walkable(Coord::new(3, 2)));
        assert!(grid.is_walkable(Coord::new(2, 0)));
        assert!(!grid.is_walkable(Coord::new(1, 1)));
        assert!(!grid.is_walkable(Coord::new(1, 0)));
        assert!(!grid.is_walkable(Coord::new(4, 0)));
    }

    #[test]
    fn test_move_budget_counts_free_and_start() {
        assert_eq!(scenario().move_budget(), 9);
    }

    #[test]
    fn test_from_rows_rejects_bad_layouts() {
        use CellKind::{Exit, Free, Start};

        assert!(Grid::from_rows(Vec::new()).is_err());
        assert!(Grid::from_rows(vec![vec![Start, Exit], vec![Free]]).is_err());
        assert!(Grid::from_rows(vec![vec![Start, Free], vec![Free, Free]]).is_err());
        assert!(Grid::from_rows(vec![vec![Start, Start], vec![Exit, Free]]).is_err());
        assert!(Grid::from_rows(vec![vec![Start, Exit], vec![Free, Free]]).is_ok());
    }

    #[test]
    fn test_display_round_trips() {
        let grid = scenario();
        let reparsed: Grid = grid.to_string().parse().unwrap();
        assert_eq!(reparsed, grid);
    }
}
