//! Maze text format.
//!
//! ```text
//! 4
//! E 0 0 0
//! 1 B 1 0
//! 0 0 0 0
//! 1 B S 1
//! ```
//!
//! The first line holds the side length `N`; the next `N` lines hold `N` cell
//! codes each, with or without separating spaces.

use super::{CellKind, Grid};
use crate::error::PathError;
use std::str::FromStr;

impl FromStr for Grid {
    type Err = PathError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut lines = text.lines().enumerate().skip_while(|(_, l)| l.trim().is_empty());

        let (_, header) = lines
            .next()
            .ok_or_else(|| PathError::invalid("maze file is empty"))?;
        let size: usize = header.trim().parse().map_err(|_| {
            PathError::invalid(format!("line 1: expected maze size, found {:?}", header.trim()))
        })?;
        if size == 0 {
            return Err(PathError::invalid("line 1: maze size must be positive"));
        }

        let mut rows = Vec::with_capacity(size);
        for (idx, line) in lines {
            let lineno = idx + 1;
            if rows.len() == size {
                if line.trim().is_empty() {
                    continue;
                }
                return Err(PathError::invalid(format!(
                    "line {lineno}: unexpected content after {size} maze rows"
                )));
            }

            let row = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| {
                    CellKind::from_code(c).ok_or_else(|| {
                        PathError::invalid(format!("line {lineno}: unknown cell code {c:?}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if row.len() != size {
                return Err(PathError::invalid(format!(
                    "line {lineno}: expected {size} cells, found {}",
                    row.len()
                )));
            }
            rows.push(row);
        }

        if rows.len() != size {
            return Err(PathError::invalid(format!(
                "expected {size} maze rows, found {}",
                rows.len()
            )));
        }

        Grid::from_rows(rows)
    }
}
