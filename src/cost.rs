//! Step costs and the octile heuristic.
//!
//! Costs are fixed-point: a straight step costs 10 and a diagonal step 14,
//! approximating `sqrt(2)` without floating point.

use crate::grid::{CellKind, Coord, Grid};
use serde::{Deserialize, Serialize};

/// Cost of one orthogonal step.
pub const STRAIGHT_COST: u32 = 10;

/// Cost of one diagonal step.
pub const DIAGONAL_COST: u32 = 14;

/// Octile distance between two coordinates.
///
/// Admissible and consistent for 8-directional movement with the costs above.
#[must_use]
#[inline]
pub const fn heuristic(a: Coord, b: Coord) -> u32 {
    let dx = a.row.abs_diff(b.row);
    let dy = a.col.abs_diff(b.col);
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    DIAGONAL_COST * lo + STRAIGHT_COST * (hi - lo)
}

/// How A* treats Bonus cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BonusPolicy {
    /// Bonus cells are not walkable.
    #[default]
    Avoid,
    /// Bonus cells are walkable at the normal step cost plus `surcharge`.
    Traverse {
        /// Extra cost for entering a Bonus cell.
        surcharge: u32,
    },
}

/// Cost model shared by both search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostModel {
    /// Treatment of Bonus cells.
    #[serde(default)]
    pub bonus: BonusPolicy,
}

impl CostModel {
    /// Model that routes through Bonus cells at the given surcharge.
    #[must_use]
    pub const fn traversing_bonus(surcharge: u32) -> Self {
        Self {
            bonus: BonusPolicy::Traverse { surcharge },
        }
    }

    /// Heuristic estimate from `from` to `to`.
    #[must_use]
    #[inline]
    pub const fn estimate(&self, from: Coord, to: Coord) -> u32 {
        heuristic(from, to)
    }

    /// Whether a route may enter `coord`.
    #[must_use]
    pub fn can_enter(&self, grid: &Grid, coord: Coord) -> bool {
        match grid.get(coord) {
            Some(CellKind::Bonus) => matches!(self.bonus, BonusPolicy::Traverse { .. }),
            Some(kind) => kind.is_walkable(),
            None => false,
        }
    }

    /// Cost of stepping from `from` into the adjacent cell `to`.
    ///
    /// Returns `None` when `to` cannot be entered.
    #[must_use]
    pub fn step_cost(&self, grid: &Grid, from: Coord, to: Coord) -> Option<u32> {
        if !self.can_enter(grid, to) {
            return None;
        }
        let base = heuristic(from, to);
        match (grid.get(to), self.bonus) {
            (Some(CellKind::Bonus), BonusPolicy::Traverse { surcharge }) => {
                Some(base.saturating_add(surcharge))
            }
            _ => Some(base),
        }
    }

    /// Total cost of walking `path` step by step.
    ///
    /// Returns `None` if any step enters a cell this model forbids.
    #[must_use]
    pub fn path_cost(&self, grid: &Grid, path: &[Coord]) -> Option<u32> {
        path.windows(2)
            .try_fold(0u32, |acc, w| Some(acc + self.step_cost(grid, w[0], w[1])?))
    }
}
