// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Pathfinder: route finding through square mazes.
//!
//! Two strategies share one grid model and one trace interface:
//! - [`AStarSearch`] finds a cost-optimal route with the octile heuristic
//! - [`EvolutionarySearch`] evolves fixed-length move lists until one walks
//!   from start to exit without a single penalty
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   AStarSearch │ EvolutionarySearch  │
//! ├─────────────────────────────────────┤
//! │     CostModel │ ScoringConfig       │
//! ├─────────────────────────────────────┤
//! │   Grid (Coord, Move, CellKind)      │
//! └─────────────────────────────────────┘
//!           │ TraceSink │
//! ```
//!
//! # Example
//!
//! ```
//! use pathfinder::{AStarSearch, Grid};
//!
//! let grid: Grid = "4\nE 0 0 0\n1 B 1 0\n0 0 0 0\n1 B S 1\n".parse()?;
//! let outcome = AStarSearch::new().search(&grid, grid.start(), grid.exit())?;
//! assert_eq!(outcome.cost, 58);
//! # Ok::<(), pathfinder::PathError>(())
//! ```

pub mod astar;
pub mod cost;
pub mod error;
pub mod genetic;
pub mod grid;
pub mod trace;

pub use astar::{AStarOutcome, AStarSearch};
pub use cost::{heuristic, BonusPolicy, CostModel, DIAGONAL_COST, STRAIGHT_COST};
pub use error::{PathError, PathResult};
pub use genetic::{
    Agent, BlockedPolicy, EvolutionarySearch, GenerationStats, GeneticConfig, ScoringConfig, Solution,
};
pub use grid::{CellKind, Coord, Grid, Move};
pub use trace::{FileSink, LogSink, NullSink, TraceEvent, TraceSink};
