//! Evolutionary route finding.
//!
//! Candidate routes are [`Agent`]s: fixed-length lists of compass moves. A
//! [`Population`] of agents is walked over the grid and scored with additive
//! penalties, then bred into the next generation until some agent reaches
//! the exit with a score of zero.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │       EvolutionarySearch loop       │
//! ├─────────────────────────────────────┤
//! │  Elitism │ Tournament │ Crossover   │
//! │          │ selection  │ + Mutation  │
//! ├─────────────────────────────────────┤
//! │   Population → Agent walk + score   │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use pathfinder::genetic::{EvolutionarySearch, GeneticConfig};
//! use pathfinder::grid::Grid;
//!
//! let grid: Grid = "3\nS 0 0\n0 0 0\n0 0 E\n".parse()?;
//! let config = GeneticConfig { generations: 300, agents: 20, ..GeneticConfig::default() };
//! let mut search = EvolutionarySearch::new(config)?;
//! if let Ok(solution) = search.find_path(&grid) {
//!     assert_eq!(solution.terminal(), grid.exit());
//! }
//! # Ok::<(), pathfinder::PathError>(())
//! ```

mod agent;
mod crossover;
mod evolution;
mod mutation;
mod population;
mod scoring;
mod selection;

pub use agent::{Agent, StepOutcome};
pub use crossover::uniform_crossover;
pub use evolution::{EvolutionarySearch, GenerationStats, GeneticConfig, Solution, MIN_AGENTS};
pub use mutation::{different_move, mutate_moves, mutation_count, pick_agents, MutationRecord};
pub use population::Population;
pub use scoring::{BlockedPolicy, ScoringConfig};
pub use selection::{select_elite, tournament_select};
