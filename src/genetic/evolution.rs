//! Generational loop of the evolutionary search.
//!
//! Each generation is evaluated, checked for a solution, then replaced by a
//! new population built from an elite copy of its best agent plus children
//! of tournament-selected parents, a share of which are mutated.

use crate::cost::heuristic;
use crate::error::{PathError, PathResult};
use crate::genetic::agent::Agent;
use crate::genetic::population::Population;
use crate::genetic::scoring::ScoringConfig;
use crate::grid::{Coord, Grid, Move};
use crate::trace::{emit, NullSink, TraceEvent, TraceSink};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Smallest population the selection scheme works with: the elite plus two
/// distinct parents.
pub const MIN_AGENTS: usize = 3;

/// Configuration for the evolutionary search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    /// Maximum number of generations to evaluate.
    pub generations: usize,
    /// Agents per generation.
    pub agents: usize,
    /// Percentage of agents mutated each generation.
    pub agent_mutation_ratio: u32,
    /// Percentage of moves rewritten in a mutated agent.
    pub movement_mutation_ratio: u32,
    /// Moves per agent. Defaults to the grid's move budget.
    pub moves: Option<usize>,
    /// RNG seed for reproducibility.
    pub seed: u64,
    /// Penalties used to score agents.
    pub scoring: ScoringConfig,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            generations: 100,
            agents: 10,
            agent_mutation_ratio: 60,
            movement_mutation_ratio: 10,
            moves: None,
            seed: 42,
            scoring: ScoringConfig::default(),
        }
    }
}

impl GeneticConfig {
    /// Check the configuration before any search starts.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidConfiguration`] describing the first bad field.
    pub fn validate(&self) -> PathResult<()> {
        if self.generations == 0 {
            return Err(PathError::invalid("generations must be at least 1"));
        }
        if self.agents < MIN_AGENTS {
            return Err(PathError::invalid(format!(
                "agents must be at least {MIN_AGENTS}, got {}",
                self.agents
            )));
        }
        if self.agent_mutation_ratio > 100 {
            return Err(PathError::invalid(format!(
                "agent mutation ratio must be within 0..=100, got {}",
                self.agent_mutation_ratio
            )));
        }
        if self.movement_mutation_ratio > 100 {
            return Err(PathError::invalid(format!(
                "movement mutation ratio must be within 0..=100, got {}",
                self.movement_mutation_ratio
            )));
        }
        if self.moves == Some(0) {
            return Err(PathError::invalid("moves per agent must be at least 1"));
        }
        Ok(())
    }
}

/// Summary of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationStats {
    /// Zero-based generation number.
    pub generation: usize,
    /// Lowest score.
    pub best_score: u32,
    /// Mean score.
    pub mean_score: f64,
    /// Agents whose walk entered the exit.
    pub reached_exit: usize,
    /// Smallest octile distance from any agent's final position to the exit.
    pub closest: u32,
}

impl GenerationStats {
    fn of(generation: usize, population: &Population, exit: Coord) -> Self {
        Self {
            generation,
            best_score: population.best().map_or(0, Agent::score),
            mean_score: population.mean_score(),
            reached_exit: population.reached_exit(),
            closest: population
                .agents()
                .iter()
                .map(|a| heuristic(a.position(), exit))
                .min()
                .unwrap_or(0),
        }
    }
}

/// A zero-penalty agent and the generation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    agent: Agent,
    generation: usize,
}

impl Solution {
    /// The solving agent.
    #[must_use]
    pub const fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Generation in which it was evaluated.
    #[must_use]
    pub const fn generation(&self) -> usize {
        self.generation
    }

    /// Coordinates walked, start to exit.
    #[must_use]
    pub fn trail(&self) -> &[Coord] {
        self.agent.trail()
    }

    /// Moves actually used to reach the exit.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        self.agent.used_moves()
    }

    /// Where the walk ended.
    #[must_use]
    pub const fn terminal(&self) -> Coord {
        self.agent.position()
    }
}

/// Genetic route finder.
#[derive(Debug)]
pub struct EvolutionarySearch<S = NullSink> {
    config: GeneticConfig,
    sink: S,
    history: Vec<GenerationStats>,
}

impl EvolutionarySearch<NullSink> {
    /// Create a search without tracing.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidConfiguration`] if `config` is invalid.
    pub fn new(config: GeneticConfig) -> PathResult<Self> {
        Self::with_sink(config, NullSink)
    }
}

impl<S: TraceSink> EvolutionarySearch<S> {
    /// Create a search that traces into `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidConfiguration`] if `config` is invalid.
    pub fn with_sink(config: GeneticConfig, sink: S) -> PathResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sink,
            history: Vec::new(),
        })
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// Per-generation statistics of the last run.
    #[must_use]
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// Give the sink back to the caller.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Evolve agents until one reaches the exit with score 0.
    ///
    /// The run is fully determined by the grid and the configuration,
    /// including its seed.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NoSolutionFound`] when the generation limit is
    /// reached without a solution.
    pub fn find_path(&mut self, grid: &Grid) -> PathResult<Solution> {
        let config = &self.config;
        let sink = &mut self.sink;
        let history = &mut self.history;
        history.clear();

        let start = grid.start();
        let exit = grid.exit();
        let num_moves = config.moves.unwrap_or_else(|| grid.move_budget());
        let mut rng = SmallRng::seed_from_u64(config.seed);

        emit(
            sink,
            &TraceEvent::SearchStarted {
                strategy: "genetic",
                start,
                exit,
            },
        );
        log::debug!(
            "evolving {} agents of {num_moves} moves for up to {} generations (seed {})",
            config.agents,
            config.generations,
            config.seed
        );

        let mut current = Population::new("current", config.agents, num_moves);
        let mut next = Population::new("next", config.agents, num_moves);
        current.seed(start, &mut rng);

        for generation in 0..config.generations {
            emit(sink, &TraceEvent::Generation { generation });
            current.evaluate(grid, &config.scoring);
            let stats = GenerationStats::of(generation, &current, exit);
            history.push(stats);
            log::trace!(
                "generation {generation}: best {} mean {:.1} reached {}",
                stats.best_score,
                stats.mean_score,
                stats.reached_exit
            );

            if generation == 0 {
                emit(
                    sink,
                    &TraceEvent::Population {
                        label: current.label(),
                        agents: current.agents(),
                    },
                );
            }

            if let Some(agent) = current.solution() {
                emit(
                    sink,
                    &TraceEvent::Population {
                        label: current.label(),
                        agents: current.agents(),
                    },
                );
                emit(sink, &TraceEvent::Solved { generation, agent });
                log::debug!(
                    "solved at generation {generation} by agent {} in {} steps",
                    agent.id(),
                    agent.trail().len().saturating_sub(1)
                );
                return Ok(Solution {
                    agent: agent.clone(),
                    generation,
                });
            }

            let Some(best) = current.best() else {
                break;
            };
            emit(sink, &TraceEvent::BestAgent { agent: best });
            next.push(best.elite_clone(start));

            for child in 1..config.agents {
                let father = current.select_parent(None, &mut rng);
                let mother = current.select_parent(Some(father), &mut rng);
                emit(
                    sink,
                    &TraceEvent::Parents {
                        child,
                        father,
                        mother,
                    },
                );
                next.push(current.breed(child, father, mother, start, &mut rng));
            }

            let mutated = next.mutate(
                config.agent_mutation_ratio,
                config.movement_mutation_ratio,
                &mut rng,
            );
            for record in &mutated {
                emit(
                    sink,
                    &TraceEvent::Mutated {
                        agent: record.agent,
                        positions: &record.positions,
                    },
                );
            }

            current.replace_with(&mut next);
        }

        emit(
            sink,
            &TraceEvent::GaveUp {
                generations: history.len(),
            },
        );
        log::debug!("no solution after {} generations", history.len());
        Err(PathError::NoSolutionFound {
            generations: history.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetic::scoring::BlockedPolicy;

    fn scenario() -> Grid {
        "4\nE 0 0 0\n1 B 1 0\n0 0 0 0\n1 B S 1\n".parse().unwrap()
    }

    fn strong_config(seed: u64) -> GeneticConfig {
        GeneticConfig {
            generations: 500,
            agents: 50,
            agent_mutation_ratio: 50,
            movement_mutation_ratio: 20,
            seed,
            ..GeneticConfig::default()
        }
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        let ok = GeneticConfig::default();
        assert!(ok.validate().is_ok());

        for bad in [
            GeneticConfig { agents: 2, ..ok },
            GeneticConfig { generations: 0, ..ok },
            GeneticConfig { agent_mutation_ratio: 101, ..ok },
            GeneticConfig { movement_mutation_ratio: 200, ..ok },
            GeneticConfig { moves: Some(0), ..ok },
        ] {
            assert!(matches!(
                EvolutionarySearch::new(bad),
                Err(PathError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_solves_scenario() {
        let grid = scenario();
        let mut search = EvolutionarySearch::new(strong_config(42)).unwrap();
        let solution = search.find_path(&grid).unwrap();

        assert_eq!(solution.agent().score(), 0);
        assert!(solution.agent().found_exit());
        assert_eq!(solution.terminal(), grid.exit());
        assert_eq!(solution.trail().first(), Some(&grid.start()));
        assert!(solution.trail().iter().all(|&c| grid.is_walkable(c)));
        assert_eq!(solution.moves().len() + 1, solution.trail().len());
        assert_eq!(search.history().len(), solution.generation() + 1);
    }

    #[test]
    fn test_same_seed_same_run() {
        let grid = scenario();
        let run = |seed| {
            let mut search = EvolutionarySearch::new(GeneticConfig {
                generations: 30,
                seed,
                ..GeneticConfig::default()
            })
            .unwrap();
            let result = search.find_path(&grid);
            (result, search.history().to_vec())
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn test_elite_never_gets_worse() {
        let grid = scenario();
        let mut search = EvolutionarySearch::new(GeneticConfig {
            generations: 60,
            agents: 6,
            seed: 3,
            ..GeneticConfig::default()
        })
        .unwrap();
        // Solved or not, every evaluated generation is in the history
        let generations = match search.find_path(&grid) {
            Ok(solution) => solution.generation() + 1,
            Err(_) => 60,
        };
        assert_eq!(search.history().len(), generations);
        for w in search.history().windows(2) {
            assert!(w[1].best_score <= w[0].best_score, "{:?} -> {:?}", w[0], w[1]);
        }
    }

    #[test]
    fn test_gives_up_on_unreachable_exit() {
        let grid: Grid = "3\nS 0 1\n0 1 1\n1 1 E\n".parse().unwrap();
        let mut search = EvolutionarySearch::new(GeneticConfig {
            generations: 5,
            ..GeneticConfig::default()
        })
        .unwrap();
        assert_eq!(
            search.find_path(&grid),
            Err(PathError::NoSolutionFound { generations: 5 })
        );
        assert_eq!(search.history().len(), 5);
        assert!(search.history().iter().all(|s| s.reached_exit == 0));
    }

    #[test]
    fn test_end_walk_policy_still_solves() {
        let grid = scenario();
        let solved = (0..3).any(|seed| {
            let mut config = strong_config(seed);
            config.scoring.blocked = BlockedPolicy::EndWalk { penalty: 5 };
            EvolutionarySearch::new(config).unwrap().find_path(&grid).is_ok()
        });
        assert!(solved);
    }

    #[test]
    fn test_trace_records_generations() {
        let grid = scenario();
        let mut lines: Vec<String> = Vec::new();
        let mut search = EvolutionarySearch::with_sink(
            GeneticConfig {
                generations: 2,
                agents: 3,
                seed: 1,
                ..GeneticConfig::default()
            },
            &mut lines,
        )
        .unwrap();
        let result = search.find_path(&grid);
        drop(search);

        assert!(lines[0].starts_with("//// genetic search from (3, 2) to (0, 0)"));
        assert_eq!(lines[1], "//// Generation: 0");
        assert_eq!(lines[2], "[POPULATION] current:");
        if result.is_err() {
            assert!(lines.iter().any(|l| l.starts_with("[CROSSOVER] child 1:")));
            assert_eq!(
                lines.last().map(String::as_str),
                Some("No path found after 2 generations")
            );
        }
    }
}
