//! A labelled, fixed-size set of agents.

// Mean score is reported as f64
#![allow(clippy::cast_precision_loss)]

use crate::genetic::agent::Agent;
use crate::genetic::crossover::uniform_crossover;
use crate::genetic::mutation::{mutate_moves, mutation_count, pick_agents, MutationRecord};
use crate::genetic::scoring::ScoringConfig;
use crate::genetic::selection::{select_elite, tournament_select};
use crate::grid::{Coord, Grid};
use rand::Rng;

/// Agents of one generation.
#[derive(Debug, Clone)]
pub struct Population {
    label: String,
    agents: Vec<Agent>,
    /// Target number of agents.
    size: usize,
    /// Moves per agent.
    move_length: usize,
}

impl Population {
    /// Create an empty population.
    #[must_use]
    pub fn new(label: impl Into<String>, size: usize, move_length: usize) -> Self {
        Self {
            label: label.into(),
            agents: Vec::with_capacity(size),
            size,
            move_length,
        }
    }

    /// Replace the contents with `size` random agents on `start`.
    pub fn seed<R: Rng>(&mut self, start: Coord, rng: &mut R) {
        self.agents.clear();
        for id in 0..self.size {
            self.agents
                .push(Agent::random(id, self.move_length, start, rng));
        }
    }

    /// Population label used in trace output.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current agents.
    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Target number of agents.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Moves per agent.
    #[must_use]
    pub const fn move_length(&self) -> usize {
        self.move_length
    }

    /// Number of agents currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether no agents are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Append an agent.
    pub fn push(&mut self, agent: Agent) {
        self.agents.push(agent);
    }

    /// Drop every agent.
    pub fn clear(&mut self) {
        self.agents.clear();
    }

    /// Move the agents of `next` into this population, leaving `next` empty.
    pub fn replace_with(&mut self, next: &mut Self) {
        std::mem::swap(&mut self.agents, &mut next.agents);
        next.agents.clear();
    }

    /// Walk and score every agent.
    pub fn evaluate(&mut self, grid: &Grid, scoring: &ScoringConfig) {
        for agent in &mut self.agents {
            agent.evaluate(grid, scoring);
        }
    }

    /// First agent that reached the exit with score 0.
    #[must_use]
    pub fn solution(&self) -> Option<&Agent> {
        self.agents.iter().find(|a| a.is_solution())
    }

    /// Index of the lowest-scoring agent, the first one on ties.
    #[must_use]
    pub fn best_index(&self) -> Option<usize> {
        select_elite(&self.scores())
    }

    /// The lowest-scoring agent.
    #[must_use]
    pub fn best(&self) -> Option<&Agent> {
        self.best_index().map(|i| &self.agents[i])
    }

    /// Scores in slot order.
    #[must_use]
    pub fn scores(&self) -> Vec<u32> {
        self.agents.iter().map(Agent::score).collect()
    }

    /// Mean score, 0 for an empty population.
    #[must_use]
    pub fn mean_score(&self) -> f64 {
        if self.agents.is_empty() {
            return 0.0;
        }
        let total: u64 = self.agents.iter().map(|a| u64::from(a.score())).sum();
        total as f64 / self.agents.len() as f64
    }

    /// Number of agents whose walk entered the exit.
    #[must_use]
    pub fn reached_exit(&self) -> usize {
        self.agents.iter().filter(|a| a.found_exit()).count()
    }

    /// Tournament-select a parent, never returning `excluded`.
    pub fn select_parent<R: Rng>(&self, excluded: Option<usize>, rng: &mut R) -> usize {
        tournament_select(&self.scores(), excluded, rng)
    }

    /// Breed a child of the agents at `father` and `mother` into slot `id`.
    pub fn breed<R: Rng>(
        &self,
        id: usize,
        father: usize,
        mother: usize,
        start: Coord,
        rng: &mut R,
    ) -> Agent {
        let moves = uniform_crossover(
            self.agents[father].moves(),
            self.agents[mother].moves(),
            rng,
        );
        Agent::new(id, moves, start)
    }

    /// Mutate a share of the agents, never the one in slot 0.
    ///
    /// `agent_ratio` percent of the population is picked, and in each picked
    /// agent `move_ratio` percent of its moves change (both rounded up).
    pub fn mutate<R: Rng>(
        &mut self,
        agent_ratio: u32,
        move_ratio: u32,
        rng: &mut R,
    ) -> Vec<MutationRecord> {
        let picked = pick_agents(self.agents.len(), agent_ratio, rng);
        picked
            .into_iter()
            .map(|slot| {
                let moves = self.agents[slot].moves_mut();
                let count = mutation_count(moves.len(), move_ratio);
                let positions = mutate_moves(moves, count, rng);
                MutationRecord {
                    agent: slot,
                    positions,
                }
            })
            .collect()
    }
}
