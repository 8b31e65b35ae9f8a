//! Agents: fixed-length move sequences walked over a grid.

use crate::genetic::scoring::{BlockedPolicy, ScoringConfig};
use crate::grid::{CellKind, Coord, Grid, Move};
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// What a single move did to an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The agent entered a new cell.
    Moved,
    /// The agent entered the exit; its walk is over.
    ReachedExit,
    /// The move was rejected and the agent kept its position.
    Stayed,
    /// The move was rejected and the walk ended.
    Halted,
}

/// A candidate route: a move list plus the result of walking it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agent {
    id: usize,
    score: u32,
    moves: Vec<Move>,
    position: Coord,
    found_exit: bool,
    /// Moves consumed by the last walk, rejected ones included.
    used: usize,
    /// Every coordinate entered, starting with the start cell.
    trail: Vec<Coord>,
}

impl Agent {
    /// Create an unevaluated agent standing on `start`.
    #[must_use]
    pub fn new(id: usize, moves: Vec<Move>, start: Coord) -> Self {
        Self {
            id,
            score: 0,
            moves,
            position: start,
            found_exit: false,
            used: 0,
            trail: vec![start],
        }
    }

    /// Create an agent with `num_moves` uniformly random moves.
    pub fn random<R: Rng>(id: usize, num_moves: usize, start: Coord, rng: &mut R) -> Self {
        let moves = (0..num_moves)
            .map(|_| Move::ALL[rng.gen_range(0..Move::ALL.len())])
            .collect();
        Self::new(id, moves, start)
    }

    /// Slot of this agent in its population.
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Accumulated penalty. Lower is better.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// The move list.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub(crate) fn moves_mut(&mut self) -> &mut [Move] {
        &mut self.moves
    }

    /// Where the walk ended.
    #[must_use]
    pub const fn position(&self) -> Coord {
        self.position
    }

    /// Whether the walk entered the exit.
    #[must_use]
    pub const fn found_exit(&self) -> bool {
        self.found_exit
    }

    /// Reached the exit without a single penalty.
    #[must_use]
    pub const fn is_solution(&self) -> bool {
        self.found_exit && self.score == 0
    }

    /// Moves the last walk consumed before it ended.
    #[must_use]
    pub const fn moves_used(&self) -> usize {
        self.used
    }

    /// Prefix of the move list the last walk consumed.
    #[must_use]
    pub fn used_moves(&self) -> &[Move] {
        &self.moves[..self.used]
    }

    /// Coordinates entered so far, start first.
    #[must_use]
    pub fn trail(&self) -> &[Coord] {
        &self.trail
    }

    /// Coordinate the agent would land on after `mv`, bounds unchecked.
    #[must_use]
    pub const fn map_next_position(&self, mv: Move) -> Coord {
        self.position.step(mv)
    }

    /// Put the agent back on `start` with a clean score.
    pub fn reset(&mut self, start: Coord) {
        self.score = 0;
        self.position = start;
        self.found_exit = false;
        self.used = 0;
        self.trail.clear();
        self.trail.push(start);
    }

    /// Copy of this agent for the next generation's elite slot.
    ///
    /// Keeps the moves, takes slot 0 and forgets the evaluation.
    #[must_use]
    pub fn elite_clone(&self, start: Coord) -> Self {
        Self::new(0, self.moves.clone(), start)
    }

    /// Apply one move, charging penalties for bad steps.
    pub fn apply_move(&mut self, grid: &Grid, mv: Move, scoring: &ScoringConfig) -> StepOutcome {
        let next = self.map_next_position(mv);
        let Some(kind) = grid.get(next) else {
            self.charge(scoring.out_of_bounds_penalty);
            return StepOutcome::Stayed;
        };

        match kind {
            CellKind::Blocked => match scoring.blocked {
                BlockedPolicy::StayPut { penalty } => {
                    self.charge(penalty);
                    StepOutcome::Stayed
                }
                BlockedPolicy::EndWalk { penalty } => {
                    self.charge(penalty);
                    StepOutcome::Halted
                }
            },
            CellKind::Bonus => {
                self.enter(next);
                self.charge(scoring.bonus_penalty);
                StepOutcome::Moved
            }
            CellKind::Exit => {
                self.enter(next);
                self.found_exit = true;
                StepOutcome::ReachedExit
            }
            CellKind::Free | CellKind::Start => {
                self.enter(next);
                StepOutcome::Moved
            }
        }
    }

    /// Walk the move list from the grid's start and score the result.
    ///
    /// The walk stops early on the exit (or on a wall under
    /// [`BlockedPolicy::EndWalk`]). Agents that never reach the exit pay the
    /// unreached penalty; revisited cells cost the loop penalty each.
    pub fn evaluate(&mut self, grid: &Grid, scoring: &ScoringConfig) {
        self.reset(grid.start());

        let moves = std::mem::take(&mut self.moves);
        for &mv in &moves {
            self.used += 1;
            match self.apply_move(grid, mv, scoring) {
                StepOutcome::ReachedExit | StepOutcome::Halted => break,
                StepOutcome::Moved | StepOutcome::Stayed => {}
            }
        }
        self.moves = moves;

        if !self.found_exit {
            self.charge(scoring.unreached_penalty_for(self.moves.len()));
        }
        if scoring.loop_penalty > 0 {
            let revisits = u32::try_from(self.revisits()).unwrap_or(u32::MAX);
            self.charge(revisits.saturating_mul(scoring.loop_penalty));
        }
    }

    /// Number of trail entries that repeat an earlier coordinate.
    #[must_use]
    pub fn revisits(&self) -> usize {
        let mut seen = HashSet::with_capacity(self.trail.len());
        self.trail.iter().filter(|c| !seen.insert(**c)).count()
    }

    fn enter(&mut self, coord: Coord) {
        self.position = coord;
        self.trail.push(coord);
    }

    fn charge(&mut self, penalty: u32) {
        self.score = self.score.saturating_add(penalty);
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Agent] {}: [", self.id)?;
        for (i, mv) in self.moves.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{mv}")?;
        }
        write!(f, "] | Score = {}", self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn scenario() -> Grid {
        "4\nE 0 0 0\n1 B 1 0\n0 0 0 0\n1 B S 1\n".parse().unwrap()
    }

    fn evaluated(moves: &[Move], scoring: &ScoringConfig) -> Agent {
        let grid = scenario();
        let mut agent = Agent::new(1, moves.to_vec(), grid.start());
        agent.evaluate(&grid, scoring);
        agent
    }

    #[test]
    fn test_clean_route_scores_zero() {
        use Move::{N, NE, NW, W};
        let agent = evaluated(&[NE, N, NW, W, W, N, N, N, N], &ScoringConfig::default());
        assert!(agent.found_exit());
        assert_eq!(agent.score(), 0);
        assert!(agent.is_solution());
        assert_eq!(agent.position(), Coord::new(0, 0));
        // Stops at the exit; trailing moves are ignored
        assert_eq!(agent.trail().len(), 6);
        assert_eq!(agent.moves_used(), 5);
        assert_eq!(agent.used_moves(), &[NE, N, NW, W, W]);
    }

    #[test]
    fn test_rejected_moves_count_as_used() {
        use Move::{N, NE, NW, S, W};
        let scoring = ScoringConfig {
            out_of_bounds_penalty: 0,
            loop_penalty: 0,
            ..ScoringConfig::default()
        };
        // The leading S bumps off the grid without moving
        let agent = evaluated(&[S, NE, N, NW, W, W, N], &scoring);
        assert!(agent.is_solution());
        assert_eq!(agent.trail().len(), 6);
        assert_eq!(agent.used_moves(), &[S, NE, N, NW, W, W]);

        let grid = scenario();
        let mut replay = Agent::new(2, agent.used_moves().to_vec(), grid.start());
        replay.evaluate(&grid, &scoring);
        assert_eq!(replay.position(), grid.exit());
        assert_eq!(replay.trail(), agent.trail());
    }

    #[test]
    fn test_bonus_and_bounds_penalties() {
        let scoring = ScoringConfig {
            loop_penalty: 0,
            ..ScoringConfig::default()
        };
        // W onto a bonus cell, S off the grid, NW to (2, 0), N into a wall, NE onto the other bonus
        let agent = evaluated(&[Move::W, Move::S, Move::NW, Move::N, Move::NE], &scoring);
        assert_eq!(agent.position(), Coord::new(1, 1));
        assert!(!agent.found_exit());
        assert_eq!(agent.score(), 5 + 20 + 5 + 5 + 1000);
    }

    #[test]
    fn test_reaching_exit_outranks_everything() {
        use Move::{N, NW, S, W};
        let scoring = ScoringConfig::default();
        // Wander off the grid and into walls, then reach the exit through the bonus cell
        let messy = evaluated(&[S, S, S, W, W, N, N, NW, N], &scoring);
        assert!(messy.found_exit(), "{messy}");
        let lost = evaluated(&[N, N, N, N, N, N, N, N, N], &scoring);
        assert!(!lost.found_exit());
        assert!(messy.score() > 0);
        assert!(messy.score() < lost.score());
    }

    #[test]
    fn test_end_walk_policy() {
        let scoring = ScoringConfig {
            blocked: BlockedPolicy::EndWalk { penalty: 7 },
            loop_penalty: 0,
            ..ScoringConfig::default()
        };
        // (3,2) -> E -> (3,3) blocked, walk ends
        let agent = evaluated(&[Move::E, Move::N, Move::N], &scoring);
        assert_eq!(agent.position(), Coord::new(3, 2));
        assert_eq!(agent.trail(), &[Coord::new(3, 2)]);
        assert_eq!(agent.moves_used(), 1);
        assert_eq!(agent.score(), 7 + 1000);
    }

    #[test]
    fn test_loop_penalty_counts_revisits() {
        // Up and down twice: (3,2) (2,2) (3,2) (2,2) (3,2)
        let moves = [Move::N, Move::S, Move::N, Move::S];
        let agent = evaluated(&moves, &ScoringConfig::default());
        assert_eq!(agent.revisits(), 3);
        assert_eq!(agent.score(), 1000 + 3 * 2);

        let free = ScoringConfig {
            loop_penalty: 0,
            ..ScoringConfig::default()
        };
        assert_eq!(evaluated(&moves, &free).score(), 1000);
    }

    #[test]
    fn test_evaluate_is_repeatable() {
        let grid = scenario();
        let mut rng = SmallRng::seed_from_u64(9);
        let mut agent = Agent::random(3, 9, grid.start(), &mut rng);
        agent.evaluate(&grid, &ScoringConfig::default());
        let first = agent.clone();
        agent.evaluate(&grid, &ScoringConfig::default());
        assert_eq!(agent, first);
    }

    #[test]
    fn test_elite_clone_resets_evaluation() {
        let grid = scenario();
        let agent = evaluated(&[Move::W, Move::W], &ScoringConfig::default());
        let elite = agent.elite_clone(grid.start());
        assert_eq!(elite.id(), 0);
        assert_eq!(elite.score(), 0);
        assert_eq!(elite.moves_used(), 0);
        assert_eq!(elite.moves(), agent.moves());
        assert_eq!(elite.trail(), &[grid.start()]);
    }

    #[test]
    fn test_display() {
        let agent = Agent::new(4, vec![Move::N, Move::SW], Coord::new(0, 0));
        assert_eq!(agent.to_string(), "[Agent] 4: [N, SW] | Score = 0");
    }
}
