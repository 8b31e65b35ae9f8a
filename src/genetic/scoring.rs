//! Penalty scoring for agents.
//!
//! Scores only ever grow: every bad step adds a penalty and lower is better.
//! An agent with score 0 that found the exit walked a clean route.

use serde::{Deserialize, Serialize};

/// What happens when an agent tries to step onto a Blocked cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BlockedPolicy {
    /// The step is rejected and the agent stays where it is.
    StayPut {
        /// Penalty added per rejected step.
        penalty: u32,
    },
    /// The step is rejected and the agent's walk ends there.
    EndWalk {
        /// Penalty added once when the walk ends.
        penalty: u32,
    },
}

impl BlockedPolicy {
    /// Penalty charged for hitting a wall.
    #[must_use]
    pub const fn penalty(self) -> u32 {
        match self {
            Self::StayPut { penalty } | Self::EndWalk { penalty } => penalty,
        }
    }
}

impl Default for BlockedPolicy {
    fn default() -> Self {
        Self::StayPut { penalty: 5 }
    }
}

/// Penalties used when evaluating agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Penalty for a move that would leave the grid.
    pub out_of_bounds_penalty: u32,
    /// Penalty for entering a Bonus cell.
    pub bonus_penalty: u32,
    /// Treatment of Blocked cells.
    pub blocked: BlockedPolicy,
    /// Minimum penalty for never reaching the exit.
    pub unreached_penalty: u32,
    /// Penalty per revisited coordinate in the trail. Zero disables it.
    pub loop_penalty: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            out_of_bounds_penalty: 20,
            bonus_penalty: 5,
            blocked: BlockedPolicy::default(),
            unreached_penalty: 1000,
            loop_penalty: 2,
        }
    }
}

impl ScoringConfig {
    /// Largest penalty a single move can earn.
    #[must_use]
    pub fn max_step_penalty(&self) -> u32 {
        self.out_of_bounds_penalty
            .max(self.bonus_penalty)
            .max(self.blocked.penalty())
    }

    /// Penalty for an agent with `num_moves` moves that never reached the exit.
    ///
    /// Always larger than anything an exit-reaching agent can accumulate, so
    /// reaching the exit ranks first regardless of step penalties.
    #[must_use]
    pub fn unreached_penalty_for(&self, num_moves: usize) -> u32 {
        let per_move = self.max_step_penalty().saturating_add(self.loop_penalty);
        let moves = u32::try_from(num_moves).unwrap_or(u32::MAX);
        let worst_reached = moves.saturating_mul(per_move);
        self.unreached_penalty.max(worst_reached.saturating_add(1))
    }
}
