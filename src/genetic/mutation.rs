//! Point mutation of move lists.

use crate::grid::Move;
use rand::seq::index;
use rand::Rng;

/// Moves changed in one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    /// Agent slot in the population.
    pub agent: usize,
    /// Positions in the move list that were rewritten.
    pub positions: Vec<usize>,
}

/// `ceil(total * ratio / 100)`, capped at `total`.
#[must_use]
pub fn mutation_count(total: usize, ratio_percent: u32) -> usize {
    let ratio = usize::try_from(ratio_percent.min(100)).unwrap_or(100);
    (total * ratio).div_ceil(100).min(total)
}

/// A uniformly random move other than `current`.
pub fn different_move<R: Rng>(current: Move, rng: &mut R) -> Move {
    let current = current as usize;
    let pick = rng.gen_range(0..Move::ALL.len() - 1);
    Move::ALL[if pick >= current { pick + 1 } else { pick }]
}

/// Rewrite `count` distinct positions of `moves` with a different move each.
///
/// Returns the rewritten positions in ascending order.
pub fn mutate_moves<R: Rng>(moves: &mut [Move], count: usize, rng: &mut R) -> Vec<usize> {
    let count = count.min(moves.len());
    let mut positions = index::sample(rng, moves.len(), count).into_vec();
    positions.sort_unstable();
    for &p in &positions {
        moves[p] = different_move(moves[p], rng);
    }
    positions
}

/// Pick which agents of a population of `population` to mutate.
///
/// Slot 0 holds the elite and is never picked. Returns agent slots in
/// ascending order.
pub fn pick_agents<R: Rng>(population: usize, ratio_percent: u32, rng: &mut R) -> Vec<usize> {
    let eligible = population.saturating_sub(1);
    let count = mutation_count(population, ratio_percent).min(eligible);
    let mut agents: Vec<usize> = index::sample(rng, eligible, count)
        .into_iter()
        .map(|i| i + 1)
        .collect();
    agents.sort_unstable();
    agents
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_mutation_count_rounds_up() {
        assert_eq!(mutation_count(10, 60), 6);
        assert_eq!(mutation_count(9, 1), 1);
        assert_eq!(mutation_count(3, 60), 2);
        assert_eq!(mutation_count(7, 0), 0);
        assert_eq!(mutation_count(7, 100), 7);
        assert_eq!(mutation_count(7, 250), 7);
        assert_eq!(mutation_count(0, 50), 0);
    }

    #[test]
    fn test_different_move_always_differs() {
        let mut rng = SmallRng::seed_from_u64(42);
        for mv in Move::ALL {
            let mut seen = std::collections::HashSet::new();
            for _ in 0..200 {
                let other = different_move(mv, &mut rng);
                assert_ne!(other, mv);
                seen.insert(other);
            }
            assert_eq!(seen.len(), 7);
        }
    }

    #[test]
    fn test_mutate_moves_changes_exactly_count() {
        let mut rng = SmallRng::seed_from_u64(8);
        let original = vec![Move::N; 20];
        let mut moves = original.clone();
        let positions = mutate_moves(&mut moves, 5, &mut rng);
        assert_eq!(positions.len(), 5);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let changed: Vec<usize> = (0..20).filter(|&i| moves[i] != original[i]).collect();
        assert_eq!(changed, positions);
    }

    #[test]
    fn test_mutate_moves_caps_count() {
        let mut rng = SmallRng::seed_from_u64(8);
        let mut moves = vec![Move::E; 3];
        assert_eq!(mutate_moves(&mut moves, 10, &mut rng), vec![0, 1, 2]);
        assert!(moves.iter().all(|&m| m != Move::E));
    }

    #[test]
    fn test_pick_agents_skips_elite() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..100 {
            let picked = pick_agents(10, 60, &mut rng);
            assert_eq!(picked.len(), 6);
            assert!(!picked.contains(&0));
            assert!(picked.iter().all(|&i| i < 10));
        }
        // Every non-elite agent, never the elite
        assert_eq!(pick_agents(4, 100, &mut rng), vec![1, 2, 3]);
        assert!(pick_agents(1, 100, &mut rng).is_empty());
    }
}
