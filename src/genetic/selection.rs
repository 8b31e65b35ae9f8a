//! Parent and elite selection.
//!
//! Scores are penalties, so the lower score wins everywhere in this module.

use rand::Rng;

/// Binary tournament: draw two distinct agents and return the lower-scoring one.
///
/// `excluded` is never drawn, which keeps a mother distinct from her mate.
/// Ties go to the second draw. With fewer than two eligible agents the only
/// candidate (or 0) is returned.
pub fn tournament_select<R: Rng>(scores: &[u32], excluded: Option<usize>, rng: &mut R) -> usize {
    let skip = excluded.filter(|&e| e < scores.len());
    let eligible = scores.len() - usize::from(skip.is_some());
    let index_of = |rank: usize| match skip {
        Some(e) if rank >= e => rank + 1,
        _ => rank,
    };

    match eligible {
        0 => 0,
        1 => index_of(0),
        _ => {
            let first = rng.gen_range(0..eligible);
            let mut second = rng.gen_range(0..eligible - 1);
            if second >= first {
                second += 1;
            }
            let (a, b) = (index_of(first), index_of(second));
            if scores[a] < scores[b] { a } else { b }
        }
    }
}

/// Index of the lowest score, the first one on ties.
#[must_use]
pub fn select_elite(scores: &[u32]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .min_by_key(|&(_, score)| *score)
        .map(|(i, _)| i)
}
