//! Uniform crossover of move lists.

use crate::grid::Move;
use rand::Rng;

/// Build a child by taking each move from the father or the mother with
/// equal probability.
///
/// The child is as long as the shorter parent.
pub fn uniform_crossover<R: Rng>(father: &[Move], mother: &[Move], rng: &mut R) -> Vec<Move> {
    father
        .iter()
        .zip(mother)
        .map(|(&f, &m)| if rng.gen_bool(0.5) { f } else { m })
        .collect()
}
