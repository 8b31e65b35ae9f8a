//! Property-based tests for A* search.
//!
//! Random 4x4 and 5x5 mazes are solved by A* and by an exhaustive
//! relaxation over every cell; the two must agree on reachability and cost.
//! Run with: cargo test --release prop_astar

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use proptest::prelude::*;

use pathfinder::{heuristic, AStarSearch, CellKind, Coord, CostModel, Grid, Move, PathError};

/// Random square maze with one start and one exit.
fn arb_grid() -> impl Strategy<Value = Grid> {
    (4usize..=5).prop_flat_map(|n| {
        (
            prop::collection::vec(
                prop_oneof![
                    6 => Just(CellKind::Free),
                    3 => Just(CellKind::Blocked),
                    1 => Just(CellKind::Bonus),
                ],
                n * n,
            ),
            0..n * n,
            0..n * n,
        )
            .prop_filter_map("start and exit coincide", move |(mut cells, s, e)| {
                if s == e {
                    return None;
                }
                cells[s] = CellKind::Start;
                cells[e] = CellKind::Exit;
                let rows = cells.chunks(n).map(<[CellKind]>::to_vec).collect();
                Grid::from_rows(rows).ok()
            })
    })
}

/// Extra cost of entering `coord`, or `None` if it cannot be entered.
fn entry_cost(grid: &Grid, coord: Coord, bonus_surcharge: Option<u32>) -> Option<u32> {
    match grid.get(coord)? {
        CellKind::Blocked => None,
        CellKind::Bonus => bonus_surcharge,
        CellKind::Free | CellKind::Start | CellKind::Exit => Some(0),
    }
}

/// Cheapest cost from `from` to every reachable cell, by repeated relaxation.
fn brute_force(grid: &Grid, from: Coord, bonus_surcharge: Option<u32>) -> HashMap<Coord, u32> {
    let mut dist = HashMap::new();
    dist.insert(from, 0u32);
    loop {
        let mut changed = false;
        let snapshot: Vec<(Coord, u32)> = dist.iter().map(|(&c, &d)| (c, d)).collect();
        for (coord, d) in snapshot {
            for mv in Move::ALL {
                let next = coord.step(mv);
                let Some(extra) = entry_cost(grid, next, bonus_surcharge) else {
                    continue;
                };
                let step = if mv.is_diagonal() { 14 } else { 10 };
                let candidate = d + step + extra;
                if dist.get(&next).is_none_or(|&old| candidate < old) {
                    dist.insert(next, candidate);
                    changed = true;
                }
            }
        }
        if !changed {
            return dist;
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// A* agrees with exhaustive search on reachability and cost.
    #[test]
    fn prop_astar_is_optimal(grid in arb_grid()) {
        let expected = brute_force(&grid, grid.start(), None).get(&grid.exit()).copied();
        let result = AStarSearch::new().search(&grid, grid.start(), grid.exit());

        match (result, expected) {
            (Ok(outcome), Some(cost)) => {
                prop_assert_eq!(outcome.cost, cost);
                prop_assert_eq!(outcome.path.first(), Some(&grid.start()));
                prop_assert_eq!(outcome.path.last(), Some(&grid.exit()));
                prop_assert_eq!(CostModel::default().path_cost(&grid, &outcome.path), Some(cost));
                prop_assert!(outcome.path.iter().all(|&c| grid.is_walkable(c)));
            }
            (Err(PathError::NoPathFound { start, exit }), None) => {
                prop_assert_eq!(start, grid.start());
                prop_assert_eq!(exit, grid.exit());
            }
            (result, expected) => {
                prop_assert!(false, "A* returned {:?}, exhaustive search {:?}\n{}", result, expected, grid);
            }
        }
    }

    /// With bonus traversal enabled, A* still matches exhaustive search.
    #[test]
    fn prop_astar_optimal_through_bonus(grid in arb_grid(), surcharge in 0u32..30) {
        let expected = brute_force(&grid, grid.start(), Some(surcharge)).get(&grid.exit()).copied();
        let result = AStarSearch::new()
            .cost_model(CostModel::traversing_bonus(surcharge))
            .search(&grid, grid.start(), grid.exit());
        prop_assert_eq!(result.ok().map(|o| o.cost), expected);
    }

    /// The octile estimate never exceeds the true remaining cost.
    #[test]
    fn prop_heuristic_is_admissible(grid in arb_grid()) {
        // Step costs are symmetric, so distances from the exit are distances to it
        let to_exit = brute_force(&grid, grid.exit(), None);
        for (coord, cost) in to_exit {
            prop_assert!(heuristic(coord, grid.exit()) <= cost, "{} -> {}", coord, cost);
        }
    }

    /// Repeated searches return identical paths.
    #[test]
    fn prop_astar_is_deterministic(grid in arb_grid()) {
        let first = AStarSearch::new().find_path(&grid, grid.start(), grid.exit());
        for _ in 0..3 {
            let again = AStarSearch::new().find_path(&grid, grid.start(), grid.exit());
            prop_assert_eq!(&again, &first);
        }
    }

    /// Consecutive path cells are one king move apart.
    #[test]
    fn prop_path_steps_are_adjacent(grid in arb_grid()) {
        if let Ok(path) = AStarSearch::new().find_path(&grid, grid.start(), grid.exit()) {
            for w in path.windows(2) {
                prop_assert!(w[0].row.abs_diff(w[1].row) <= 1);
                prop_assert!(w[0].col.abs_diff(w[1].col) <= 1);
                prop_assert_ne!(w[0], w[1]);
            }
        }
    }
}

#[test]
fn test_walled_off_exit() {
    let grid: Grid = "5\nS 0 0 0 0\n0 0 0 0 0\n0 0 1 1 1\n0 0 1 E 0\n0 0 1 0 0\n"
        .parse()
        .unwrap();
    assert!(matches!(
        AStarSearch::new().find_path(&grid, grid.start(), grid.exit()),
        Err(PathError::NoPathFound { .. })
    ));
}
