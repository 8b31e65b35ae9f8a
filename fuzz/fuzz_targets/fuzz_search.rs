#![no_main]

//! Search fuzzer.
//!
//! Builds small mazes from structured input and runs both strategies on
//! them. Neither may panic, A* paths must be walkable and priced correctly,
//! and any evolutionary solution must replay to the exit with score 0.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pathfinder::{
    AStarSearch, Agent, CellKind, CostModel, EvolutionarySearch, GeneticConfig, Grid, PathError,
};

/// Structured input for search fuzzing.
#[derive(Arbitrary, Debug)]
struct SearchInput {
    /// Side length, reduced to 2..=8.
    size: u8,
    /// Cell codes, cycled to fill the grid.
    cells: Vec<u8>,
    /// Start cell index.
    start: u8,
    /// Exit cell index.
    exit: u8,
    /// Bonus surcharge for A*, if any.
    surcharge: Option<u8>,
    /// Seed for the evolutionary search.
    seed: u64,
}

fn build_grid(input: &SearchInput) -> Option<Grid> {
    let n = usize::from(input.size % 7) + 2;
    let start = usize::from(input.start) % (n * n);
    let exit = usize::from(input.exit) % (n * n);
    if start == exit {
        return None;
    }

    let mut cells: Vec<CellKind> = (0..n * n)
        .map(|i| match input.cells.get(i % input.cells.len().max(1)).copied().unwrap_or(0) % 4 {
            0 | 1 => CellKind::Free,
            2 => CellKind::Blocked,
            _ => CellKind::Bonus,
        })
        .collect();
    cells[start] = CellKind::Start;
    cells[exit] = CellKind::Exit;
    Grid::from_rows(cells.chunks(n).map(<[CellKind]>::to_vec).collect()).ok()
}

fuzz_target!(|input: SearchInput| {
    let Some(grid) = build_grid(&input) else {
        return;
    };

    let model = input
        .surcharge
        .map_or_else(CostModel::default, |s| CostModel::traversing_bonus(u32::from(s)));
    match AStarSearch::new()
        .cost_model(model)
        .search(&grid, grid.start(), grid.exit())
    {
        Ok(outcome) => {
            assert_eq!(outcome.path.first(), Some(&grid.start()));
            assert_eq!(outcome.path.last(), Some(&grid.exit()));
            assert_eq!(model.path_cost(&grid, &outcome.path), Some(outcome.cost));
        }
        Err(PathError::NoPathFound { .. }) => {}
        Err(e) => panic!("unexpected A* error: {e}"),
    }

    let config = GeneticConfig {
        generations: 5,
        agents: 6,
        seed: input.seed,
        ..GeneticConfig::default()
    };
    let mut search = EvolutionarySearch::new(config).expect("valid config");
    match search.find_path(&grid) {
        Ok(solution) => {
            let mut replay = Agent::new(0, solution.agent().moves().to_vec(), grid.start());
            replay.evaluate(&grid, &config.scoring);
            assert_eq!(replay.position(), grid.exit());
            assert_eq!(replay.score(), 0);
        }
        Err(PathError::NoSolutionFound { generations }) => assert_eq!(generations, 5),
        Err(e) => panic!("unexpected genetic error: {e}"),
    }
    assert!(search.history().len() <= 5);
});
