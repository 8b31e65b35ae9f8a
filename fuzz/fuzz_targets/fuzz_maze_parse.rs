#![no_main]

//! Maze parser fuzzer.
//!
//! Arbitrary text must either be rejected with an error or parse into a grid
//! that holds together: one start, one exit, and a text form that parses
//! back to the same grid.

use libfuzzer_sys::fuzz_target;
use pathfinder::{CellKind, Grid};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(grid) = text.parse::<Grid>() else {
        return;
    };

    assert_eq!(grid.count(CellKind::Start), 1);
    assert_eq!(grid.count(CellKind::Exit), 1);
    assert_eq!(grid.get(grid.start()), Some(CellKind::Start));
    assert_eq!(grid.get(grid.exit()), Some(CellKind::Exit));

    let reparsed: Grid = grid.to_string().parse().expect("rendered maze must parse");
    assert_eq!(reparsed, grid);
});
