//! Integration tests for maze files.
//!
//! Loads the sample mazes shipped in `mazes/` and checks malformed files are
//! rejected with a useful message.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::PathBuf;

use pathfinder::{AStarSearch, CellKind, Coord, Grid, PathError};

fn maze_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("mazes")
        .join(name)
}

fn load(name: &str) -> Grid {
    Grid::load(&maze_path(name)).unwrap()
}

fn astar_cost(grid: &Grid) -> Result<u32, PathError> {
    AStarSearch::new()
        .search(grid, grid.start(), grid.exit())
        .map(|outcome| outcome.cost)
}

#[test]
fn test_scenario_file() {
    let grid = load("scenario.txt");
    assert_eq!(grid.size(), 4);
    assert_eq!(grid.start(), Coord::new(3, 2));
    assert_eq!(grid.exit(), Coord::new(0, 0));
    assert_eq!(grid.count(CellKind::Bonus), 2);
    assert_eq!(grid.move_budget(), 9);
    assert_eq!(astar_cost(&grid), Ok(58));
}

#[test]
fn test_compact_rows() {
    let grid = load("corridor.txt");
    assert_eq!(grid.size(), 8);
    assert_eq!(grid.start(), Coord::new(0, 0));
    assert_eq!(grid.exit(), Coord::new(7, 0));
    assert_eq!(astar_cost(&grid), Ok(308));
}

#[test]
fn test_rooms() {
    let grid = load("rooms.txt");
    assert_eq!(grid.size(), 10);
    assert_eq!(grid.move_budget(), 56);
    assert_eq!(astar_cost(&grid), Ok(144));
}

#[test]
fn test_walled_off_exit() {
    let grid = load("walled.txt");
    assert_eq!(
        astar_cost(&grid),
        Err(PathError::NoPathFound {
            start: Coord::new(0, 0),
            exit: Coord::new(3, 3)
        })
    );
}

#[test]
fn test_spaced_and_compact_agree() {
    let spaced = load("scenario.txt");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("compact.txt");
    fs::write(&path, "4\nE000\n1B10\n0000\n1BS1\n\n\n").unwrap();
    assert_eq!(Grid::load(&path).unwrap(), spaced);
}

#[test]
fn test_malformed_files() {
    let dir = tempfile::tempdir().unwrap();
    let cases = [
        ("empty.txt", "", "empty"),
        ("header.txt", "four\nS E\n", "line 1"),
        ("short_row.txt", "3\nS 0 0\n0 0\n0 0 E\n", "line 3"),
        ("bad_code.txt", "2\nS X\n0 E\n", "line 2"),
        ("missing_row.txt", "3\nS 0 0\n0 0 E\n", "rows"),
        ("two_starts.txt", "2\nS S\n0 E\n", "start"),
        ("no_exit.txt", "2\nS 0\n0 0\n", "exit"),
    ];
    for (name, content, needle) in cases {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        match Grid::load(&path) {
            Err(PathError::InvalidConfiguration(message)) => {
                assert!(message.contains(needle), "{name}: {message:?} lacks {needle:?}");
            }
            other => panic!("{name}: expected InvalidConfiguration, got {other:?}"),
        }
    }
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Grid::load(&dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, PathError::InvalidConfiguration(_)));
}
