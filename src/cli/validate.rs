//! Maze validation command implementation.

use super::CliError;
use pathfinder::{AStarSearch, CellKind, CostModel, Grid};
use std::path::PathBuf;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the maze file cannot be read or is malformed.
pub(crate) fn execute(maze: PathBuf) -> Result<(), CliError> {
    println!("Validating: {}", maze.display());
    println!();

    let grid = match Grid::load(&maze) {
        Ok(grid) => {
            print_check("Maze parses", true);
            grid
        }
        Err(e) => {
            print_check("Maze parses", false);
            return Err(CliError::new(format!("{}: {e}", maze.display())));
        }
    };
    print_check("Exactly one start and one exit", true);

    let avoiding = AStarSearch::new().search(&grid, grid.start(), grid.exit());
    print_check("Exit reachable avoiding bonus cells", avoiding.is_ok());
    let through = AStarSearch::new()
        .cost_model(CostModel::traversing_bonus(0))
        .search(&grid, grid.start(), grid.exit());
    print_check("Exit reachable through bonus cells", through.is_ok());

    println!();
    println!("Summary:");
    println!("  Size:         {0}x{0}", grid.size());
    println!("  Start:        {}", grid.start());
    println!("  Exit:         {}", grid.exit());
    println!("  Free cells:   {}", grid.count(CellKind::Free));
    println!("  Walls:        {}", grid.count(CellKind::Blocked));
    println!("  Bonus cells:  {}", grid.count(CellKind::Bonus));
    println!("  Move budget:  {}", grid.move_budget());
    if let Ok(outcome) = &avoiding {
        println!(
            "  A* route:     {} steps, cost {}",
            outcome.path.len().saturating_sub(1),
            outcome.cost
        );
    }

    println!();
    if avoiding.is_ok() || through.is_ok() {
        println!("Validation successful!");
    } else {
        println!("Validation successful, but the exit cannot be reached.");
    }

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
