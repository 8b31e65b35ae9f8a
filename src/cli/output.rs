//! Output formatting utilities for CLI.

// Rates and means are reported as f64; maze rows and columns fit in i32
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

use pathfinder::{AStarOutcome, CellKind, Coord, GenerationStats, Grid, Solution};
use serde::Serialize;
use std::collections::HashSet;

/// Marker drawn on path cells that are neither start nor exit.
const PATH_MARK: char = '*';

/// Render the maze with `path` drawn over it.
pub(super) fn render_maze(grid: &Grid, path: &[Coord]) -> String {
    let on_path: HashSet<Coord> = path.iter().copied().collect();
    let mut output = String::new();
    for (r, row) in grid.rows().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(c, &kind)| {
                let here = Coord::new(r as i32, c as i32);
                let marked = on_path.contains(&here)
                    && !matches!(kind, CellKind::Start | CellKind::Exit);
                let mark = if marked { PATH_MARK } else { kind.code() };
                mark.to_string()
            })
            .collect();
        output.push_str(&cells.join(" "));
        output.push('\n');
    }
    output
}

fn format_coords(path: &[Coord]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Format an A* result as human-readable text.
pub(super) fn format_astar_text(grid: &Grid, outcome: &AStarOutcome) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "A* route: {} steps, cost {}, {} nodes expanded\n",
        outcome.path.len().saturating_sub(1),
        outcome.cost,
        outcome.expanded
    ));
    output.push_str(&format!("  {}\n\n", format_coords(&outcome.path)));
    output.push_str(&render_maze(grid, &outcome.path));
    output
}

/// Format an evolutionary result as human-readable text.
pub(super) fn format_genetic_text(grid: &Grid, solution: &Solution) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Genetic route: found at generation {} by agent {} in {} steps\n",
        solution.generation(),
        solution.agent().id(),
        solution.moves().len()
    ));
    let moves: Vec<&str> = solution.moves().iter().map(|m| m.symbol()).collect();
    output.push_str(&format!("  moves: {}\n", moves.join(" ")));
    output.push_str(&format!("  {}\n\n", format_coords(solution.trail())));
    output.push_str(&render_maze(grid, solution.trail()));
    output
}

/// JSON-serializable A* result.
#[derive(Debug, Serialize)]
pub(super) struct JsonAStar {
    /// Whether a route was found.
    pub(super) found: bool,
    /// Route cost.
    pub(super) cost: Option<u32>,
    /// Nodes expanded.
    pub(super) expanded: Option<usize>,
    /// Route coordinates.
    pub(super) path: Vec<Coord>,
    /// Failure reason.
    pub(super) error: Option<String>,
}

impl JsonAStar {
    /// Create from a search result.
    pub(super) fn from_result(result: &Result<AStarOutcome, pathfinder::PathError>) -> Self {
        match result {
            Ok(outcome) => Self {
                found: true,
                cost: Some(outcome.cost),
                expanded: Some(outcome.expanded),
                path: outcome.path.clone(),
                error: None,
            },
            Err(e) => Self {
                found: false,
                cost: None,
                expanded: None,
                path: Vec::new(),
                error: Some(e.to_string()),
            },
        }
    }
}

/// JSON-serializable evolutionary result.
#[derive(Debug, Serialize)]
pub(super) struct JsonGenetic<'a> {
    /// Whether a zero-penalty agent was found.
    pub(super) found: bool,
    /// Generation of the solution.
    pub(super) generation: Option<usize>,
    /// Moves used by the solution.
    pub(super) moves: Vec<pathfinder::Move>,
    /// Cells walked by the solution.
    pub(super) trail: Vec<Coord>,
    /// Failure reason.
    pub(super) error: Option<String>,
    /// Per-generation statistics.
    pub(super) history: &'a [GenerationStats],
}

impl<'a> JsonGenetic<'a> {
    /// Create from a search result and its history.
    pub(super) fn from_result(
        result: &Result<Solution, pathfinder::PathError>,
        history: &'a [GenerationStats],
    ) -> Self {
        match result {
            Ok(solution) => Self {
                found: true,
                generation: Some(solution.generation()),
                moves: solution.moves().to_vec(),
                trail: solution.trail().to_vec(),
                error: None,
                history,
            },
            Err(e) => Self {
                found: false,
                generation: None,
                moves: Vec::new(),
                trail: Vec::new(),
                error: Some(e.to_string()),
                history,
            },
        }
    }
}

/// JSON-serializable `solve` result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSolveResult<'a> {
    /// Maze side length.
    pub(super) size: usize,
    /// Start cell.
    pub(super) start: Coord,
    /// Exit cell.
    pub(super) exit: Coord,
    /// Evolutionary result, if that strategy ran.
    pub(super) genetic: Option<JsonGenetic<'a>>,
    /// A* result, if that strategy ran.
    pub(super) astar: Option<JsonAStar>,
}

/// Aggregated statistics across independent evolutionary runs.
#[derive(Debug, Clone, Default)]
pub(super) struct TrialStats {
    /// Runs completed.
    pub(super) runs: u64,
    /// Runs that found a solution.
    pub(super) solved: u64,
    /// Generation index of each solution.
    generations_to_solve: Vec<usize>,
    /// Route length of each solution.
    steps: Vec<usize>,
    /// Best score of the final generation, for failed runs.
    failed_best_scores: Vec<u32>,
}

impl TrialStats {
    /// Record one run.
    pub(super) fn add_result(
        &mut self,
        result: &Result<Solution, pathfinder::PathError>,
        history: &[GenerationStats],
    ) {
        self.runs += 1;
        match result {
            Ok(solution) => {
                self.solved += 1;
                self.generations_to_solve.push(solution.generation());
                self.steps.push(solution.moves().len());
            }
            Err(_) => {
                if let Some(last) = history.last() {
                    self.failed_best_scores.push(last.best_score);
                }
            }
        }
    }

    /// Fold another partial result into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.runs += other.runs;
        self.solved += other.solved;
        self.generations_to_solve
            .extend_from_slice(&other.generations_to_solve);
        self.steps.extend_from_slice(&other.steps);
        self.failed_best_scores
            .extend_from_slice(&other.failed_best_scores);
    }

    /// Share of runs that found a solution (0.0-1.0).
    pub(super) fn success_rate(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.solved as f64 / self.runs as f64
    }

    /// Mean generation index at which solutions were found.
    pub(super) fn avg_generations(&self) -> Option<f64> {
        mean(&self.generations_to_solve)
    }

    /// Mean route length of solutions.
    pub(super) fn avg_steps(&self) -> Option<f64> {
        mean(&self.steps)
    }

    /// Slowest solution.
    pub(super) fn max_generations(&self) -> Option<usize> {
        self.generations_to_solve.iter().copied().max()
    }

    /// Mean final best score of failed runs.
    pub(super) fn avg_failed_score(&self) -> Option<f64> {
        if self.failed_best_scores.is_empty() {
            return None;
        }
        let total: u64 = self.failed_best_scores.iter().map(|&s| u64::from(s)).sum();
        Some(total as f64 / self.failed_best_scores.len() as f64)
    }
}

fn mean(values: &[usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<usize>() as f64 / values.len() as f64)
}

/// JSON-serializable trials summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonTrialsResult {
    /// Runs completed.
    pub(super) runs: u64,
    /// Runs that found a solution.
    pub(super) solved: u64,
    /// Share of runs that found a solution.
    pub(super) success_rate: f64,
    /// Mean generation of solutions.
    pub(super) avg_generations: Option<f64>,
    /// Slowest solution.
    pub(super) max_generations: Option<usize>,
    /// Mean route length of solutions.
    pub(super) avg_steps: Option<f64>,
    /// Mean final best score of failed runs.
    pub(super) avg_failed_score: Option<f64>,
}

impl JsonTrialsResult {
    /// Create from aggregated stats.
    pub(super) fn from_stats(stats: &TrialStats) -> Self {
        Self {
            runs: stats.runs,
            solved: stats.solved,
            success_rate: stats.success_rate(),
            avg_generations: stats.avg_generations(),
            max_generations: stats.max_generations(),
            avg_steps: stats.avg_steps(),
            avg_failed_score: stats.avg_failed_score(),
        }
    }
}

/// Format trial stats as human-readable text.
pub(super) fn format_trials_text(stats: &TrialStats) -> String {
    let mut output = String::new();

    output.push_str(&format!("Trial Results ({} runs)\n", stats.runs));
    output.push_str("========================================\n\n");
    output.push_str(&format!(
        "Success rate: {:.1}% ({} solved)\n",
        stats.success_rate() * 100.0,
        stats.solved
    ));
    if let Some(avg) = stats.avg_generations() {
        output.push_str(&format!(
            "Generations to solve: {avg:.1} avg, {} max\n",
            stats.max_generations().unwrap_or(0)
        ));
    }
    if let Some(avg) = stats.avg_steps() {
        output.push_str(&format!("Route length: {avg:.1} steps avg\n"));
    }
    if let Some(avg) = stats.avg_failed_score() {
        output.push_str(&format!("Failed runs: best score {avg:.0} avg\n"));
    }

    output
}
