//! Solve command implementation.

use super::output::{
    format_astar_text, format_genetic_text, render_maze, JsonAStar, JsonGenetic, JsonSolveResult,
};
use super::{load_maze, CliError, GeneticArgs, OutputFormat, Strategy};
use pathfinder::{
    AStarOutcome, AStarSearch, CostModel, EvolutionarySearch, FileSink, GenerationStats, LogSink,
    PathError, Solution, TraceSink,
};
use std::path::PathBuf;

type GeneticRun = (Result<Solution, PathError>, Vec<GenerationStats>);

/// Execute the solve command.
///
/// # Errors
///
/// Returns an error if the maze or configuration is invalid, the trace log
/// cannot be written, or the requested strategy finds no route.
pub(crate) fn execute(
    maze: PathBuf,
    strategy: Strategy,
    genetic: &GeneticArgs,
    log_dir: Option<PathBuf>,
    bonus_surcharge: Option<u32>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let grid = load_maze(&maze)?;
    let cost = bonus_surcharge.map_or_else(CostModel::default, CostModel::traversing_bonus);

    let mut file_sink = log_dir
        .as_deref()
        .map(FileSink::create)
        .transpose()
        .map_err(|e| CliError::new(format!("Failed to create trace log: {e}")))?;
    let mut log_sink = LogSink;
    let sink: &mut dyn TraceSink = match file_sink.as_mut() {
        Some(file) => file,
        None => &mut log_sink,
    };

    let mut genetic_run: Option<GeneticRun> = None;
    if matches!(strategy, Strategy::Genetic | Strategy::Hybrid) {
        let config = genetic.resolve()?;
        let mut search = EvolutionarySearch::with_sink(config, &mut *sink)?;
        let result = search.find_path(&grid);
        genetic_run = Some((result, search.history().to_vec()));
    }

    let mut astar_run: Option<Result<AStarOutcome, PathError>> = None;
    if matches!(strategy, Strategy::Astar | Strategy::Hybrid) {
        // Hybrid follows up on wherever the agents ended
        let target = match &genetic_run {
            Some((Ok(solution), _)) => solution.terminal(),
            _ => grid.exit(),
        };
        let mut search = AStarSearch::with_sink(&mut *sink).cost_model(cost);
        astar_run = Some(search.search(&grid, grid.start(), target));
    }

    if let Some(file) = file_sink {
        log::info!("trace written to {}", file.path().display());
        file.finish()?;
    }

    match format {
        OutputFormat::Text => {
            println!("Maze: {} ({}x{})", maze.display(), grid.size(), grid.size());
            println!();
            print!("{}", render_maze(&grid, &[]));
            println!();
            if let Some((result, history)) = &genetic_run {
                match result {
                    Ok(solution) => print!("{}", format_genetic_text(&grid, solution)),
                    Err(e) => {
                        println!("Genetic search: {e}");
                        if let Some(last) = history.last() {
                            println!(
                                "  final generation: best score {}, closest distance {}",
                                last.best_score, last.closest
                            );
                        }
                    }
                }
                println!();
            }
            if let Some(result) = &astar_run {
                match result {
                    Ok(outcome) => print!("{}", format_astar_text(&grid, outcome)),
                    Err(e) => println!("A* search: {e}"),
                }
            }
        }
        OutputFormat::Json => {
            let json_result = JsonSolveResult {
                size: grid.size(),
                start: grid.start(),
                exit: grid.exit(),
                genetic: genetic_run
                    .as_ref()
                    .map(|(result, history)| JsonGenetic::from_result(result, history)),
                astar: astar_run.as_ref().map(JsonAStar::from_result),
            };
            println!("{}", serde_json::to_string_pretty(&json_result)?);
        }
    }

    // The last strategy to run decides the exit status
    match (astar_run, genetic_run) {
        (Some(Err(e)), _) | (None, Some((Err(e), _))) => Err(e.into()),
        _ => Ok(()),
    }
}
