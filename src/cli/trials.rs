//! Trials command implementation.

// Runs per second is reported as f64
#![allow(clippy::cast_precision_loss)]

use super::output::{format_trials_text, JsonTrialsResult, TrialStats};
use super::{load_maze, CliError, GeneticArgs, OutputFormat};
use indicatif::{ProgressBar, ProgressStyle};
use pathfinder::EvolutionarySearch;
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

/// Execute the trials command.
///
/// Run `runs` independent evolutionary searches on the same maze. Run `i`
/// uses seed `base + i`, so any run can be repeated with `solve --seed`.
///
/// # Errors
///
/// Returns an error if the maze or configuration is invalid.
pub(crate) fn execute(
    maze: PathBuf,
    runs: u64,
    threads: Option<usize>,
    progress: bool,
    genetic: &GeneticArgs,
    format: OutputFormat,
) -> Result<(), CliError> {
    let grid = load_maze(&maze)?;
    let config = genetic.resolve()?;

    if let Some(num_threads) = threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
        {
            log::warn!("could not resize the thread pool: {e}");
        }
    }

    let pb = if progress {
        let pb = ProgressBar::new(runs);
        match ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} runs ({per_sec})",
        ) {
            Ok(style) => pb.set_style(style.progress_chars("=>-")),
            Err(e) => log::warn!("progress template rejected: {e}"),
        }
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each thread folds into its own TrialStats, merged at the end
    let stats = (0..runs)
        .into_par_iter()
        .fold(TrialStats::default, |mut local, i| {
            let mut run_config = config;
            run_config.seed = config.seed.wrapping_add(i);
            match EvolutionarySearch::new(run_config) {
                Ok(mut search) => {
                    let result = search.find_path(&grid);
                    local.add_result(&result, search.history());
                }
                Err(e) => log::warn!("run {i} skipped: {e}"),
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local
        })
        .reduce(TrialStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let runs_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.runs as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        OutputFormat::Text => {
            println!("Maze: {}", maze.display());
            println!(
                "Config: {} generations, {} agents, agent ratio {}%, move ratio {}%, base seed {}",
                config.generations,
                config.agents,
                config.agent_mutation_ratio,
                config.movement_mutation_ratio,
                config.seed
            );
            println!();
            print!("{}", format_trials_text(&stats));
            println!();
            println!(
                "Duration: {:.2}s ({runs_per_sec:.0} runs/sec)",
                duration.as_secs_f64()
            );
        }
        OutputFormat::Json => {
            let json_result = JsonTrialsResult::from_stats(&stats);
            println!("{}", serde_json::to_string_pretty(&json_result)?);
        }
    }

    Ok(())
}
