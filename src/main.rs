//! Pathfinder CLI - find routes through maze files.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Pathfinder - A* and evolutionary route finding through mazes
#[derive(Parser, Debug)]
#[command(name = "pathfinder")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Show debug logging and forward search traces to the log
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Find a route through a maze
    Solve {
        /// Maze file
        #[arg(required = true)]
        maze: PathBuf,

        /// Search strategy
        #[arg(long, default_value = "genetic")]
        strategy: cli::Strategy,

        #[command(flatten)]
        genetic: cli::GeneticArgs,

        /// Write the search trace to path-finder-logs.txt in this directory
        #[arg(long)]
        log_dir: Option<PathBuf>,

        /// Let A* cross bonus cells at this extra cost (default: avoid them)
        #[arg(long)]
        bonus_surcharge: Option<u32>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Run many seeded evolutionary searches and report the success rate
    Trials {
        /// Maze file
        #[arg(required = true)]
        maze: PathBuf,

        /// Number of runs (default: 100)
        #[arg(short, long, default_value = "100")]
        runs: u64,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,

        #[command(flatten)]
        genetic: cli::GeneticArgs,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Check a maze file and print its statistics
    Validate {
        /// Maze file to validate
        #[arg(required = true)]
        maze: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_logging(args.debug);

    let result = match args.command {
        Commands::Solve {
            maze,
            strategy,
            genetic,
            log_dir,
            bonus_surcharge,
            format,
        } => cli::solve::execute(maze, strategy, &genetic, log_dir, bonus_surcharge, format),

        Commands::Trials {
            maze,
            runs,
            threads,
            progress,
            genetic,
            format,
        } => cli::trials::execute(maze, runs, threads, progress, &genetic, format),

        Commands::Validate { maze } => cli::validate::execute(maze),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_solve_flags() {
        let args = Args::try_parse_from([
            "pathfinder",
            "solve",
            "maze.txt",
            "--strategy",
            "hybrid",
            "-g",
            "50",
            "--agent-ratio",
            "30",
            "--format",
            "json",
        ])
        .unwrap();
        let Commands::Solve {
            strategy, format, ..
        } = args.command
        else {
            panic!("expected solve");
        };
        assert_eq!(strategy, cli::Strategy::Hybrid);
        assert_eq!(format, cli::OutputFormat::Json);
    }
}
