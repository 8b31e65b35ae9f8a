//! CLI command implementations for pathfinder.

pub(crate) mod solve;
pub(crate) mod trials;
pub(crate) mod validate;

mod output;

use clap::ValueEnum;
use pathfinder::{GeneticConfig, Grid, PathError};
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Route finding strategy for the `solve` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Strategy {
    /// Cost-optimal A* search.
    Astar,
    /// Evolutionary agent search.
    Genetic,
    /// Evolutionary search, then A* to the point the agents reached.
    Hybrid,
}

/// Output format for the `solve` and `trials` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Evolutionary search flags shared by `solve` and `trials`.
///
/// Flags override the config file, which overrides the built-in defaults.
#[derive(Debug, Clone, Default, clap::Args)]
pub(crate) struct GeneticArgs {
    /// Maximum number of generations
    #[arg(short, long)]
    generations: Option<usize>,

    /// Agents per generation (at least 3)
    #[arg(short, long)]
    agents: Option<usize>,

    /// Percentage of agents mutated per generation
    #[arg(long)]
    agent_ratio: Option<u32>,

    /// Percentage of moves rewritten in a mutated agent
    #[arg(long)]
    move_ratio: Option<u32>,

    /// Moves per agent (default: Free + Start cell count)
    #[arg(long)]
    moves: Option<usize>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with a genetic search configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl GeneticArgs {
    /// Build the effective configuration.
    pub(crate) fn resolve(&self) -> Result<GeneticConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GeneticConfig::default(),
        };
        if let Some(g) = self.generations {
            config.generations = g;
        }
        if let Some(a) = self.agents {
            config.agents = a;
        }
        if let Some(r) = self.agent_ratio {
            config.agent_mutation_ratio = r;
        }
        if let Some(r) = self.move_ratio {
            config.movement_mutation_ratio = r;
        }
        if self.moves.is_some() {
            config.moves = self.moves;
        }
        if let Some(s) = self.seed {
            config.seed = s;
        }
        config.validate()?;
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<GeneticConfig, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::new(format!("Failed to parse {}: {e}", path.display())))
}

/// Load a maze file, naming the file in any error.
pub(crate) fn load_maze(path: &Path) -> Result<Grid, CliError> {
    Grid::load(path).map_err(|e| CliError::new(format!("{}: {e}", path.display())))
}

/// Set up `env_logger`; `--debug` shows this crate's debug and trace output.
pub(crate) fn init_logging(debug: bool) {
    let default = if debug { "warn,pathfinder=trace" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<PathError> for CliError {
    fn from(e: PathError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ga.json");
        fs::write(&path, r#"{"generations": 7, "agents": 12, "seed": 5}"#).unwrap();

        let args = GeneticArgs {
            agents: Some(4),
            config: Some(path),
            ..GeneticArgs::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.generations, 7);
        assert_eq!(config.agents, 4);
        assert_eq!(config.seed, 5);
        assert_eq!(config.agent_mutation_ratio, GeneticConfig::default().agent_mutation_ratio);
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let args = GeneticArgs {
            agents: Some(2),
            ..GeneticArgs::default()
        };
        assert!(args.resolve().is_err());
    }
}
