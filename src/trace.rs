//! Search tracing.
//!
//! Both strategies report what they do as [`TraceEvent`]s written to a
//! caller-owned [`TraceSink`]. The sink decides where lines end up: a log
//! file, the `log` facade, memory, or nowhere.

use crate::genetic::Agent;
use crate::grid::Coord;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Name of the trace file created by [`FileSink::create`].
pub const LOG_FILE_NAME: &str = "path-finder-logs.txt";

/// Destination for trace lines.
pub trait TraceSink {
    /// Accept one line of text (without trailing newline).
    fn write(&mut self, line: &str);
}

impl<T: TraceSink + ?Sized> TraceSink for &mut T {
    fn write(&mut self, line: &str) {
        (**self).write(line);
    }
}

impl TraceSink for Vec<String> {
    fn write(&mut self, line: &str) {
        self.push(line.to_owned());
    }
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn write(&mut self, _line: &str) {}
}

/// Sink that forwards lines to the `log` facade at trace level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn write(&mut self, line: &str) {
        log::trace!(target: "pathfinder::trace", "{line}");
    }
}

/// Sink writing to a file.
///
/// Writing never fails from the caller's point of view: the first I/O error
/// is kept and returned by [`FileSink::finish`], later lines are dropped.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
    error: Option<io::Error>,
}

impl FileSink {
    /// Create (or truncate) [`LOG_FILE_NAME`] inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(dir: &Path) -> io::Result<Self> {
        Self::create_file(&dir.join(LOG_FILE_NAME))
    }

    /// Create (or truncate) the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create_file(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            error: None,
        })
    }

    /// Path of the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush buffered lines and report the first write error, if any.
    ///
    /// # Errors
    ///
    /// Returns the first error seen while writing or flushing.
    pub fn finish(mut self) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()
    }
}

impl TraceSink for FileSink {
    fn write(&mut self, line: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.writer, "{line}") {
            self.error = Some(e);
        }
    }
}

/// A structured trace event.
///
/// `Display` renders one or more lines; [`emit`] writes them one by one.
#[derive(Debug, Clone, Copy)]
pub enum TraceEvent<'a> {
    /// A search is starting.
    SearchStarted {
        /// Strategy name.
        strategy: &'a str,
        /// Start coordinate.
        start: Coord,
        /// Exit coordinate.
        exit: Coord,
    },
    /// A* moved a node to the closed set.
    Expanded {
        /// The node's coordinate.
        coord: Coord,
        /// Its cost from start.
        cost: u32,
        /// Its total estimated cost.
        total: u32,
    },
    /// A* found a path.
    PathFound {
        /// The path, start to exit.
        path: &'a [Coord],
        /// Its total cost.
        cost: u32,
    },
    /// A* exhausted its open set.
    Exhausted {
        /// Nodes expanded before giving up.
        expanded: usize,
    },
    /// A generation begins.
    Generation {
        /// Zero-based generation number.
        generation: usize,
    },
    /// Snapshot of a population.
    Population {
        /// Population label.
        label: &'a str,
        /// Its agents.
        agents: &'a [Agent],
    },
    /// The elite of the current generation.
    BestAgent {
        /// The elite agent.
        agent: &'a Agent,
    },
    /// Parents chosen for a child.
    Parents {
        /// Child slot in the next population.
        child: usize,
        /// Father's index in the current population.
        father: usize,
        /// Mother's index in the current population.
        mother: usize,
    },
    /// An agent of the next population was mutated.
    Mutated {
        /// Agent slot.
        agent: usize,
        /// Move positions that changed.
        positions: &'a [usize],
    },
    /// The evolutionary search found a zero-score agent.
    Solved {
        /// Generation the agent was evaluated in.
        generation: usize,
        /// The solving agent.
        agent: &'a Agent,
    },
    /// The evolutionary search ran out of generations.
    GaveUp {
        /// Generations evaluated.
        generations: usize,
    },
}

fn write_coords(f: &mut fmt::Formatter<'_>, coords: &[Coord]) -> fmt::Result {
    for (i, c) in coords.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{c}")?;
    }
    Ok(())
}

impl fmt::Display for TraceEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::SearchStarted {
                strategy,
                start,
                exit,
            } => write!(f, "//// {strategy} search from {start} to {exit} ////"),
            Self::Expanded { coord, cost, total } => {
                write!(f, "Current cell= {coord} g={cost} f={total}")
            }
            Self::PathFound { path, cost } => {
                write!(f, "Path cells (cost {cost}): ")?;
                write_coords(f, path)
            }
            Self::Exhausted { expanded } => {
                write!(f, "Open set exhausted after {expanded} expansions")
            }
            Self::Generation { generation } => write!(f, "//// Generation: {generation}"),
            Self::Population { label, agents } => {
                write!(f, "[POPULATION] {label}:")?;
                for agent in agents {
                    write!(f, "\n{agent}")?;
                }
                Ok(())
            }
            Self::BestAgent { agent } => write!(f, "Best agent at generation: {agent}"),
            Self::Parents {
                child,
                father,
                mother,
            } => write!(f, "[CROSSOVER] child {child}: father={father} mother={mother}"),
            Self::Mutated { agent, positions } => {
                write!(f, "[MUTATION] agent {agent} at moves {positions:?}")
            }
            Self::Solved { generation, agent } => {
                write!(f, "Found path at generation {generation}: ")?;
                write_coords(f, agent.trail())
            }
            Self::GaveUp { generations } => {
                write!(f, "No path found after {generations} generations")
            }
        }
    }
}

/// Render `event` and write each of its lines to `sink`.
pub fn emit<S: TraceSink + ?Sized>(sink: &mut S, event: &TraceEvent<'_>) {
    let text = event.to_string();
    for line in text.lines() {
        sink.write(line);
    }
}
