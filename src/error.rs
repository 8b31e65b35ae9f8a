//! Error types for grid access and route searches.

use crate::grid::Coord;

/// Errors reported by the grid, the maze loader and both search strategies.
///
/// Every variant is recoverable: callers may retry with other parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// A coordinate lies outside the grid.
    #[error("coordinate {coord} is outside the {size}x{size} grid")]
    OutOfBounds {
        /// The offending coordinate.
        coord: Coord,
        /// Side length of the grid.
        size: usize,
    },
    /// A* exhausted its open set before reaching the exit.
    #[error("no path from {start} to {exit}")]
    NoPathFound {
        /// Where the search started.
        start: Coord,
        /// Where the search was heading.
        exit: Coord,
    },
    /// The evolutionary search ran out of generations without a zero-score agent.
    #[error("no solution found after {generations} generations")]
    NoSolutionFound {
        /// Number of generations that were evaluated.
        generations: usize,
    },
    /// Parameters or maze data were rejected before any search began.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl PathError {
    /// Shorthand for building an [`PathError::InvalidConfiguration`].
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }
}

/// Result type used throughout the crate.
pub type PathResult<T> = Result<T, PathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PathError::OutOfBounds {
            coord: Coord::new(4, -1),
            size: 4,
        };
        assert_eq!(err.to_string(), "coordinate (4, -1) is outside the 4x4 grid");

        let err = PathError::NoSolutionFound { generations: 12 };
        assert!(err.to_string().contains("12 generations"));

        let err = PathError::invalid("need at least 3 agents");
        assert_eq!(err.to_string(), "invalid configuration: need at least 3 agents");
    }
}
