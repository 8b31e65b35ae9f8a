//! A* search over a [`Grid`].
//!
//! The search keeps one node per discovered coordinate in an arena. Open
//! nodes live in an indexed heap ordered by total cost, then by estimated
//! cost to the goal, then by discovery order; a cheaper route to an open node
//! updates it in place. Given the same grid and endpoints the search always
//! returns the same path.

mod open_set;

use crate::cost::CostModel;
use crate::error::{PathError, PathResult};
use crate::grid::{CellKind, Coord, Grid, Move};
use crate::trace::{emit, NullSink, TraceEvent, TraceSink};
use open_set::{OpenKey, OpenSet};

/// Per-coordinate search record.
#[derive(Debug, Clone, Copy)]
struct Node {
    coord: Coord,
    /// Cost from start (g).
    cost_from_start: u32,
    /// Estimated cost to goal (h), fixed at creation.
    cost_to_goal: u32,
    /// Arena index of the predecessor.
    parent: Option<usize>,
    closed: bool,
}

impl Node {
    const fn total_cost(&self) -> u32 {
        self.cost_from_start + self.cost_to_goal
    }
}

/// Where the search loop stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Searching,
    /// Arena index of the goal node.
    Found(usize),
    Exhausted,
}

/// Result of a successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AStarOutcome {
    /// Coordinates from start to exit, both included.
    pub path: Vec<Coord>,
    /// Total step cost of `path`.
    pub cost: u32,
    /// Number of nodes moved to the closed set.
    pub expanded: usize,
}

/// A* route finder.
#[derive(Debug)]
pub struct AStarSearch<S = NullSink> {
    cost: CostModel,
    sink: S,
}

impl Default for AStarSearch<NullSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl AStarSearch<NullSink> {
    /// Create a search with the default cost model and no tracing.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(NullSink)
    }
}

impl<S: TraceSink> AStarSearch<S> {
    /// Create a search that traces into `sink`.
    #[must_use]
    pub fn with_sink(sink: S) -> Self {
        Self {
            cost: CostModel::default(),
            sink,
        }
    }

    /// Replace the cost model.
    #[must_use]
    pub fn cost_model(mut self, cost: CostModel) -> Self {
        self.cost = cost;
        self
    }

    /// The cost model in use.
    #[must_use]
    pub fn model(&self) -> &CostModel {
        &self.cost
    }

    /// Give the sink back to the caller.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Find a cost-optimal path from `start` to `exit`.
    ///
    /// # Errors
    ///
    /// See [`AStarSearch::search`].
    pub fn find_path(&mut self, grid: &Grid, start: Coord, exit: Coord) -> PathResult<Vec<Coord>> {
        self.search(grid, start, exit).map(|outcome| outcome.path)
    }

    /// Find a cost-optimal path and report its cost and the work done.
    ///
    /// # Errors
    ///
    /// - [`PathError::OutOfBounds`] if either endpoint is outside the grid.
    /// - [`PathError::InvalidConfiguration`] if either endpoint is Blocked.
    /// - [`PathError::NoPathFound`] if the exit cannot be reached.
    pub fn search(&mut self, grid: &Grid, start: Coord, exit: Coord) -> PathResult<AStarOutcome> {
        for endpoint in [start, exit] {
            if grid.cell_at(endpoint)? == CellKind::Blocked {
                return Err(PathError::invalid(format!("endpoint {endpoint} is blocked")));
            }
        }

        emit(
            &mut self.sink,
            &TraceEvent::SearchStarted {
                strategy: "A*",
                start,
                exit,
            },
        );

        let cell_count = grid.size() * grid.size();
        // Arena index of the node for each grid cell
        let mut by_cell: Vec<Option<usize>> = vec![None; cell_count];
        let mut nodes: Vec<Node> = Vec::new();
        let mut open = OpenSet::with_capacity(cell_count.min(1024));
        let mut expanded = 0usize;

        let start_node = Node {
            coord: start,
            cost_from_start: 0,
            cost_to_goal: self.cost.estimate(start, exit),
            parent: None,
            closed: false,
        };
        nodes.push(start_node);
        if let Some(cell) = grid.cell_index(start) {
            by_cell[cell] = Some(0);
        }
        open.push(0, key_of(&start_node, 0));

        let mut state = State::Searching;
        while state == State::Searching {
            let Some(current) = open.pop() else {
                state = State::Exhausted;
                break;
            };

            let node = nodes[current];
            if node.coord == exit {
                state = State::Found(current);
                break;
            }

            nodes[current].closed = true;
            expanded += 1;
            emit(
                &mut self.sink,
                &TraceEvent::Expanded {
                    coord: node.coord,
                    cost: node.cost_from_start,
                    total: node.total_cost(),
                },
            );

            for mv in Move::ALL {
                let next = node.coord.step(mv);
                let Some(cell) = grid.cell_index(next) else {
                    continue;
                };
                if by_cell[cell].is_some_and(|i| nodes[i].closed) {
                    continue;
                }
                let Some(step) = self.cost.step_cost(grid, node.coord, next) else {
                    continue;
                };
                let tentative = node.cost_from_start + step;

                match by_cell[cell] {
                    Some(i) => {
                        if tentative < nodes[i].cost_from_start {
                            nodes[i].cost_from_start = tentative;
                            nodes[i].parent = Some(current);
                            open.decrease(i, key_of(&nodes[i], i));
                        }
                    }
                    None => {
                        let i = nodes.len();
                        let fresh = Node {
                            coord: next,
                            cost_from_start: tentative,
                            cost_to_goal: self.cost.estimate(next, exit),
                            parent: Some(current),
                            closed: false,
                        };
                        nodes.push(fresh);
                        by_cell[cell] = Some(i);
                        open.push(i, key_of(&fresh, i));
                    }
                }
            }
        }

        match state {
            State::Found(goal) => {
                let path = reconstruct(&nodes, goal);
                let cost = nodes[goal].cost_from_start;
                emit(&mut self.sink, &TraceEvent::PathFound { path: &path, cost });
                log::debug!(
                    "A* reached {exit} from {start}: cost {cost}, {} steps, {expanded} expansions",
                    path.len().saturating_sub(1)
                );
                Ok(AStarOutcome {
                    path,
                    cost,
                    expanded,
                })
            }
            State::Exhausted | State::Searching => {
                emit(&mut self.sink, &TraceEvent::Exhausted { expanded });
                log::debug!("A* found no path from {start} to {exit} after {expanded} expansions");
                Err(PathError::NoPathFound { start, exit })
            }
        }
    }
}

/// Heap key of a node. Arena indices follow discovery order.
fn key_of(node: &Node, index: usize) -> OpenKey {
    OpenKey {
        total: node.total_cost(),
        to_goal: node.cost_to_goal,
        order: index,
    }
}

/// Follow predecessor links from `goal` back to the start, then reverse.
fn reconstruct(nodes: &[Node], goal: usize) -> Vec<Coord> {
    let mut path = Vec::new();
    let mut cursor = Some(goal);
    while let Some(i) = cursor {
        path.push(nodes[i].coord);
        cursor = nodes[i].parent;
    }
    path.reverse();
    path
}
