/// Provides methods for pathfinding using the A* algorithm.
///
/// You most likely want to start with [shortest_path_generic](crate::algorithms::astar::shortest_path_generic),
/// or the [AStarSearch](crate::agent::strategy::AStarSearch) strategy when driving an agent.
pub mod astar;

/// Provides methods for pathfinding using the IDA* (iterative deepening A*) algorithm.
///
/// Memory use is proportional to the path depth rather than to the number of cells visited.
pub mod idastar;

/// The outcome of a single search call, shared by every algorithm in this module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults<T> {
    ops_used: u32,
    cost: u32,
    incomplete: bool,
    path: Vec<T>,
}

impl<T> SearchResults<T> {
    pub(crate) fn found(path: Vec<T>, ops_used: u32) -> Self {
        Self {
            ops_used,
            cost: path.len().saturating_sub(1) as u32,
            incomplete: false,
            path,
        }
    }

    pub(crate) fn not_found(ops_used: u32) -> Self {
        Self {
            ops_used,
            cost: 0,
            incomplete: true,
            path: Vec::new(),
        }
    }

    /// The number of expand node operations used
    pub fn ops(&self) -> u32 {
        self.ops_used
    }

    /// The movement cost of the result path
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Whether the search failed to reach the goal, either because no route
    /// exists or because the operation budget ran out
    pub fn incomplete(&self) -> bool {
        self.incomplete
    }

    /// A shortest path from the start node to the goal node, inclusive of both
    pub fn path(&self) -> &[T] {
        &self.path
    }

    /// Consumes the results, returning the path if the goal was reached.
    pub fn into_path(self) -> Option<Vec<T>> {
        if self.incomplete {
            None
        } else {
            Some(self.path)
        }
    }
}
