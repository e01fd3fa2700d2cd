use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithms::{astar, idastar};
use crate::common::Cell;
use crate::environment::GridEnvironment;
use crate::utils::{grid_neighbors, heuristic_manhattan};

/// A search strategy maps a start and goal cell to a path, or to `None` when
/// the goal can't be reached.
///
/// Returned paths include both endpoints, so a path of length `n` costs `n - 1`.
pub trait PathSearch {
    fn find_path<E: GridEnvironment + ?Sized>(
        &self,
        env: &E,
        start: Cell,
        goal: Cell,
    ) -> Option<Vec<Cell>>;
}

/// Best-first search with a priority-queue frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AStarSearch {
    max_ops: u32,
}

impl AStarSearch {
    /// A search with no practical expansion budget.
    pub fn new() -> Self {
        Self::with_max_ops(u32::MAX)
    }

    pub fn with_max_ops(max_ops: u32) -> Self {
        Self { max_ops }
    }
}

impl Default for AStarSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl PathSearch for AStarSearch {
    fn find_path<E: GridEnvironment + ?Sized>(
        &self,
        env: &E,
        start: Cell,
        goal: Cell,
    ) -> Option<Vec<Cell>> {
        astar::shortest_path_generic(
            start,
            goal,
            grid_neighbors(env),
            heuristic_manhattan(goal),
            self.max_ops,
        )
        .into_path()
    }
}

/// Iterative-deepening depth-first search with bounded memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdaStarSearch {
    max_ops: u32,
}

impl IdaStarSearch {
    /// A search with no practical expansion budget.
    pub fn new() -> Self {
        Self::with_max_ops(u32::MAX)
    }

    pub fn with_max_ops(max_ops: u32) -> Self {
        Self { max_ops }
    }
}

impl Default for IdaStarSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl PathSearch for IdaStarSearch {
    fn find_path<E: GridEnvironment + ?Sized>(
        &self,
        env: &E,
        start: Cell,
        goal: Cell,
    ) -> Option<Vec<Cell>> {
        idastar::shortest_path_generic(
            start,
            goal,
            grid_neighbors(env),
            heuristic_manhattan(goal),
            self.max_ops,
        )
        .into_path()
    }
}

/// Names the search algorithm in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchAlgorithm {
    #[default]
    AStar,
    IdaStar,
}

impl SearchAlgorithm {
    /// Builds the strategy for this algorithm with the given expansion budget.
    pub fn strategy(self, max_ops: u32) -> SearchStrategy {
        match self {
            SearchAlgorithm::AStar => SearchStrategy::AStar(AStarSearch::with_max_ops(max_ops)),
            SearchAlgorithm::IdaStar => {
                SearchStrategy::IdaStar(IdaStarSearch::with_max_ops(max_ops))
            }
        }
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchAlgorithm::AStar => write!(f, "A*"),
            SearchAlgorithm::IdaStar => write!(f, "IDA*"),
        }
    }
}

/// A strategy picked at runtime, e.g. from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    AStar(AStarSearch),
    IdaStar(IdaStarSearch),
}

impl SearchStrategy {
    pub fn algorithm(&self) -> SearchAlgorithm {
        match self {
            SearchStrategy::AStar(_) => SearchAlgorithm::AStar,
            SearchStrategy::IdaStar(_) => SearchAlgorithm::IdaStar,
        }
    }
}

impl PathSearch for SearchStrategy {
    fn find_path<E: GridEnvironment + ?Sized>(
        &self,
        env: &E,
        start: Cell,
        goal: Cell,
    ) -> Option<Vec<Cell>> {
        match self {
            SearchStrategy::AStar(search) => search.find_path(env, start, goal),
            SearchStrategy::IdaStar(search) => search.find_path(env, start, goal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::GridWorld;

    #[test]
    fn algorithm_names_parse_from_config() {
        #[derive(Deserialize)]
        struct Wrapper {
            algorithm: SearchAlgorithm,
        }

        let parsed: Wrapper = toml::from_str("algorithm = \"idastar\"").unwrap();
        assert_eq!(parsed.algorithm, SearchAlgorithm::IdaStar);
        let parsed: Wrapper = toml::from_str("algorithm = \"astar\"").unwrap();
        assert_eq!(parsed.algorithm, SearchAlgorithm::AStar);
        assert!(toml::from_str::<Wrapper>("algorithm = \"dijkstra\"").is_err());
    }

    #[test]
    fn configured_strategy_dispatches() {
        let world = GridWorld::new(4, 4);
        let start = Cell::new(0, 0);
        let goal = Cell::new(3, 3);

        for algorithm in [SearchAlgorithm::AStar, SearchAlgorithm::IdaStar] {
            let strategy = algorithm.strategy(10_000);
            assert_eq!(strategy.algorithm(), algorithm);

            let path = strategy.find_path(&world, start, goal).unwrap();
            assert_eq!(path.len(), 7, "{}", algorithm);
        }
    }

    #[test]
    fn budget_exhaustion_reports_no_path() {
        let world = GridWorld::new(10, 10);
        let start = Cell::new(0, 0);
        let goal = Cell::new(9, 9);

        assert_eq!(AStarSearch::with_max_ops(3).find_path(&world, start, goal), None);
        assert_eq!(IdaStarSearch::with_max_ops(3).find_path(&world, start, goal), None);
        assert!(AStarSearch::new().find_path(&world, start, goal).is_some());
    }
}
