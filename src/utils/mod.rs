/// Heuristic closures for the search algorithms.
pub mod heuristics;

/// Neighbor generation over a [GridEnvironment](crate::environment::GridEnvironment).
pub mod neighbors;

/// Helpers for inspecting and following paths.
pub mod pathing;

pub use heuristics::heuristic_manhattan;
pub use neighbors::{cell_neighbors, grid_neighbors};
pub use pathing::{get_next_step_direction, is_valid_path, path_cost};
