use crate::common::traits::ManhattanDistance;

/// Helper function to create a heuristic cost function closure for a single goal node.
///
/// This heuristic cost is the Manhattan distance between the provided node and the goal
/// node, which never overestimates on a 4-directional unit-cost grid.
///
/// # Examples
/// ```rust
/// use gridtask_pathfinding::common::Cell;
/// use gridtask_pathfinding::utils::heuristics::heuristic_manhattan;
///
/// let goal = Cell::new(4, 0);
/// let heuristic_fn = heuristic_manhattan(goal);
///
/// assert_eq!(heuristic_fn(Cell::new(0, 0)), 4);
/// assert_eq!(heuristic_fn(Cell::new(4, 3)), 3);
/// assert_eq!(heuristic_fn(goal), 0);
/// ```
pub fn heuristic_manhattan<T: ManhattanDistance + Copy + 'static>(goal: T) -> impl Fn(T) -> u32 {
    move |node: T| node.manhattan_distance(goal)
}
