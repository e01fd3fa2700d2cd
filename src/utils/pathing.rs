use crate::common::{Cell, Direction};
use crate::environment::GridEnvironment;

/// Utility function for converting a position and a path
/// into a direction for the next movement on the path.
///
/// If the position is not on the path, it will return
/// the direction towards the first cell of the path, provided
/// that cell is adjacent.
///
/// Returns None if the current position is the final
/// cell in the path, or if the path is empty.
pub fn get_next_step_direction(current: Cell, path: &[Cell]) -> Option<Direction> {
    if let Some(i) = path.iter().position(|c| *c == current) {
        // Last entry means there's no next step
        return path.get(i + 1).and_then(|next| current.direction_to(*next));
    }

    path.first().and_then(|first| current.direction_to(*first))
}

/// Movement cost of a path under unit edge weights.
///
/// An empty path costs nothing, as does a path holding only its start cell.
pub fn path_cost(path: &[Cell]) -> u32 {
    path.len().saturating_sub(1) as u32
}

/// Checks that `path` runs from `start` to `goal` through walkable cells,
/// one orthogonal step at a time.
pub fn is_valid_path<E: GridEnvironment + ?Sized>(
    env: &E,
    path: &[Cell],
    start: Cell,
    goal: Cell,
) -> bool {
    if path.first() != Some(&start) || path.last() != Some(&goal) {
        return false;
    }

    path.iter().all(|cell| env.is_walkable(*cell))
        && path.windows(2).all(|pair| pair[0].is_adjacent_to(pair[1]))
}
