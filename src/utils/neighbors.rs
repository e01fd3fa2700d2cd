use crate::common::traits::AddDirection;
use crate::common::{Cell, Direction};
use crate::environment::GridEnvironment;

/// Returns the orthogonally adjacent cells of `cell` that are inside the grid
/// and not barriers, in [Direction::ALL] order.
///
/// Returns an empty vector if the cell is fully enclosed.
pub fn cell_neighbors<E: GridEnvironment + ?Sized>(env: &E, cell: Cell) -> Vec<Cell> {
    Direction::iter()
        .filter_map(|dir| cell.checked_add_direction(dir))
        .filter(|next| env.is_walkable(*next))
        .collect()
}

/// Builds a neighbors function closure over an environment, in the shape the
/// search algorithms expect.
///
/// # Example
/// ```rust
/// use gridtask_pathfinding::common::Cell;
/// use gridtask_pathfinding::environment::GridWorld;
/// use gridtask_pathfinding::utils::neighbors::grid_neighbors;
///
/// let world = GridWorld::from_ascii("...\n.#.\n...").unwrap();
/// let neighbors_fn = grid_neighbors(&world);
///
/// assert_eq!(neighbors_fn(Cell::new(1, 0)), vec![Cell::new(0, 0), Cell::new(2, 0)]);
/// ```
pub fn grid_neighbors<E: GridEnvironment + ?Sized>(env: &E) -> impl Fn(Cell) -> Vec<Cell> + '_ {
    move |cell: Cell| cell_neighbors(env, cell)
}
