use super::{Cell, Direction};

/// Trait that encapsulates taking a [Direction] and producing the
/// adjacent node from it.
///
/// Returns `None` only when the coordinate arithmetic would overflow;
/// grid bounds are the environment's concern, not this trait's.
pub trait AddDirection {
    fn checked_add_direction(self, direction: Direction) -> Option<Self>
    where
        Self: Sized;
}

impl AddDirection for Cell {
    fn checked_add_direction(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset();
        Some(Cell {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

/// Trait that encapsulates getting the 4-directional (taxicab) distance
/// from one node to another.
pub trait ManhattanDistance {
    fn manhattan_distance(self, other: Self) -> u32;
}

impl ManhattanDistance for Cell {
    fn manhattan_distance(self, other: Self) -> u32 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
    }
}

impl Cell {
    /// Returns the direction of a single orthogonal step from `self` to `other`,
    /// or `None` if the two cells are not adjacent.
    pub fn direction_to(self, other: Cell) -> Option<Direction> {
        Direction::iter().find(|dir| self.checked_add_direction(*dir) == Some(other))
    }

    /// Whether `other` is exactly one orthogonal step away.
    pub fn is_adjacent_to(self, other: Cell) -> bool {
        self.manhattan_distance(other) == 1
    }
}
