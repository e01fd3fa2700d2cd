use std::collections::{BTreeMap, HashSet};
use std::fmt;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::common::error::GridResult;
use crate::common::{Cell, GridError};

/// Identifier of a task placed on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub u32);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// The query surface the pathfinding core needs from the world it runs in.
///
/// The environment is the single owner of the task mapping; agents only
/// enumerate task cells and claim them through [GridEnvironment::claim_task].
pub trait GridEnvironment {
    fn is_within_bounds(&self, x: i32, y: i32) -> bool;

    fn is_barrier(&self, x: i32, y: i32) -> bool;

    /// All cells that currently hold a task, in ascending [Cell] order.
    fn task_cells(&self) -> Vec<Cell>;

    /// Removes and returns the task at `cell`, if there is one.
    ///
    /// A claimed task never reappears in [GridEnvironment::task_cells].
    fn claim_task(&mut self, cell: Cell) -> Option<TaskId>;

    /// Whether `cell` is inside the grid and not blocked.
    fn is_walkable(&self, cell: Cell) -> bool {
        self.is_within_bounds(cell.x, cell.y) && !self.is_barrier(cell.x, cell.y)
    }
}

/// A simple in-memory rectangular grid with barriers and tasks.
///
/// Coordinates run from `(0, 0)` in the top-left corner to
/// `(width - 1, height - 1)`.
#[derive(Debug, Clone)]
pub struct GridWorld {
    width: u32,
    height: u32,
    barriers: HashSet<Cell>,
    tasks: BTreeMap<Cell, TaskId>,
    next_task_id: u32,
}

impl GridWorld {
    /// Creates an empty grid with no barriers and no tasks.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            barriers: HashSet::new(),
            tasks: BTreeMap::new(),
            next_task_id: 1,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn task_at(&self, cell: Cell) -> Option<TaskId> {
        self.tasks.get(&cell).copied()
    }

    /// Marks `cell` as impassable.
    ///
    /// Fails if the cell is outside the grid or currently holds a task.
    pub fn add_barrier(&mut self, cell: Cell) -> GridResult<()> {
        if !self.is_within_bounds(cell.x, cell.y) {
            return Err(GridError::OutOfBounds(cell));
        }
        if self.tasks.contains_key(&cell) {
            return Err(GridError::TaskOccupied(cell));
        }
        self.barriers.insert(cell);
        Ok(())
    }

    /// Places a new task on `cell` and returns its identifier.
    ///
    /// Identifiers are handed out sequentially starting at 1.
    pub fn spawn_task(&mut self, cell: Cell) -> GridResult<TaskId> {
        if !self.is_within_bounds(cell.x, cell.y) {
            return Err(GridError::OutOfBounds(cell));
        }
        if self.barriers.contains(&cell) {
            return Err(GridError::Barrier(cell));
        }
        if self.tasks.contains_key(&cell) {
            return Err(GridError::TaskOccupied(cell));
        }

        let id = TaskId(self.next_task_id);
        self.next_task_id += 1;
        self.tasks.insert(cell, id);
        debug!("spawned {} at {}", id, cell);
        Ok(id)
    }

    /// Parses a grid from rows of characters.
    ///
    /// `.` is open floor, `#` is a barrier and `T` is open floor holding a
    /// task. Tasks are numbered in reading order. Blank lines are ignored,
    /// every other row must have the same width.
    ///
    /// # Example
    /// ```rust
    /// use gridtask_pathfinding::common::Cell;
    /// use gridtask_pathfinding::environment::{GridEnvironment, GridWorld};
    ///
    /// let world = GridWorld::from_ascii(
    ///     "
    ///     .#T
    ///     .#.
    ///     ...
    ///     ",
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(world.width(), 3);
    /// assert!(world.is_barrier(1, 0));
    /// assert_eq!(world.task_cells(), vec![Cell::new(2, 0)]);
    /// ```
    pub fn from_ascii(map: &str) -> GridResult<Self> {
        let rows: Vec<(usize, &str)> = map
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .collect();

        let width = rows.first().map(|(_, row)| row.chars().count()).unwrap_or(0);
        let mut world = GridWorld::new(width as u32, rows.len() as u32);

        for (y, (line, row)) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GridError::RaggedMap {
                    line: *line,
                    expected: width,
                    found,
                });
            }

            for (x, ch) in row.chars().enumerate() {
                let cell = Cell::new(x as i32, y as i32);
                match ch {
                    '.' => {}
                    '#' => world.add_barrier(cell)?,
                    'T' => {
                        world.spawn_task(cell)?;
                    }
                    _ => {
                        return Err(GridError::MalformedMap {
                            line: *line,
                            column: x + 1,
                            ch,
                        })
                    }
                }
            }
        }

        Ok(world)
    }

    /// Builds a grid with randomly placed barriers and tasks.
    ///
    /// The same `seed` always produces the same layout. Cells listed in
    /// `keep_clear` never receive a barrier or a task, which is how callers
    /// keep the agent's spawn cell open.
    pub fn generate(
        width: u32,
        height: u32,
        barrier_count: usize,
        task_count: usize,
        keep_clear: &[Cell],
        seed: u64,
    ) -> GridResult<Self> {
        let mut world = GridWorld::new(width, height);

        let mut free: Vec<Cell> = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Cell::new(x, y)))
            .filter(|cell| !keep_clear.contains(cell))
            .collect();

        let requested = barrier_count + task_count;
        if requested > free.len() {
            return Err(GridError::NotEnoughSpace {
                requested,
                available: free.len(),
            });
        }

        let mut rng = StdRng::seed_from_u64(seed);
        free.shuffle(&mut rng);

        let (barrier_cells, rest) = free.split_at(barrier_count);
        for cell in barrier_cells {
            world.add_barrier(*cell)?;
        }
        for cell in &rest[..task_count] {
            world.spawn_task(*cell)?;
        }

        debug!(
            "generated {}x{} grid with {} barriers and {} tasks (seed {})",
            width, height, barrier_count, task_count, seed
        );
        Ok(world)
    }
}

impl GridEnvironment for GridWorld {
    fn is_within_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn is_barrier(&self, x: i32, y: i32) -> bool {
        self.barriers.contains(&Cell::new(x, y))
    }

    fn task_cells(&self) -> Vec<Cell> {
        self.tasks.keys().copied().collect()
    }

    fn claim_task(&mut self, cell: Cell) -> Option<TaskId> {
        self.tasks.remove(&cell)
    }
}

impl fmt::Display for GridWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let cell = Cell::new(x, y);
                let ch = if self.barriers.contains(&cell) {
                    '#'
                } else if self.tasks.contains_key(&cell) {
                    'T'
                } else {
                    '.'
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
