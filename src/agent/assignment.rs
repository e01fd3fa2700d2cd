use log::debug;

use crate::common::Cell;
use crate::environment::GridEnvironment;
use crate::utils::path_cost;

use super::strategy::PathSearch;

/// The task an agent was sent to, and the route to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub task: Cell,
    /// Full path from the agent's position to `task`, both included.
    pub path: Vec<Cell>,
}

impl Assignment {
    pub fn cost(&self) -> u32 {
        path_cost(&self.path)
    }
}

/// Runs `strategy` from `start` to every live task and keeps the shortest path.
///
/// Tasks are visited in [GridEnvironment::task_cells] order and a later task only
/// replaces the current best on a strictly shorter path, so ties go to the lowest
/// task cell. Unreachable tasks are skipped. Returns `None` when no task can be reached.
pub fn find_nearest_task<S, E>(strategy: &S, env: &E, start: Cell) -> Option<Assignment>
where
    S: PathSearch + ?Sized,
    E: GridEnvironment + ?Sized,
{
    let mut nearest: Option<Assignment> = None;

    for task in env.task_cells() {
        let Some(path) = strategy.find_path(env, start, task) else {
            debug!("task at {} is unreachable from {}", task, start);
            continue;
        };

        if nearest
            .as_ref()
            .map_or(true, |best| path.len() < best.path.len())
        {
            nearest = Some(Assignment { task, path });
        }
    }

    nearest
}
