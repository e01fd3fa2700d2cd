use std::collections::{BTreeMap, VecDeque};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::common::Cell;
use crate::environment::{GridEnvironment, TaskId};

/// Nearest-task selection.
pub mod assignment;

/// Interchangeable search strategies.
pub mod strategy;

#[cfg(test)]
mod agent_tests;

pub use assignment::{find_nearest_task, Assignment};
pub use strategy::{AStarSearch, IdaStarSearch, PathSearch, SearchAlgorithm, SearchStrategy};

/// Whether an agent is following a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentStatus {
    Idle,
    Moving,
}

/// Cost recorded for one completed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCost {
    pub task: TaskId,
    pub cost: u32,
}

/// A read-only snapshot of an agent, for display layers and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentReport {
    pub position: Cell,
    pub status: AgentStatus,
    pub remaining_steps: usize,
    pub tasks_completed: usize,
    pub completed_tasks: Vec<TaskId>,
    pub task_costs: Vec<TaskCost>,
    pub total_path_cost: u32,
}

/// A single agent that walks to the nearest task, one cell per tick.
///
/// The agent never searches on its own; a driving loop calls
/// [Agent::assign_nearest_task] while the agent is idle and [Agent::tick]
/// once per frame while it is moving.
///
/// # Example
/// ```rust
/// use gridtask_pathfinding::agent::{Agent, AStarSearch};
/// use gridtask_pathfinding::common::Cell;
/// use gridtask_pathfinding::environment::GridWorld;
///
/// let mut world = GridWorld::from_ascii("...T").unwrap();
/// let mut agent = Agent::new(AStarSearch::new());
///
/// assert!(agent.assign_nearest_task(&world));
/// while agent.is_moving() {
///     agent.tick(&mut world);
/// }
///
/// assert_eq!(agent.position(), Cell::new(3, 0));
/// assert_eq!(agent.tasks_completed(), 1);
/// assert_eq!(agent.total_path_cost(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Agent<S> {
    strategy: S,
    position: Cell,
    path: VecDeque<Cell>,
    moving: bool,
    current_path_cost: u32,
    completed_tasks: Vec<TaskId>,
    task_costs: BTreeMap<TaskId, u32>,
    total_path_cost: u32,
}

impl<S: PathSearch> Agent<S> {
    /// Spawns an idle agent at `(0, 0)`.
    pub fn new(strategy: S) -> Self {
        Self::with_position(strategy, Cell::new(0, 0))
    }

    /// Spawns an idle agent at `position`.
    pub fn with_position(strategy: S, position: Cell) -> Self {
        Self {
            strategy,
            position,
            path: VecDeque::new(),
            moving: false,
            current_path_cost: 0,
            completed_tasks: Vec::new(),
            task_costs: BTreeMap::new(),
            total_path_cost: 0,
        }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn status(&self) -> AgentStatus {
        if self.moving {
            AgentStatus::Moving
        } else {
            AgentStatus::Idle
        }
    }

    /// Cells still to be visited, not including the current position.
    pub fn remaining_path(&self) -> impl Iterator<Item = Cell> + '_ {
        self.path.iter().copied()
    }

    pub fn tasks_completed(&self) -> usize {
        self.completed_tasks.len()
    }

    /// Completed task identifiers, in completion order.
    pub fn completed_tasks(&self) -> &[TaskId] {
        &self.completed_tasks
    }

    /// Path cost of the assignment during which `task` was completed.
    pub fn task_cost(&self, task: TaskId) -> Option<u32> {
        self.task_costs.get(&task).copied()
    }

    pub fn total_path_cost(&self) -> u32 {
        self.total_path_cost
    }

    /// Picks the nearest reachable task and starts moving towards it.
    ///
    /// Any path in progress is replaced. Returns `false`, leaving the agent
    /// idle, when no task can be reached.
    ///
    /// If the nearest task is on the agent's own cell the agent stays idle;
    /// follow up with [Agent::check_task_completion] to claim it.
    pub fn assign_nearest_task<E: GridEnvironment + ?Sized>(&mut self, env: &E) -> bool {
        let Some(assignment) = find_nearest_task(&self.strategy, env, self.position) else {
            debug!("no reachable task from {}", self.position);
            self.path.clear();
            self.moving = false;
            return false;
        };

        info!(
            "assigned task at {} from {} (cost {})",
            assignment.task,
            self.position,
            assignment.cost()
        );

        self.current_path_cost = assignment.cost();
        // The first cell is where we're standing
        self.path = assignment.path.into_iter().skip(1).collect();
        self.moving = !self.path.is_empty();
        true
    }

    /// Advances one cell along the current path and claims any task found there.
    ///
    /// Returns the task claimed on this step. Does nothing when idle.
    pub fn tick<E: GridEnvironment + ?Sized>(&mut self, env: &mut E) -> Option<TaskId> {
        let Some(next) = self.path.pop_front() else {
            self.moving = false;
            return None;
        };

        debug!(
            "stepping {:?} from {} to {}",
            self.position.direction_to(next),
            self.position,
            next
        );
        self.position = next;
        if self.path.is_empty() {
            self.moving = false;
        }

        self.check_task_completion(env)
    }

    /// Claims the task under the agent, if any, and records its cost.
    ///
    /// Only needed by callers that move the agent onto a task some other way;
    /// [Agent::tick] already does this after every step.
    pub fn check_task_completion<E: GridEnvironment + ?Sized>(
        &mut self,
        env: &mut E,
    ) -> Option<TaskId> {
        let task = env.claim_task(self.position)?;

        self.completed_tasks.push(task);
        self.task_costs.insert(task, self.current_path_cost);
        self.total_path_cost += self.current_path_cost;

        info!(
            "completed {} at {} (cost {}, total {})",
            task, self.position, self.current_path_cost, self.total_path_cost
        );
        Some(task)
    }

    pub fn report(&self) -> AgentReport {
        AgentReport {
            position: self.position,
            status: self.status(),
            remaining_steps: self.path.len(),
            tasks_completed: self.tasks_completed(),
            completed_tasks: self.completed_tasks.clone(),
            task_costs: self
                .completed_tasks
                .iter()
                .filter_map(|task| {
                    self.task_cost(*task)
                        .map(|cost| TaskCost { task: *task, cost })
                })
                .collect(),
            total_path_cost: self.total_path_cost,
        }
    }
}
