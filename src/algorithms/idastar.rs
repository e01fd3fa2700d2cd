// https://en.wikipedia.org/wiki/Iterative_deepening_A*

use log::{debug, warn};

use super::SearchResults;

/// A simple trait encapsulating what other traits are needed
/// for a type to be usable in the IDA* Algorithm.
pub trait IdaStarNode: Eq + Copy {}
impl<T> IdaStarNode for T where T: Eq + Copy {}

/// Outcome of one depth-first pass under a fixed cost bound.
enum Bounded<T> {
    /// The goal was reached; holds the full branch from start to goal.
    Found(Vec<T>),
    /// Some branch was pruned; holds the smallest f-cost that exceeded the bound.
    Exceeded(u32),
    /// No branch was pruned and the goal was not reached.
    Exhausted,
    OutOfOps,
}

/// Calculates a shortest path from `start` to `goal` using the IDA* Algorithm.
///
/// Every step has a movement cost of 1. Each pass is a depth-first search that prunes any
/// branch whose `g + heuristic` exceeds the current bound; the bound starts at
/// `heuristic(start)` and is raised to the smallest pruned value until the goal is reached
/// or nothing was pruned. Nodes already on the current branch are skipped, so sibling
/// branches may revisit the same node.
///
/// The depth-first pass runs on an explicit stack of neighbor iterators, one per node on
/// the current branch, so memory use is proportional to the path depth.
///
/// The search gives up after `max_ops` node expansions, summed over all passes.
///
/// # Example
/// ```rust
/// use gridtask_pathfinding::common::Cell;
/// use gridtask_pathfinding::environment::GridWorld;
/// use gridtask_pathfinding::utils::{grid_neighbors, heuristic_manhattan};
///
/// let world = GridWorld::new(5, 1);
/// let start = Cell::new(0, 0);
/// let goal = Cell::new(4, 0);
///
/// let search_results = gridtask_pathfinding::algorithms::idastar::shortest_path_generic(
///     start,
///     goal,
///     grid_neighbors(&world),
///     heuristic_manhattan(goal),
///     2000,
/// );
///
/// assert!(!search_results.incomplete());
/// assert_eq!(search_results.cost(), 4);
/// ```
///
/// Reference: https://en.wikipedia.org/wiki/Iterative_deepening_A*
pub fn shortest_path_generic<T: IdaStarNode, N, I, H>(
    start: T,
    goal: T,
    neighbors: N,
    heuristic: H,
    max_ops: u32,
) -> SearchResults<T>
where
    N: Fn(T) -> I,
    I: IntoIterator<Item = T>,
    H: Fn(T) -> u32,
{
    let mut remaining_ops: u32 = max_ops;
    let mut bound = heuristic(start);
    let mut iterations: u32 = 0;

    loop {
        iterations += 1;

        match bounded_search(start, goal, bound, &neighbors, &heuristic, &mut remaining_ops) {
            Bounded::Found(path) => {
                debug!(
                    "IDA* reached goal at cost {} after {} iterations using {} ops",
                    path.len() - 1,
                    iterations,
                    max_ops - remaining_ops
                );
                return SearchResults::found(path, max_ops - remaining_ops);
            }
            Bounded::Exceeded(next_bound) => {
                debug!("IDA* raising bound from {} to {}", bound, next_bound);
                bound = next_bound;
            }
            Bounded::Exhausted => {
                debug!(
                    "IDA* found no path after {} iterations using {} ops",
                    iterations,
                    max_ops - remaining_ops
                );
                return SearchResults::not_found(max_ops - remaining_ops);
            }
            Bounded::OutOfOps => {
                warn!("IDA* exhausted its budget of {} ops", max_ops);
                return SearchResults::not_found(max_ops);
            }
        }
    }
}

fn bounded_search<T, N, I, H>(
    start: T,
    goal: T,
    bound: u32,
    neighbors: &N,
    heuristic: &H,
    remaining_ops: &mut u32,
) -> Bounded<T>
where
    T: IdaStarNode,
    N: Fn(T) -> I,
    I: IntoIterator<Item = T>,
    H: Fn(T) -> u32,
{
    let start_f = heuristic(start);
    if start_f > bound {
        return Bounded::Exceeded(start_f);
    }
    if start == goal {
        return Bounded::Found(vec![start]);
    }

    if *remaining_ops == 0 {
        return Bounded::OutOfOps;
    }
    *remaining_ops -= 1;

    // path[i] is the node whose unvisited children are in stack[i]; its g-cost is i
    let mut path: Vec<T> = vec![start];
    let mut stack: Vec<I::IntoIter> = vec![neighbors(start).into_iter()];
    let mut next_bound: Option<u32> = None;

    while let Some(children) = stack.last_mut() {
        let Some(node) = children.next() else {
            // Every child has been tried, backtrack
            stack.pop();
            path.pop();
            continue;
        };

        // Skip nodes already on the current branch to avoid cycles
        if path.contains(&node) {
            continue;
        }

        let g_score = path.len() as u32;
        let f_score = g_score.saturating_add(heuristic(node));
        if f_score > bound {
            next_bound = Some(next_bound.map_or(f_score, |b| b.min(f_score)));
            continue;
        }

        path.push(node);
        if node == goal {
            return Bounded::Found(path);
        }

        if *remaining_ops == 0 {
            return Bounded::OutOfOps;
        }
        *remaining_ops -= 1;

        stack.push(neighbors(node).into_iter());
    }

    match next_bound {
        Some(b) => Bounded::Exceeded(b),
        None => Bounded::Exhausted,
    }
}
