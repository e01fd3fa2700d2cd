// https://en.wikipedia.org/wiki/A*_search_algorithm

// Heap ordering pattern pulled (and modified) from: https://doc.rust-lang.org/nightly/std/collections/binary_heap/index.html#examples

use std::cmp::Ordering;
use std::collections::{
    hash_map::Entry,
    {BinaryHeap, HashMap},
};
use std::hash::Hash;

use log::{debug, warn};

use super::SearchResults;

/// A simple trait encapsulating what other traits are needed
/// for a type to be usable in the A* Algorithm.
pub trait AStarNode: Eq + Hash + Copy {}
impl<T> AStarNode for T where T: Eq + Hash + Copy {}

#[derive(Copy, Clone, Eq, PartialEq)]
struct State<T> {
    /// cost to reach this position (the g_score in A* terminology)
    g_score: u32,
    /// f_score is the sum of the known cost to reach this position (the g_score) plus the estimated cost remaining from this position in the best possible case
    f_score: u32,
    /// insertion counter, so that otherwise tied entries pop first-in first-out
    seq: u64,
    position: T,
}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap.
impl<T: Eq> Ord for State<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Notice that we flip the ordering on f_score and seq.
        // On equal f_score the deeper entry wins, then the older one.
        // `seq` is unique per entry, which keeps `PartialEq` and `Ord` consistent.
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| self.g_score.cmp(&other.g_score))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

// `PartialOrd` needs to be implemented as well.
impl<T: Eq> PartialOrd for State<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Calculates a shortest path from `start` to `goal` using the A* Algorithm.
///
/// Every step has a movement cost of 1. The algorithm doesn't care what type the nodes
/// are, as long as you provide a neighbors function that yields the nodes reachable in one
/// step, and a heuristic function that never overestimates the remaining cost to `goal`.
///
/// Only a parent link is stored per visited node; the path is rebuilt once, when the goal
/// is popped. Superseded frontier entries are left in the heap and skipped when popped.
///
/// The search gives up after `max_ops` node expansions.
///
/// # Example
/// ```rust
/// use gridtask_pathfinding::common::Cell;
/// use gridtask_pathfinding::environment::GridWorld;
/// use gridtask_pathfinding::utils::{grid_neighbors, heuristic_manhattan};
///
/// let world = GridWorld::from_ascii(
///     "
///     .#.
///     .#.
///     ...
///     ",
/// )
/// .unwrap();
/// let start = Cell::new(0, 0);
/// let goal = Cell::new(2, 0);
///
/// let search_results = gridtask_pathfinding::algorithms::astar::shortest_path_generic(
///     start,
///     goal,
///     grid_neighbors(&world),
///     heuristic_manhattan(goal),
///     2000,
/// );
///
/// if !search_results.incomplete() {
///   let path = search_results.path();
///   println!("Path: {:?}", path);
///   assert_eq!(search_results.cost(), 6);
/// }
/// else {
///   println!("Could not find A* shortest path.");
///   println!("Search Results: {:?}", search_results);
/// }
/// ```
///
/// Reference: https://en.wikipedia.org/wiki/A*_search_algorithm
pub fn shortest_path_generic<T: AStarNode, N, I, H>(
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
    let mut next_seq: u64 = 0;

    // g_scores[node] = cheapest known cost from `start` to `node`
    let mut g_scores: HashMap<T, u32> = HashMap::new();
    let mut parents: HashMap<T, T> = HashMap::new();
    let mut heap = BinaryHeap::new();

    g_scores.insert(start, 0);
    heap.push(State {
        g_score: 0,
        f_score: heuristic(start),
        seq: next_seq,
        position: start,
    });

    // Examine the frontier with lower cost nodes first (min-heap)
    while let Some(State {
        g_score, position, ..
    }) = heap.pop()
    {
        // We found the goal state, return the search results
        if position == goal {
            let ops_used = max_ops - remaining_ops;
            return match get_path_from_parents(&parents, start, position) {
                Some(path) => {
                    debug!("A* reached goal at cost {} using {} ops", g_score, ops_used);
                    SearchResults::found(path, ops_used)
                }
                None => SearchResults::not_found(ops_used),
            };
        }

        // Important as we may have already found a better way
        if g_scores
            .get(&position)
            .is_some_and(|best_g| g_score > *best_g)
        {
            continue;
        }

        // Stop searching if we've run out of remaining ops we're allowed to perform
        if remaining_ops == 0 {
            warn!("A* exhausted its budget of {} ops", max_ops);
            return SearchResults::not_found(max_ops);
        }
        remaining_ops -= 1;

        let next_g = g_score.saturating_add(1);
        for neighbor in neighbors(position) {
            let improved = match g_scores.entry(neighbor) {
                Entry::Vacant(v) => {
                    v.insert(next_g);
                    true
                }
                Entry::Occupied(mut o) => {
                    if next_g < *o.get() {
                        o.insert(next_g);
                        true
                    } else {
                        false
                    }
                }
            };

            // Relaxation, we have now found a better way
            if improved {
                parents.insert(neighbor, position);
                next_seq += 1;
                heap.push(State {
                    g_score: next_g,
                    f_score: next_g.saturating_add(heuristic(neighbor)),
                    seq: next_seq,
                    position: neighbor,
                });
            }
        }
    }

    // Goal not reachable
    debug!("A* frontier exhausted after {} ops", max_ops - remaining_ops);
    SearchResults::not_found(max_ops - remaining_ops)
}

fn get_path_from_parents<T: AStarNode>(
    parents: &HashMap<T, T>,
    origin: T,
    end: T,
) -> Option<Vec<T>> {
    let mut path = Vec::new();

    let mut current_pos = end;

    path.push(end);

    while current_pos != origin {
        let parent = parents.get(&current_pos)?;
        path.push(*parent);
        current_pos = *parent;
    }

    Some(path.into_iter().rev().collect())
}
