//! Dijkstra's Algorithm
//!
//! Dijkstra's algorithm behaves like a breadth first search, but always
//! expands the cheapest known state next, even when transitions have
//! varying costs. A path to a state is replaced whenever a strictly
//! cheaper one turns up before the state is expanded.
//!
//! All transition costs must be non-negative; a negative cost stops the
//! search with [crate::SearchError::InvalidCost].

use crate::algorithm::heap::PriorityQueue;
use crate::algorithm::{by_priority, lower_cost, with_cost, Entry, Searcher, Traversal};
use crate::hashing::{structural_key, StateKey, StructuralHash};
use crate::traits::{Cost, SearchKey};

/// Build a Dijkstra's Algorithm searcher which identifies states with `key`.
///
/// `next` produces each neighbor together with the cost of moving to it.
pub fn build_by_key<'a, S, K, C, N, I, KF>(initial: S, mut next: N, key: KF) -> Searcher<'a, S, K, C>
where
    S: Clone + 'a,
    K: SearchKey + 'a,
    C: Cost + 'a,
    N: FnMut(&S) -> I + 'a,
    I: IntoIterator<Item = (S, C)>,
    KF: FnMut(&S) -> K + 'a,
{
    let frontier: PriorityQueue<Entry<S, K, C>, _> = PriorityQueue::new(by_priority::<S, K, C>);
    let neighbors = move |state: &S| -> Vec<(S, C)> { next(state).into_iter().collect() };
    let priority = |_: &S, g: C| g;

    Searcher::new(
        initial,
        Box::new(neighbors),
        Box::new(key),
        Box::new(frontier),
        lower_cost,
        Some(Box::new(priority)),
    )
}

/// Build a Dijkstra's Algorithm searcher over structurally hashed states.
pub fn build<'a, S, C, N, I>(initial: S, next: N) -> Searcher<'a, S, StateKey, C>
where
    S: StructuralHash + Clone + 'a,
    C: Cost + 'a,
    N: FnMut(&S) -> I + 'a,
    I: IntoIterator<Item = (S, C)>,
{
    build_by_key(initial, next, structural_key())
}

/// Visit states in order of increasing path cost.
pub fn traverse<'a, S, C, N, I>(initial: S, next: N) -> Traversal<'a, S, StateKey, C>
where
    S: StructuralHash + Clone + 'a,
    C: Cost + 'a,
    N: FnMut(&S) -> I + 'a,
    I: IntoIterator<Item = (S, C)>,
{
    build(initial, next).traverse()
}

/// Perform a search using Dijkstra's algorithm, with neighbors and
/// their transition costs generated together.
///
/// Returns the total cost and the states after `initial` on the cheapest
/// path to a state accepted by `found`. Returns `None` when no such state is
/// reachable, or when a negative cost is encountered.
pub fn run_assoc<S, C, N, I, F>(initial: S, next: N, found: F) -> Option<(C, Vec<S>)>
where
    S: StructuralHash + Clone,
    C: Cost,
    N: FnMut(&S) -> I,
    I: IntoIterator<Item = (S, C)>,
    F: FnMut(&S) -> bool,
{
    build(initial, next)
        .run(found)
        .ok()
        .flatten()
        .map(|solution| (solution.cost, solution.path))
}

/// Perform a search using Dijkstra's algorithm, with transition costs
/// given by a separate `cost(from, to)` function.
pub fn run<S, C, N, I, CF, F>(initial: S, next: N, cost: CF, found: F) -> Option<(C, Vec<S>)>
where
    S: StructuralHash + Clone,
    C: Cost,
    N: FnMut(&S) -> I,
    I: IntoIterator<Item = S>,
    CF: FnMut(&S, &S) -> C,
    F: FnMut(&S) -> bool,
{
    run_assoc(initial, with_cost(next, cost), found)
}
