//! A* search
//!
//! Like Dijkstra's algorithm, but states are ranked by their path cost plus
//! an estimate of the cost remaining to a goal. With a `remaining` estimate
//! that never overstates the true cost, and never drops by more than the
//! cost of a single transition, the first goal accepted is reached by a
//! cheapest path. An estimate which is merely admissible may cause a
//! state to be accepted before its cheapest path is known, since accepted
//! states are never reopened.

use crate::algorithm::heap::PriorityQueue;
use crate::algorithm::{by_priority, lower_cost, with_cost, Entry, Searcher, Traversal};
use crate::hashing::{structural_key, StateKey, StructuralHash};
use crate::traits::{Cost, SearchKey};

/// Build an A* searcher which identifies states with `key`.
pub fn build_by_key<'a, S, K, C, N, I, H, KF>(
    initial: S,
    mut next: N,
    mut remaining: H,
    key: KF,
) -> Searcher<'a, S, K, C>
where
    S: Clone + 'a,
    K: SearchKey + 'a,
    C: Cost + 'a,
    N: FnMut(&S) -> I + 'a,
    I: IntoIterator<Item = (S, C)>,
    H: FnMut(&S) -> C + 'a,
    KF: FnMut(&S) -> K + 'a,
{
    let frontier: PriorityQueue<Entry<S, K, C>, _> = PriorityQueue::new(by_priority::<S, K, C>);
    let neighbors = move |state: &S| -> Vec<(S, C)> { next(state).into_iter().collect() };
    let priority = move |state: &S, g: C| g + remaining(state);

    Searcher::new(
        initial,
        Box::new(neighbors),
        Box::new(key),
        Box::new(frontier),
        lower_cost,
        Some(Box::new(priority)),
    )
}

/// Build an A* searcher over structurally hashed states.
pub fn build<'a, S, C, N, I, H>(initial: S, next: N, remaining: H) -> Searcher<'a, S, StateKey, C>
where
    S: StructuralHash + Clone + 'a,
    C: Cost + 'a,
    N: FnMut(&S) -> I + 'a,
    I: IntoIterator<Item = (S, C)>,
    H: FnMut(&S) -> C + 'a,
{
    build_by_key(initial, next, remaining, structural_key())
}

/// Visit states in order of path cost plus estimated remaining cost.
pub fn traverse<'a, S, C, N, I, H>(initial: S, next: N, remaining: H) -> Traversal<'a, S, StateKey, C>
where
    S: StructuralHash + Clone + 'a,
    C: Cost + 'a,
    N: FnMut(&S) -> I + 'a,
    I: IntoIterator<Item = (S, C)>,
    H: FnMut(&S) -> C + 'a,
{
    build(initial, next, remaining).traverse()
}

/// Perform an A* search, with neighbors and their transition costs
/// generated together.
///
/// Returns the total cost and the states after `initial` on the path to
/// the first state accepted by `found`.
pub fn run_assoc<S, C, N, I, H, F>(initial: S, next: N, remaining: H, found: F) -> Option<(C, Vec<S>)>
where
    S: StructuralHash + Clone,
    C: Cost,
    N: FnMut(&S) -> I,
    I: IntoIterator<Item = (S, C)>,
    H: FnMut(&S) -> C,
    F: FnMut(&S) -> bool,
{
    build(initial, next, remaining)
        .run(found)
        .ok()
        .flatten()
        .map(|solution| (solution.cost, solution.path))
}

/// Perform an A* search, with transition costs given by a separate
/// `cost(from, to)` function.
pub fn run<S, C, N, I, CF, H, F>(
    initial: S,
    next: N,
    cost: CF,
    remaining: H,
    found: F,
) -> Option<(C, Vec<S>)>
where
    S: StructuralHash + Clone,
    C: Cost,
    N: FnMut(&S) -> I,
    I: IntoIterator<Item = S>,
    CF: FnMut(&S, &S) -> C,
    H: FnMut(&S) -> C,
    F: FnMut(&S) -> bool,
{
    run_assoc(initial, with_cost(next, cost), remaining, found)
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;
    use crate::dijkstra;

    type Point = (i32, i32);

    fn manhattan(goal: Point) -> impl Fn(&Point) -> u32 {
        move |&(x, y): &Point| ((x - goal.0).abs() + (y - goal.1).abs()) as u32
    }

    fn open(size: i32, walls: &[Point]) -> impl Fn(&Point) -> Vec<Point> + Copy + '_ {
        move |&(x, y): &Point| {
            vec![(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]
                .into_iter()
                .filter(|&(x, y)| x >= 0 && y >= 0 && x < size && y < size)
                .filter(|p| !walls.contains(p))
                .collect::<Vec<_>>()
        }
    }

    #[test]
    fn open_field() {
        let goal = (4, 3);
        let next = open(6, &[]);
        let (cost, path) = run((0, 0), next, |_: &Point, _: &Point| 1u32, manhattan(goal), |p| *p == goal).unwrap();
        assert_eq!(cost, 7);
        assert_eq!(path.len(), 7);
        assert_eq!(path.last(), Some(&goal));
    }

    #[test]
    fn explores_less_than_dijkstra() {
        let goal = (9, 9);
        let next = open(10, &[]);
        let unit = |_: &Point, _: &Point| 1u32;

        let guided = build((0, 0), with_cost(next, unit), manhattan(goal))
            .traverse()
            .take_while(|v| v.state != goal)
            .count();
        let blind = dijkstra::build((0, 0), with_cost(next, unit))
            .traverse()
            .take_while(|v| v.state != goal)
            .count();
        assert!(guided <= blind);
    }

    #[test]
    fn detour() {
        let walls = vec![(2, 0), (2, 1), (2, 2), (2, 3)];
        let goal = (4, 0);
        let next = open(5, &walls);
        let (cost, path) = run((0, 0), next, |_: &Point, _: &Point| 1u32, manhattan(goal), |p| *p == goal).unwrap();
        assert_eq!(cost, 12);
        assert!(path.iter().all(|p| !walls.contains(p)));
    }

    #[test]
    fn zero_heuristic_matches_dijkstra() {
        let mut graph: HashMap<char, Vec<(char, u32)>> = HashMap::new();
        graph.insert('s', vec![('a', 4), ('b', 1)]);
        graph.insert('b', vec![('a', 2), ('c', 5)]);
        graph.insert('a', vec![('c', 1)]);
        graph.insert('c', vec![]);

        let next = |n: &char| graph[n].clone();
        let guided = run_assoc('s', next, |_: &char| 0u32, |n| *n == 'c');
        let blind = dijkstra::run_assoc('s', next, |n| *n == 'c');
        assert_eq!(guided, Some((4, vec!['b', 'a', 'c'])));
        assert_eq!(guided, blind);
    }

    #[test]
    fn unreachable() {
        let walls = vec![(1, 0), (0, 1), (1, 1)];
        let goal = (3, 3);
        let next = open(4, &walls);
        assert_eq!(
            run((0, 0), next, |_: &Point, _: &Point| 1u32, manhattan(goal), |p| *p == goal),
            None
        );
    }

    fn weighted() -> impl Strategy<Value = Vec<(u8, u8, u32)>> {
        proptest::collection::vec((0u8..8, 0u8..8, 0u32..10), 0..30)
    }

    // Cheapest cost from 0 to every node, by exhaustive relaxation.
    fn relaxed(edges: &[(u8, u8, u32)]) -> HashMap<u8, u32> {
        let mut best = HashMap::new();
        best.insert(0u8, 0u32);
        for _ in 0..8 {
            for (a, b, c) in edges {
                if let Some(&base) = best.get(a) {
                    let entry = best.entry(*b).or_insert(u32::MAX);
                    if base + c < *entry {
                        *entry = base + c;
                    }
                }
            }
        }
        best
    }

    proptest! {
        #[test]
        fn cheapest_with_zero_heuristic(edges in weighted(), goal in 0u8..8) {
            let mut graph: HashMap<u8, Vec<(u8, u32)>> = HashMap::new();
            for (a, b, c) in &edges {
                graph.entry(*a).or_default().push((*b, *c));
            }
            let next = |n: &u8| graph.get(n).cloned().unwrap_or_default();

            let expected = relaxed(&edges).get(&goal).copied();
            let guided = run_assoc(0u8, next, |_: &u8| 0u32, |n| *n == goal);
            let blind = dijkstra::run_assoc(0u8, next, |n| *n == goal);

            prop_assert_eq!(guided.as_ref().map(|(c, _)| *c), expected);
            prop_assert_eq!(blind.as_ref().map(|(c, _)| *c), expected);
        }
    }
}
