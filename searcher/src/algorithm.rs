//! Provides the building blocks for search algorithms
//!
//! Every search in this crate is the same loop: expand the current state,
//! admit unvisited neighbors into a frontier when they improve on the best
//! known path, then adopt the next unvisited state from the frontier. The
//! algorithms differ only in the frontier discipline, in which of two paths
//! to the same state is preferred, and in how states are prioritized.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::{debug, warn};

use self::path::{PathTable, Trail};
use crate::errors::{Result, SearchError};
use crate::traits::{Cost, SearchKey};

pub mod astar;
pub(crate) mod basic;
pub mod dijkstra;
pub mod heap;
pub mod path;

/// Trait used to implement queues of search candidates
/// which should be checked for completion.
pub trait SearchQueue {
    type Candidate;

    fn pop(&mut self) -> Option<Self::Candidate>;

    fn push(&mut self, item: Self::Candidate);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A discovered state waiting in the frontier.
///
/// `priority` is fixed when the entry is pushed. A state whose path improves
/// later is pushed again with the better priority, and the older entry is
/// dropped when popped because its key has been visited by then.
#[derive(Debug, Clone)]
pub struct Entry<S, K, C> {
    pub key: K,
    pub state: S,
    pub priority: C,

    /// Push order, used to break ties between equal priorities.
    pub order: usize,
}

/// Does `a` leave a priority frontier before `b`?
///
/// Lower priorities go first, and equal priorities leave in push order.
pub fn by_priority<S, K, C>(a: &Entry<S, K, C>, b: &Entry<S, K, C>) -> bool
where
    C: PartialOrd,
{
    match a.priority.partial_cmp(&b.priority) {
        Some(Ordering::Less) => true,
        Some(Ordering::Equal) => a.order < b.order,
        _ => false,
    }
}

/// Decides whether a newly found trail should replace the recorded one.
pub type Better<S, K, C> = fn(&Trail<S, K, C>, &Trail<S, K, C>) -> bool;

pub(crate) type Neighbors<'a, S, C> = Box<dyn FnMut(&S) -> Vec<(S, C)> + 'a>;
pub(crate) type KeyFn<'a, S, K> = Box<dyn FnMut(&S) -> K + 'a>;
pub(crate) type Priority<'a, S, C> = Box<dyn FnMut(&S, C) -> C + 'a>;
pub(crate) type Frontier<'a, S, K, C> = Box<dyn SearchQueue<Candidate = Entry<S, K, C>> + 'a>;

/// The first path discovered to a state is kept.
pub fn first_found<S, K, C>(_recorded: &Trail<S, K, C>, _candidate: &Trail<S, K, C>) -> bool {
    false
}

/// A path replaces the recorded one when it is strictly cheaper.
pub fn lower_cost<S, K, C>(recorded: &Trail<S, K, C>, candidate: &Trail<S, K, C>) -> bool
where
    C: PartialOrd,
{
    candidate.cost < recorded.cost
}

/// Pair each neighbor with its transition cost.
///
/// Turns a neighbor function and a separate cost function into the
/// associated form the cost-aware searches take.
pub fn with_cost<S, C, N, I, F>(mut next: N, mut cost: F) -> impl FnMut(&S) -> Vec<(S, C)>
where
    N: FnMut(&S) -> I,
    I: IntoIterator<Item = S>,
    F: FnMut(&S, &S) -> C,
{
    move |state: &S| {
        next(state)
            .into_iter()
            .map(|neighbor| {
                let c = cost(state, &neighbor);
                (neighbor, c)
            })
            .collect()
    }
}

/// Options which control an eager search.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum number of states to accept before giving up.
    pub limit: Option<usize>,

    /// Keep every accepted state, in order, in the [Solution].
    pub record_visited: bool,

    /// Log progress every this many accepted states (0 disables).
    pub progress: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: None,
            record_visited: false,
            progress: 10_000,
        }
    }
}

#[derive(Debug)]
struct StepLimit {
    current: usize,
    maximum: usize,
}

impl StepLimit {
    fn new(limit: usize) -> Self {
        Self {
            current: 0,
            maximum: limit,
        }
    }

    fn increment(&mut self) -> Result<()> {
        self.current += 1;

        if self.current > self.maximum {
            Err(SearchError::StepLimitExhausted(self.maximum))
        } else {
            Ok(())
        }
    }
}

/// A state accepted by a traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit<S, C> {
    /// The accepted state.
    pub state: S,

    /// States from just after the initial state up to and including `state`.
    /// Empty for the initial state itself.
    pub path: Vec<S>,

    /// Total cost of `path`.
    pub cost: C,
}

/// The outcome of a successful eager search.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<S, C> {
    /// States from just after the initial state up to and including the goal.
    pub path: Vec<S>,

    /// Total cost of `path`. For breadth and depth first searches, the
    /// number of transitions.
    pub cost: C,

    /// Every accepted state in order, when requested in [SearchOptions].
    pub visited: Option<Vec<S>>,
}

/// The generalized search engine.
///
/// Holds all of the state for a single search: the frontier, the visited
/// set, the path table and (for cost-aware searches) the priority function.
/// Nothing is shared between searches.
struct Driver<'a, S, K, C> {
    neighbors: Neighbors<'a, S, C>,
    key: KeyFn<'a, S, K>,
    frontier: Frontier<'a, S, K, C>,
    better: Better<S, K, C>,
    ranking: Option<Priority<'a, S, C>>,
    paths: Option<PathTable<S, K, C>>,
    visited: HashSet<K>,
    initial: Option<S>,
    current: Option<Entry<S, K, C>>,
    pushed: usize,
    fault: Option<SearchError>,
}

impl<'a, S, K, C> Driver<'a, S, K, C>
where
    S: Clone,
    K: SearchKey,
    C: Cost,
{
    /// Move to the next unvisited state, returning it.
    ///
    /// The first call accepts the initial state. Returns `None` once the
    /// frontier is exhausted or an invalid cost was seen.
    fn advance(&mut self) -> Option<Entry<S, K, C>> {
        if self.fault.is_some() {
            return None;
        }

        let entry = match self.initial.take() {
            Some(initial) => self.start(initial),
            None => {
                let current = self.current.take()?;
                self.expand(&current);
                if self.fault.is_some() {
                    return None;
                }
                self.next_unvisited()?
            }
        };

        self.visited.insert(entry.key.clone());
        self.current = Some(entry.clone());
        Some(entry)
    }

    /// Priority of `state` when reached with cost `g`.
    fn rank(&mut self, state: &S, g: C) -> C {
        match self.ranking.as_mut() {
            Some(priority) => priority(state, g),
            None => g,
        }
    }

    fn start(&mut self, initial: S) -> Entry<S, K, C> {
        let key = (self.key)(&initial);
        let priority = self.rank(&initial, C::zero());
        self.paths = Some(PathTable::new(key.clone(), initial.clone()));
        Entry {
            key,
            state: initial,
            priority,
            order: 0,
        }
    }

    fn expand(&mut self, current: &Entry<S, K, C>) {
        let base = match self.trail(&current.key) {
            Some(trail) => trail.cost,
            None => return,
        };

        for (state, cost) in (self.neighbors)(&current.state) {
            match cost.partial_cmp(&C::zero()) {
                Some(Ordering::Greater) | Some(Ordering::Equal) => {}
                _ => {
                    warn!(cost = ?cost, "invalid transition cost, stopping search");
                    self.fault = Some(SearchError::InvalidCost(format!("{:?}", cost)));
                    return;
                }
            }

            let key = (self.key)(&state);
            if self.visited.contains(&key) {
                continue;
            }

            let candidate = Trail {
                state: state.clone(),
                parent: Some(current.key.clone()),
                cost: base + cost,
            };

            let admit = match self.trail(&key) {
                Some(recorded) => (self.better)(recorded, &candidate),
                None => true,
            };
            if !admit {
                continue;
            }

            let priority = self.rank(&state, candidate.cost);
            if let Some(paths) = self.paths.as_mut() {
                paths.record(key.clone(), candidate);
            }
            self.pushed += 1;
            self.frontier.push(Entry {
                key,
                state,
                priority,
                order: self.pushed,
            });
        }
    }

    fn next_unvisited(&mut self) -> Option<Entry<S, K, C>> {
        while let Some(entry) = self.frontier.pop() {
            if !self.visited.contains(&entry.key) {
                return Some(entry);
            }
        }
        debug!(visited = self.visited.len(), "frontier exhausted");
        None
    }

    fn trail(&self, key: &K) -> Option<&Trail<S, K, C>> {
        self.paths.as_ref().and_then(|paths| paths.get(key))
    }

    fn route(&self, key: &K) -> Vec<S> {
        self.paths
            .as_ref()
            .map(|paths| paths.route(key))
            .unwrap_or_default()
    }
}

/// A lazily evaluated search.
///
/// Yields each accepted state with its path, starting with the initial
/// state. No work is done between calls to `next`, so a traversal of an
/// infinite space is safe as long as the caller stops pulling.
pub struct Traversal<'a, S, K, C> {
    driver: Driver<'a, S, K, C>,
}

impl<'a, S, K, C> Traversal<'a, S, K, C>
where
    S: Clone,
    K: SearchKey,
    C: Cost,
{
    /// The error which stopped this traversal early, if any.
    pub fn error(&self) -> Option<&SearchError> {
        self.driver.fault.as_ref()
    }

    /// Number of states accepted so far.
    pub fn visited(&self) -> usize {
        self.driver.visited.len()
    }

    /// Number of entries waiting in the frontier, including stale ones.
    pub fn frontier(&self) -> usize {
        self.driver.frontier.len()
    }
}

impl<'a, S, K, C> Iterator for Traversal<'a, S, K, C>
where
    S: Clone,
    K: SearchKey,
    C: Cost,
{
    type Item = Visit<S, C>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.driver.advance()?;
        let cost = self
            .driver
            .trail(&entry.key)
            .map(|trail| trail.cost)
            .unwrap_or_else(C::zero);
        let path = self.driver.route(&entry.key);
        Some(Visit {
            state: entry.state,
            path,
            cost,
        })
    }
}

/// Implementation of search, using generic components.
///
/// Built by one of the algorithm modules ([crate::bfs], [crate::dfs],
/// [crate::dijkstra], [crate::astar]), then either run to completion with
/// [Searcher::run] or consumed lazily with [Searcher::traverse].
pub struct Searcher<'a, S, K, C> {
    driver: Driver<'a, S, K, C>,
    options: SearchOptions,
}

impl<'a, S, K, C> Searcher<'a, S, K, C>
where
    S: Clone,
    K: SearchKey,
    C: Cost,
{
    pub(crate) fn new(
        initial: S,
        neighbors: Neighbors<'a, S, C>,
        key: KeyFn<'a, S, K>,
        frontier: Frontier<'a, S, K, C>,
        better: Better<S, K, C>,
        ranking: Option<Priority<'a, S, C>>,
    ) -> Self {
        Self {
            driver: Driver {
                neighbors,
                key,
                frontier,
                better,
                ranking,
                paths: None,
                visited: HashSet::new(),
                initial: Some(initial),
                current: None,
                pushed: 0,
                fault: None,
            },
            options: SearchOptions::default(),
        }
    }

    /// Replace the options for this search.
    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Set a step limit for this search.
    ///
    /// When more than this many states have been accepted,
    /// the search will return an error.
    pub fn set_limit(&mut self, limit: usize) {
        self.options.limit = Some(limit)
    }

    /// Explore lazily, one accepted state at a time.
    pub fn traverse(self) -> Traversal<'a, S, K, C> {
        Traversal {
            driver: self.driver,
        }
    }

    /// Run the search until `found` accepts a state.
    ///
    /// Returns `Ok(None)` when every reachable state has been explored
    /// without finding one.
    pub fn run<F>(self, mut found: F) -> Result<Option<Solution<S, C>>>
    where
        F: FnMut(&S) -> bool,
    {
        let Searcher {
            mut driver,
            options,
        } = self;

        let mut counter = options.limit.map(StepLimit::new);
        let mut visited = Vec::new();
        let mut n = 0;

        while let Some(entry) = driver.advance() {
            n += 1;

            if let Some(counter) = counter.as_mut() {
                counter.increment()?;
            }

            if options.record_visited {
                visited.push(entry.state.clone());
            }

            if options.progress > 0 && n % options.progress == 0 {
                debug!(
                    steps = n,
                    visited = driver.visited.len(),
                    frontier = driver.frontier.len(),
                    "search progress"
                );
            }

            if found(&entry.state) {
                let cost = driver
                    .trail(&entry.key)
                    .map(|trail| trail.cost)
                    .unwrap_or_else(C::zero);
                debug!(steps = n, cost = ?cost, "goal accepted");
                return Ok(Some(Solution {
                    path: driver.route(&entry.key),
                    cost,
                    visited: if options.record_visited {
                        Some(visited)
                    } else {
                        None
                    },
                }));
            }
        }

        match driver.fault.take() {
            Some(error) => Err(error),
            None => Ok(None),
        }
    }

    /// Run the search, treating an exhausted frontier as an error.
    pub fn solve<F>(self, found: F) -> Result<Solution<S, C>>
    where
        F: FnMut(&S) -> bool,
    {
        self.run(found)?.ok_or(SearchError::NoPathFound)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hashing::StateKey;
    use crate::{bfs, dfs, dijkstra};

    fn line(n: &u32) -> Vec<u32> {
        if *n < 10 {
            vec![n + 1]
        } else {
            vec![]
        }
    }

    #[test]
    fn step_limit() {
        let mut searcher = bfs::build(0u32, line);
        searcher.set_limit(5);
        assert_eq!(
            searcher.run(|n| *n == 9),
            Err(SearchError::StepLimitExhausted(5))
        );

        let mut searcher = bfs::build(0u32, line);
        searcher.set_limit(5);
        let solution = searcher.run(|n| *n == 4).unwrap().unwrap();
        assert_eq!(solution.path, vec![1, 2, 3, 4]);
    }

    #[test]
    fn exhausted() {
        assert_eq!(bfs::build(0u32, line).run(|n| *n == 11), Ok(None));
        assert_eq!(
            bfs::build(0u32, line).solve(|n| *n == 11),
            Err(SearchError::NoPathFound)
        );
    }

    #[test]
    fn start_is_goal() {
        let solution = dijkstra::build(3u32, |n: &u32| vec![(n + 1, 2u32)])
            .solve(|n| *n == 3)
            .unwrap();
        assert!(solution.path.is_empty());
        assert_eq!(solution.cost, 0);
    }

    #[test]
    fn record_visited() {
        let options = SearchOptions {
            record_visited: true,
            ..SearchOptions::default()
        };
        let solution = dfs::build(0u32, line)
            .with_options(options)
            .solve(|n| *n == 3)
            .unwrap();
        assert_eq!(solution.visited, Some(vec![0, 1, 2, 3]));
        assert_eq!(solution.cost, 3);
    }

    #[test]
    fn invalid_cost() {
        let searcher = dijkstra::build(0i32, |n: &i32| vec![(n + 1, -1i32)]);
        assert_eq!(
            searcher.run(|n| *n == 5),
            Err(SearchError::InvalidCost("-1".to_string()))
        );

        let mut traversal = dijkstra::traverse(0.0f64, |n: &f64| vec![(n + 1.0, f64::NAN)]);
        assert_eq!(traversal.next().map(|v| v.state), Some(0.0));
        assert_eq!(traversal.next(), None);
        assert!(matches!(traversal.error(), Some(SearchError::InvalidCost(_))));
    }

    #[test]
    fn traversal_counts() {
        let mut traversal = bfs::traverse(1u32, |n: &u32| vec![n * 2, n * 2 + 1]);
        let first: Vec<u32> = traversal.by_ref().take(3).map(|v| v.state).collect();
        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(traversal.visited(), 3);
        // 4 and 5 were discovered by expanding 2; 3 has not been expanded.
        assert_eq!(traversal.frontier(), 2);
    }

    #[test]
    fn adapter() {
        let mut next = with_cost(|n: &u32| vec![n + 1, n + 2], |a: &u32, b: &u32| b - a);
        assert_eq!(next(&3), vec![(4, 1), (5, 2)]);
    }

    #[test]
    fn preferences() {
        let recorded: Trail<&str, StateKey, u32> = Trail {
            state: "a",
            parent: None,
            cost: 5,
        };
        let cheaper = Trail {
            cost: 3,
            ..recorded.clone()
        };
        assert!(!first_found(&recorded, &cheaper));
        assert!(lower_cost(&recorded, &cheaper));
        assert!(!lower_cost(&recorded, &recorded));
    }

    #[test]
    fn priority_ties() {
        let entry = |priority: u32, order: usize| Entry {
            key: 0u8,
            state: (),
            priority,
            order,
        };
        assert!(by_priority(&entry(1, 5), &entry(2, 0)));
        assert!(by_priority(&entry(2, 1), &entry(2, 4)));
        assert!(!by_priority(&entry(2, 4), &entry(2, 1)));
        assert!(!by_priority(&entry(3, 0), &entry(2, 9)));
    }
}
