//! Uninformed searches: breadth first and depth first.
//!
//! Both keep the first path discovered to each state, and count the
//! number of transitions as the cost of a path.

pub mod bfs {
    use std::collections::VecDeque;
    use std::default::Default;

    use crate::algorithm::{first_found, Entry, SearchQueue, Searcher, Traversal};
    use crate::hashing::{structural_key, StateKey, StructuralHash};
    use crate::traits::SearchKey;

    /// First in, first out frontier.
    #[derive(Debug)]
    pub struct BreadthQueue<S> {
        queue: VecDeque<S>,
    }

    impl<S> SearchQueue for BreadthQueue<S> {
        type Candidate = S;

        fn pop(&mut self) -> Option<Self::Candidate> {
            self.queue.pop_front()
        }

        fn push(&mut self, item: Self::Candidate) {
            self.queue.push_back(item);
        }

        fn len(&self) -> usize {
            self.queue.len()
        }
    }

    impl<S> Default for BreadthQueue<S> {
        fn default() -> Self {
            BreadthQueue {
                queue: VecDeque::new(),
            }
        }
    }

    /// Build a breadth-first searcher which identifies states with `key`.
    pub fn build_by_key<'a, S, K, N, I, KF>(initial: S, mut next: N, key: KF) -> Searcher<'a, S, K, usize>
    where
        S: Clone + 'a,
        K: SearchKey + 'a,
        N: FnMut(&S) -> I + 'a,
        I: IntoIterator<Item = S>,
        KF: FnMut(&S) -> K + 'a,
    {
        let neighbors = move |state: &S| -> Vec<(S, usize)> {
            next(state).into_iter().map(|s| (s, 1)).collect()
        };
        Searcher::new(
            initial,
            Box::new(neighbors),
            Box::new(key),
            Box::new(BreadthQueue::<Entry<S, K, usize>>::default()),
            first_found,
            None,
        )
    }

    /// Build a breadth-first searcher over structurally hashed states.
    pub fn build<'a, S, N, I>(initial: S, next: N) -> Searcher<'a, S, StateKey, usize>
    where
        S: StructuralHash + Clone + 'a,
        N: FnMut(&S) -> I + 'a,
        I: IntoIterator<Item = S>,
    {
        build_by_key(initial, next, structural_key())
    }

    /// Visit states in breadth-first order, starting with `initial`.
    ///
    /// If the state space is infinite, so is this iterator.
    pub fn traverse<'a, S, N, I>(initial: S, next: N) -> Traversal<'a, S, StateKey, usize>
    where
        S: StructuralHash + Clone + 'a,
        N: FnMut(&S) -> I + 'a,
        I: IntoIterator<Item = S>,
    {
        build(initial, next).traverse()
    }

    /// Breadth-first search, where the order is determined
    /// by the states returned from `next`.
    ///
    /// Returns the states after `initial` on a path with the fewest
    /// transitions to a state accepted by `found`, or `None` when no such
    /// state is reachable.
    pub fn run<S, N, I, F>(initial: S, next: N, found: F) -> Option<Vec<S>>
    where
        S: StructuralHash + Clone,
        N: FnMut(&S) -> I,
        I: IntoIterator<Item = S>,
        F: FnMut(&S) -> bool,
    {
        build(initial, next)
            .run(found)
            .ok()
            .flatten()
            .map(|solution| solution.path)
    }
}

pub mod dfs {
    use std::collections::VecDeque;
    use std::default::Default;

    use crate::algorithm::{first_found, Entry, SearchQueue, Searcher, Traversal};
    use crate::hashing::{structural_key, StateKey, StructuralHash};
    use crate::traits::SearchKey;

    /// Last in, first out frontier.
    #[derive(Debug)]
    pub struct DepthQueue<S> {
        queue: VecDeque<S>,
    }

    impl<S> Default for DepthQueue<S> {
        fn default() -> Self {
            DepthQueue {
                queue: VecDeque::new(),
            }
        }
    }

    impl<S> SearchQueue for DepthQueue<S> {
        type Candidate = S;

        fn pop(&mut self) -> Option<Self::Candidate> {
            self.queue.pop_front()
        }

        fn push(&mut self, item: Self::Candidate) {
            self.queue.push_front(item);
        }

        fn len(&self) -> usize {
            self.queue.len()
        }
    }

    /// Build a depth-first searcher which identifies states with `key`.
    ///
    /// Neighbors are pushed in reverse, so the first state returned by
    /// `next` is the first one explored.
    pub fn build_by_key<'a, S, K, N, I, KF>(initial: S, mut next: N, key: KF) -> Searcher<'a, S, K, usize>
    where
        S: Clone + 'a,
        K: SearchKey + 'a,
        N: FnMut(&S) -> I + 'a,
        I: IntoIterator<Item = S>,
        KF: FnMut(&S) -> K + 'a,
    {
        let neighbors = move |state: &S| {
            let mut children: Vec<(S, usize)> = next(state).into_iter().map(|s| (s, 1)).collect();
            children.reverse();
            children
        };
        Searcher::new(
            initial,
            Box::new(neighbors),
            Box::new(key),
            Box::new(DepthQueue::<Entry<S, K, usize>>::default()),
            first_found,
            None,
        )
    }

    /// Build a depth-first searcher over structurally hashed states.
    pub fn build<'a, S, N, I>(initial: S, next: N) -> Searcher<'a, S, StateKey, usize>
    where
        S: StructuralHash + Clone + 'a,
        N: FnMut(&S) -> I + 'a,
        I: IntoIterator<Item = S>,
    {
        build_by_key(initial, next, structural_key())
    }

    /// Visit states in depth-first pre-order, starting with `initial`.
    ///
    /// A branch which never ends is never left, so bound the depth in
    /// `next` when the space is infinite.
    pub fn traverse<'a, S, N, I>(initial: S, next: N) -> Traversal<'a, S, StateKey, usize>
    where
        S: StructuralHash + Clone + 'a,
        N: FnMut(&S) -> I + 'a,
        I: IntoIterator<Item = S>,
    {
        build(initial, next).traverse()
    }

    /// Depth-first search, where the order is determined
    /// by the states returned from `next`.
    ///
    /// Returns some path to a state accepted by `found`; it need not be
    /// the shortest.
    pub fn run<S, N, I, F>(initial: S, next: N, found: F) -> Option<Vec<S>>
    where
        S: StructuralHash + Clone,
        N: FnMut(&S) -> I,
        I: IntoIterator<Item = S>,
        F: FnMut(&S) -> bool,
    {
        build(initial, next)
            .run(found)
            .ok()
            .flatten()
            .map(|solution| solution.path)
    }
}
