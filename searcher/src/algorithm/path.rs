//! Path bookkeeping and reconstruction.

use std::collections::HashMap;
use std::hash::Hash;

use crate::traits::{Cost, SearchKey};

/// The best known way to reach one state.
///
/// Only the last step is stored; the rest of the path is found by
/// following `parent` keys back to the initial state.
#[derive(Debug, Clone)]
pub struct Trail<S, K, C> {
    pub state: S,
    pub parent: Option<K>,
    pub cost: C,
}

/// Maps each discovered state to the best [Trail] found so far.
#[derive(Debug)]
pub struct PathTable<S, K, C> {
    trails: HashMap<K, Trail<S, K, C>>,
}

impl<S, K, C> PathTable<S, K, C>
where
    S: Clone,
    K: SearchKey,
    C: Cost,
{
    /// Start a table at the initial state.
    pub fn new(key: K, initial: S) -> Self {
        let mut trails = HashMap::new();
        trails.insert(
            key,
            Trail {
                state: initial,
                parent: None,
                cost: C::zero(),
            },
        );
        Self { trails }
    }

    pub fn get(&self, key: &K) -> Option<&Trail<S, K, C>> {
        self.trails.get(key)
    }

    pub fn record(&mut self, key: K, trail: Trail<S, K, C>) {
        self.trails.insert(key, trail);
    }

    /// Keys from the initial state to `terminal`, inclusive.
    pub fn keys(&self, terminal: &K) -> Vec<K> {
        reconstruct(terminal.clone(), |key| {
            self.trails.get(key).and_then(|trail| trail.parent.clone())
        })
    }

    /// States visited after the initial state on the way to `terminal`.
    pub fn route(&self, terminal: &K) -> Vec<S> {
        self.keys(terminal)
            .iter()
            .skip(1)
            .filter_map(|key| self.trails.get(key))
            .map(|trail| trail.state.clone())
            .collect()
    }
}

/// Walk a chain of predecessors back from `terminal`.
///
/// Returns the chain in forward order, starting from the element with no
/// predecessor and ending with `terminal`. The chain must not loop.
pub fn reconstruct<T, F>(terminal: T, mut predecessor: F) -> Vec<T>
where
    F: FnMut(&T) -> Option<T>,
{
    let mut path = Vec::new();
    let mut current = terminal;
    loop {
        let previous = predecessor(&current);
        path.push(current);
        match previous {
            Some(p) => current = p,
            None => break,
        }
    }
    path.reverse();
    path
}

/// Rebuild a route from a table mapping each element to the one before it.
pub fn from_predecessors<T>(predecessors: &HashMap<T, T>, terminal: T) -> Vec<T>
where
    T: Clone + Eq + Hash,
{
    reconstruct(terminal, |t| predecessors.get(t).cloned())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single() {
        let predecessors: HashMap<u32, u32> = HashMap::new();
        assert_eq!(from_predecessors(&predecessors, 4), vec![4]);
    }

    #[test]
    fn chain() {
        let predecessors: HashMap<&str, &str> =
            vec![("b", "a"), ("c", "b"), ("d", "c"), ("x", "a")]
                .into_iter()
                .collect();
        assert_eq!(from_predecessors(&predecessors, "d"), vec!["a", "b", "c", "d"]);
        assert_eq!(from_predecessors(&predecessors, "x"), vec!["a", "x"]);
    }

    #[test]
    fn table() {
        let mut table: PathTable<char, u8, u32> = PathTable::new(0, 'a');
        table.record(
            1,
            Trail {
                state: 'b',
                parent: Some(0),
                cost: 4,
            },
        );
        table.record(
            2,
            Trail {
                state: 'c',
                parent: Some(1),
                cost: 6,
            },
        );

        assert_eq!(table.get(&0).map(|t| t.cost), Some(0));
        assert_eq!(table.keys(&2), vec![0, 1, 2]);
        assert_eq!(table.route(&2), vec!['b', 'c']);
        assert!(table.route(&0).is_empty());
        assert_eq!(table.get(&2).map(|t| t.cost), Some(6));
    }
}
