//! Array-backed binary min-heap with an external comparator.
//!
//! The comparator must give the same answer for two items for as long as
//! both sit in the heap, so any priority it looks at belongs in the items
//! themselves. To lower the priority of something already queued, push a
//! new copy and let the caller discard the stale one when it comes out.

use std::fmt;

use super::SearchQueue;

const TOP: usize = 0;

fn parent(i: usize) -> usize {
    ((i + 1) >> 1) - 1
}

fn left(i: usize) -> usize {
    (i << 1) + 1
}

fn right(i: usize) -> usize {
    (i + 1) << 1
}

/// A priority queue which pops the item its comparator ranks lowest.
///
/// `precedes(a, b)` should return true when `a` must be popped before `b`.
/// Items the comparator cannot separate come out in an order fixed by the
/// sequence of pushes and pops.
pub struct PriorityQueue<T, F> {
    heap: Vec<T>,
    precedes: F,
}

impl<T, F> fmt::Debug for PriorityQueue<T, F>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("heap", &self.heap)
            .finish()
    }
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    pub fn new(precedes: F) -> Self {
        Self {
            heap: Vec::new(),
            precedes,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn push(&mut self, value: T) {
        self.heap.push(value);
        self.sift_up();
    }

    pub fn pop(&mut self) -> Option<T> {
        let bottom = self.heap.len().checked_sub(1)?;
        if bottom > TOP {
            self.heap.swap(TOP, bottom);
        }
        let popped = self.heap.pop();
        self.sift_down();
        popped
    }

    fn lower(&self, i: usize, j: usize) -> bool {
        (self.precedes)(&self.heap[i], &self.heap[j])
    }

    fn sift_up(&mut self) {
        let mut node = self.heap.len() - 1;
        while node > TOP && self.lower(node, parent(node)) {
            self.heap.swap(node, parent(node));
            node = parent(node);
        }
    }

    fn sift_down(&mut self) {
        let size = self.heap.len();
        let mut node = TOP;
        while left(node) < size {
            let child = if right(node) < size && self.lower(right(node), left(node)) {
                right(node)
            } else {
                left(node)
            };

            if !self.lower(child, node) {
                break;
            }
            self.heap.swap(node, child);
            node = child;
        }
    }
}

impl<T, F> SearchQueue for PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    type Candidate = T;

    fn pop(&mut self) -> Option<Self::Candidate> {
        PriorityQueue::pop(self)
    }

    fn push(&mut self, item: Self::Candidate) {
        PriorityQueue::push(self, item)
    }

    fn len(&self) -> usize {
        PriorityQueue::len(self)
    }
}
