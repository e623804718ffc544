/*
Array-backed binary min-heap that also supports removing an arbitrary entry.

Removal finds the entry with a linear scan, swaps it all the way up to the root
(ignoring heap order while it climbs) and then pops the root. No side index is kept,
so remove/contains are O(n) and push/pop are O(log n).
*/

use ordered_float::OrderedFloat;

use crate::error::GraphError;

/// Ordering and identity of a heap entry.
///
/// `precedes` is the heap order (`self < other`). `same_entry` is the equality used by
/// [`PriorityQueue::remove`] and [`PriorityQueue::contains`]; it may be coarser than
/// structural equality.
pub trait Prioritized {
    fn precedes(&self, other: &Self) -> bool;
    fn same_entry(&self, other: &Self) -> bool;
}

macro_rules! impl_prioritized_by_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl Prioritized for $t {
                #[inline(always)]
                fn precedes(&self, other: &Self) -> bool {
                    self < other
                }

                #[inline(always)]
                fn same_entry(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_prioritized_by_value!(
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    OrderedFloat<f32>,
    OrderedFloat<f64>,
);

#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    heap: Vec<T>,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self { heap: Vec::new() }
    }
}

impl<T: Prioritized> PriorityQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Entries in storage order, which is not sorted.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.heap.iter()
    }

    pub fn push(&mut self, value: T) {
        self.heap.push(value);
        self.sift_up(self.heap.len() - 1);
    }

    pub fn peek_min(&self) -> Result<&T, GraphError> {
        self.heap.first().ok_or(GraphError::EmptyQueue)
    }

    /// Removes and returns the minimum. The last entry takes the root and sinks.
    pub fn pop_min(&mut self) -> Result<T, GraphError> {
        if self.heap.is_empty() {
            return Err(GraphError::EmptyQueue);
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let min = self.heap.pop().ok_or(GraphError::EmptyQueue)?;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    /// Removes the first entry for which `same_entry(value)` holds.
    ///
    /// Returns `false` (and leaves the queue untouched) when there is no such entry.
    pub fn remove(&mut self, value: &T) -> bool {
        let Some(mut index) = self.heap.iter().position(|e| e.same_entry(value)) else {
            return false;
        };
        while index > 0 {
            let parent = (index - 1) / 2;
            self.heap.swap(index, parent);
            index = parent;
        }
        self.pop_min().is_ok()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.heap.iter().any(|e| e.same_entry(value))
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[index].precedes(&self.heap[parent]) {
                self.heap.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    // Swap with whichever child is smaller, as long as it is smaller than the current entry.
    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;
            if left < len && self.heap[left].precedes(&self.heap[smallest]) {
                smallest = left;
            }
            if right < len && self.heap[right].precedes(&self.heap[smallest]) {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.heap.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<T: Prioritized> Extend<T> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Prioritized> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = PriorityQueue::new();
        queue.extend(iter);
        queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Task {
        id: usize,
        priority: u32,
    }

    impl Prioritized for Task {
        fn precedes(&self, other: &Self) -> bool {
            self.priority < other.priority
        }

        fn same_entry(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }

    fn is_heap<T: Prioritized>(queue: &PriorityQueue<T>) -> bool {
        (1..queue.heap.len()).all(|i| !queue.heap[i].precedes(&queue.heap[(i - 1) / 2]))
    }

    fn drain<T: Prioritized>(queue: &mut PriorityQueue<T>) -> Vec<T> {
        let mut out = Vec::with_capacity(queue.len());
        while let Ok(value) = queue.pop_min() {
            out.push(value);
        }
        out
    }

    #[test]
    fn it_works() {
        let mut queue: PriorityQueue<u32> = [5, 3, 8, 1, 9, 2].into_iter().collect();
        assert_eq!(queue.len(), 6);
        assert_eq!(queue.peek_min(), Ok(&1));
        assert_eq!(drain(&mut queue), vec![1, 2, 3, 5, 8, 9]);
        assert!(queue.is_empty());
    }

    #[test]
    fn empty_queue() {
        let mut queue: PriorityQueue<i64> = PriorityQueue::new();
        assert_eq!(queue.peek_min(), Err(GraphError::EmptyQueue));
        assert_eq!(queue.pop_min(), Err(GraphError::EmptyQueue));
        assert!(!queue.remove(&3));
        assert!(!queue.contains(&3));
    }

    #[test]
    fn push_then_pop_restores_size() {
        let mut queue: PriorityQueue<u32> = [4, 4, 7].into_iter().collect();
        queue.push(1);
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.pop_min(), Ok(1));
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn random_pushes_pop_in_order() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..50 {
            let n = rng.random_range(0..200);
            let mut queue = PriorityQueue::with_capacity(n);
            for _ in 0..n {
                queue.push(rng.random_range(0..50u32));
                assert!(is_heap(&queue));
            }
            let popped = drain(&mut queue);
            assert_eq!(popped.len(), n);
            assert!(popped.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn remove_by_identity() {
        let mut queue = PriorityQueue::new();
        queue.push(Task { id: 0, priority: 7 });
        queue.push(Task { id: 1, priority: 3 });
        queue.push(Task { id: 2, priority: 5 });

        // Priority differs from the stored entry, identity matches.
        let stale = Task { id: 2, priority: 100 };
        assert!(queue.contains(&stale));
        assert!(queue.remove(&stale));
        assert!(!queue.contains(&stale));
        assert_eq!(queue.len(), 2);

        queue.push(Task { id: 2, priority: 1 });
        let order: Vec<_> = drain(&mut queue).iter().map(|t| t.id).collect();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut queue: PriorityQueue<u32> = [3, 1, 2].into_iter().collect();
        assert!(!queue.remove(&10));
        assert_eq!(queue.len(), 3);
        assert_eq!(drain(&mut queue), vec![1, 2, 3]);
    }

    #[test]
    fn remove_root_and_leaf() {
        let mut queue: PriorityQueue<u32> = (0..10).collect();
        assert!(queue.remove(&0));
        assert!(is_heap(&queue));
        assert!(queue.remove(&9));
        assert!(is_heap(&queue));
        assert_eq!(drain(&mut queue), (1..9).collect::<Vec<_>>());
    }

    #[test]
    fn random_removals_keep_heap_order() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let mut queue = PriorityQueue::new();
            let mut expected = Vec::new();
            for id in 0..rng.random_range(1..100) {
                let task = Task {
                    id,
                    priority: rng.random_range(0..30),
                };
                queue.push(task);
                expected.push(task);
            }
            for _ in 0..rng.random_range(0..expected.len()) {
                let victim = expected.swap_remove(rng.random_range(0..expected.len()));
                let before = queue.len();
                assert!(queue.remove(&victim));
                assert_eq!(queue.len(), before - 1);
                assert!(!queue.contains(&victim));
                assert!(is_heap(&queue));
            }
            let popped: Vec<u32> = drain(&mut queue).iter().map(|t| t.priority).collect();
            let mut priorities: Vec<u32> = expected.iter().map(|t| t.priority).collect();
            priorities.sort_unstable();
            assert_eq!(popped, priorities);
        }
    }

    #[test]
    fn ordered_floats() {
        let mut queue: PriorityQueue<OrderedFloat<f64>> =
            [2.5, -1.0, 0.25].into_iter().map(OrderedFloat).collect();
        assert_eq!(queue.pop_min(), Ok(OrderedFloat(-1.0)));
        assert_eq!(queue.peek_min(), Ok(&OrderedFloat(0.25)));
    }
}
