/*
Open set backends for the search.

The default is the array heap with remove-then-reinsert updates. `IndexedOpenSet` keeps a
position map beside the heap (orx `BinaryHeapWithMap`) so an improved vertex is updated with a
decrease-key in O(log n) instead of a linear scan. Both give the same costs; on ties the
popped order, and therefore the returned path, may differ.
*/

use orx_priority_queue::{BinaryHeapWithMap, PriorityQueue as _, PriorityQueueDecKey as _};

use crate::astar::VertexStatus;
use crate::error::GraphError;
use crate::graph::{VertexId, Weight};
use crate::priority_queue::PriorityQueue;

pub trait OpenSet<W>: Default {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds a vertex that is not in the set yet.
    fn insert(&mut self, status: &VertexStatus<W>);

    /// Replaces the entry of a vertex already in the set after its cost improved.
    fn reprioritize(&mut self, status: &VertexStatus<W>);

    /// Removes the vertex with the lowest f.
    fn pop_min(&mut self) -> Result<VertexId, GraphError>;
}

impl<W: Weight> OpenSet<W> for PriorityQueue<VertexStatus<W>> {
    fn len(&self) -> usize {
        PriorityQueue::len(self)
    }

    fn insert(&mut self, status: &VertexStatus<W>) {
        self.push(*status);
    }

    fn reprioritize(&mut self, status: &VertexStatus<W>) {
        // Statuses compare by vertex, so the updated status finds the stale entry.
        self.remove(status);
        self.push(*status);
    }

    fn pop_min(&mut self) -> Result<VertexId, GraphError> {
        PriorityQueue::pop_min(self).map(|status| status.vertex)
    }
}

#[derive(Debug)]
pub struct IndexedOpenSet<W: Weight> {
    pq: BinaryHeapWithMap<VertexId, W>,
}

impl<W: Weight> IndexedOpenSet<W> {
    pub fn new() -> Self {
        Self {
            pq: BinaryHeapWithMap::new(),
        }
    }
}

impl<W: Weight> Default for IndexedOpenSet<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Weight> OpenSet<W> for IndexedOpenSet<W> {
    fn len(&self) -> usize {
        self.pq.len()
    }

    fn insert(&mut self, status: &VertexStatus<W>) {
        self.pq.push(status.vertex, status.f);
    }

    // The heuristic is pure, so a lower g always means a lower f.
    fn reprioritize(&mut self, status: &VertexStatus<W>) {
        self.pq.decrease_key_or_push(&status.vertex, status.f);
    }

    fn pop_min(&mut self) -> Result<VertexId, GraphError> {
        self.pq
            .pop()
            .map(|(vertex, _)| vertex)
            .ok_or(GraphError::EmptyQueue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astar::VertexState;

    fn status(vertex: VertexId, f: u32) -> VertexStatus<u32> {
        VertexStatus {
            vertex,
            state: VertexState::Open,
            parent: None,
            g: f,
            h: 0,
            f,
        }
    }

    fn exercise<O: OpenSet<u32>>() -> Vec<VertexId> {
        let mut open = O::default();
        assert!(open.is_empty());
        assert_eq!(open.pop_min(), Err(GraphError::EmptyQueue));

        open.insert(&status(0, 9));
        open.insert(&status(1, 4));
        open.insert(&status(2, 6));
        open.insert(&status(3, 8));
        open.reprioritize(&status(0, 1));
        open.reprioritize(&status(3, 5));
        assert_eq!(open.len(), 4);

        let mut order = Vec::new();
        while let Ok(vertex) = open.pop_min() {
            order.push(vertex);
        }
        order
    }

    #[test]
    fn array_heap() {
        assert_eq!(exercise::<PriorityQueue<VertexStatus<u32>>>(), vec![0, 1, 3, 2]);
    }

    #[test]
    fn indexed_heap() {
        assert_eq!(exercise::<IndexedOpenSet<u32>>(), vec![0, 1, 3, 2]);
    }
}
