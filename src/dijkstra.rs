use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::GraphError;
use crate::graph::{Graph, VertexId, Weight};

#[derive(Copy, Clone, PartialEq, Eq)]
struct State<W> {
    cost: W,
    node_id: VertexId,
}

// Min-heap by cost
impl<W: Weight> Ord for State<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        // reverse ordering for min-heap
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| self.node_id.cmp(&other.node_id))
    }
}

impl<W: Weight> PartialOrd for State<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra from every vertex in `sources` to all vertices.
///
/// Each entry is the distance from the nearest source, `None` when unreachable.
pub fn shortest_distances<V, W: Weight>(
    graph: &Graph<V, W>,
    sources: &[VertexId],
) -> Result<Vec<Option<W>>, GraphError> {
    let mut dist: Vec<Option<W>> = vec![None; graph.vertex_count()];
    let mut heap = BinaryHeap::new();

    for &start in sources {
        graph.check_vertex(start)?;
        dist[start] = Some(W::default());
        heap.push(State {
            cost: W::default(),
            node_id: start,
        });
    }

    while let Some(State { cost, node_id }) = heap.pop() {
        if dist[node_id].is_some_and(|best| cost > best) {
            continue;
        }
        for edge in graph.neighbors(node_id)? {
            let next_cost = cost + edge.weight;
            if dist[edge.destination].map_or(true, |best| next_cost < best) {
                dist[edge.destination] = Some(next_cost);
                heap.push(State {
                    cost: next_cost,
                    node_id: edge.destination,
                });
            }
        }
    }
    Ok(dist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_graphs::sample_graph;

    #[test]
    fn sample_graph_distances() {
        let graph = sample_graph();
        let dist = shortest_distances(&graph, &[0]).unwrap();
        assert_eq!(dist, vec![Some(0), Some(4), Some(5), Some(7), Some(8), None]);
    }

    #[test]
    fn nearest_source() {
        let graph = sample_graph();
        let dist = shortest_distances(&graph, &[0, 4]).unwrap();
        assert_eq!(dist, vec![Some(0), Some(4), Some(3), Some(1), Some(0), None]);
    }

    #[test]
    fn invalid_source() {
        let graph = sample_graph();
        assert_eq!(
            shortest_distances(&graph, &[9]),
            Err(GraphError::VertexOutOfRange { vertex: 9, count: 6 })
        );
    }
}
