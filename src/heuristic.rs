use ordered_float::OrderedFloat;

use crate::geo::{Metric, Point};
use crate::graph::{Distance, Graph, VertexId, Weight};

/// Estimated remaining cost between two vertices.
///
/// The search is optimal when the estimate never exceeds the true shortest distance. It is
/// evaluated against every goal whenever a vertex is discovered or improved, and must return the
/// same value for the same arguments.
pub trait Heuristic<V, W> {
    fn estimate(&self, graph: &Graph<V, W>, from: VertexId, to: VertexId) -> W;
}

impl<V, W, F> Heuristic<V, W> for F
where
    F: Fn(&Graph<V, W>, VertexId, VertexId) -> W,
{
    #[inline(always)]
    fn estimate(&self, graph: &Graph<V, W>, from: VertexId, to: VertexId) -> W {
        self(graph, from, to)
    }
}

/// Always zero, which turns A* into Dijkstra.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl<V, W: Weight> Heuristic<V, W> for ZeroHeuristic {
    #[inline(always)]
    fn estimate(&self, _graph: &Graph<V, W>, _from: VertexId, _to: VertexId) -> W {
        W::default()
    }
}

/// Straight-line distance between the points stored on the two vertices.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLineHeuristic {
    pub metric: Metric,
}

impl StraightLineHeuristic {
    pub fn new(metric: Metric) -> Self {
        Self { metric }
    }
}

impl Heuristic<Point, Distance> for StraightLineHeuristic {
    fn estimate(&self, graph: &Graph<Point, Distance>, from: VertexId, to: VertexId) -> Distance {
        match (graph.vertex_value(from), graph.vertex_value(to)) {
            (Ok(&a), Ok(&b)) => OrderedFloat(self.metric.distance(a, b)),
            // Zero is admissible when a point is unavailable.
            _ => OrderedFloat(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astar::find_shortest_path;
    use crate::dijkstra::shortest_distances;

    fn grid(metric: Metric) -> Graph<Point, Distance> {
        // 4x4 lattice with both diagonals in every other cell.
        let side = 4;
        let mut graph = Graph::new(side * side);
        for i in 0..side * side {
            let point = Point::new((i / side) as f64 * 0.01, (i % side) as f64 * 0.01);
            graph.set_vertex_value(i, point).unwrap();
        }
        let link = |graph: &mut Graph<Point, Distance>, a: usize, b: usize| {
            let pa = *graph.vertex_value(a).unwrap();
            let pb = *graph.vertex_value(b).unwrap();
            graph.add_edge(a, b, OrderedFloat(metric.distance(pa, pb))).unwrap();
        };
        for r in 0..side {
            for c in 0..side {
                let i = r * side + c;
                if c + 1 < side {
                    link(&mut graph, i, i + 1);
                }
                if r + 1 < side {
                    link(&mut graph, i, i + side);
                }
                if (r + c) % 2 == 0 && r + 1 < side && c + 1 < side {
                    link(&mut graph, i, i + side + 1);
                }
            }
        }
        graph
    }

    #[test]
    fn zero_heuristic_is_zero() {
        let graph: Graph<(), u32> = Graph::new(2);
        assert_eq!(ZeroHeuristic.estimate(&graph, 0, 1), 0);
    }

    #[test]
    fn straight_line_matches_dijkstra() {
        for metric in [Metric::Euclidean, Metric::Haversine] {
            let graph = grid(metric);
            let heuristic = StraightLineHeuristic::new(metric);
            let n = graph.vertex_count();
            for s in 0..n {
                let expected = shortest_distances(&graph, &[s]).unwrap();
                for t in 0..n {
                    let found = find_shortest_path(&graph, &[s], &[t], &heuristic)
                        .unwrap()
                        .unwrap();
                    let exact = expected[t].unwrap();
                    assert!((found.cost.0 - exact.0).abs() < 1e-6, "{s} -> {t}");
                }
            }
        }
    }

    #[test]
    fn straight_line_estimates_nearest_goal() {
        let graph = grid(Metric::Euclidean);
        let heuristic = StraightLineHeuristic::default();

        // 2 is one hop from 6. Estimating toward the farthest goal ends two hops away.
        let path = find_shortest_path(&graph, &[6], &[0, 1, 2], &heuristic)
            .unwrap()
            .unwrap();
        assert_eq!(path.vertices, vec![6, 2]);
        assert!((path.cost.0 - 0.01).abs() < 1e-9);

        let n = graph.vertex_count();
        for goals in [vec![0, 1, 2], vec![0, 1, 3], vec![5, 10, 15], vec![3, 12]] {
            for s in 0..n {
                let expected = shortest_distances(&graph, &[s]).unwrap();
                let nearest = goals.iter().filter_map(|&g| expected[g]).min().unwrap();
                let found = find_shortest_path(&graph, &[s], &goals, &heuristic)
                    .unwrap()
                    .unwrap();
                assert!((found.cost.0 - nearest.0).abs() < 1e-9, "{s} -> {goals:?}");
                assert!(goals.contains(&found.goal().unwrap()));
            }
        }
    }

    #[test]
    fn straight_line_expands_fewer_vertices() {
        let graph = grid(Metric::Euclidean);
        let informed = find_shortest_path(&graph, &[0], &[15], &StraightLineHeuristic::default())
            .unwrap()
            .unwrap();
        let blind = find_shortest_path(&graph, &[0], &[15], &ZeroHeuristic)
            .unwrap()
            .unwrap();
        assert!((informed.cost.0 - blind.cost.0).abs() < 1e-9);
        assert!(informed.expanded <= blind.expanded);
    }
}
