// Fixtures shared by the unit tests.

use rand::Rng;

use crate::graph::Graph;

/// Six vertices; vertex 5 is isolated.
///
/// 0 -4- 1 -1- 2 -2- 3 -1- 4, plus 0 -7- 2.
pub fn sample_graph() -> Graph<(), u64> {
    let mut graph = Graph::new(6);
    for (u, v, w) in [(0, 1, 4), (1, 2, 1), (0, 2, 7), (2, 3, 2), (3, 4, 1)] {
        graph.add_edge(u, v, w).unwrap();
    }
    graph
}

/// `n` vertices and up to `m` random edges (duplicates and self-loops are skipped).
pub fn random_graph<R: Rng>(rng: &mut R, n: usize, m: usize, max_weight: u64) -> Graph<(), u64> {
    let mut graph = Graph::new(n);
    for _ in 0..m {
        let u = rng.random_range(0..n);
        let v = rng.random_range(0..n);
        if u != v {
            graph.add_edge(u, v, rng.random_range(0..=max_weight)).unwrap();
        }
    }
    graph
}

/// Floyd–Warshall over the whole graph.
pub fn all_pairs_distances(graph: &Graph<(), u64>) -> Vec<Vec<Option<u64>>> {
    let n = graph.vertex_count();
    let mut dist = vec![vec![None; n]; n];
    for (u, row) in dist.iter_mut().enumerate() {
        row[u] = Some(0);
        for edge in graph.neighbors(u).unwrap() {
            let best = row[edge.destination].map_or(edge.weight, |w: u64| w.min(edge.weight));
            row[edge.destination] = Some(best);
        }
    }
    for k in 0..n {
        for i in 0..n {
            let Some(ik) = dist[i][k] else { continue };
            for j in 0..n {
                if let Some(kj) = dist[k][j] {
                    if dist[i][j].map_or(true, |ij| ik + kj < ij) {
                        dist[i][j] = Some(ik + kj);
                    }
                }
            }
        }
    }
    dist
}
