//! Shortest paths on weighted undirected graphs with a generalized A* that accepts sets of start
//! and goal vertices. A zero heuristic gives Dijkstra.
//!
//! ```
//! use astar_sets::{find_shortest_path, Graph, ZeroHeuristic};
//!
//! let mut graph: Graph<(), u32> = Graph::new(5);
//! for (u, v, w) in [(0, 1, 4), (1, 2, 1), (0, 2, 7), (2, 3, 2), (3, 4, 1)] {
//!     graph.add_edge(u, v, w).unwrap();
//! }
//! let path = find_shortest_path(&graph, &[0, 3], &[2], &ZeroHeuristic)
//!     .unwrap()
//!     .expect("2 is reachable");
//! assert_eq!(path.vertices, vec![3, 2]);
//! assert_eq!(path.cost, 2);
//! ```

pub mod astar;
pub mod dijkstra;
pub mod error;
pub mod geo;
pub mod graph;
pub mod heuristic;
pub mod io;
pub mod open_set;
pub mod priority_queue;

#[cfg(test)]
mod test_graphs;

pub use astar::{
    find_shortest_path, find_shortest_path_with, ShortestPath, VertexState, VertexStatus,
};
pub use dijkstra::shortest_distances;
pub use error::{FormatError, GraphError, VertexSet};
pub use geo::{Metric, Point};
pub use graph::{Distance, Edge, Graph, VertexId, Weight};
pub use heuristic::{Heuristic, StraightLineHeuristic, ZeroHeuristic};
pub use open_set::{IndexedOpenSet, OpenSet};
pub use priority_queue::{Prioritized, PriorityQueue};
