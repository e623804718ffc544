// Undirected weighted graph stored as an adjacency list.
//
// Every logical edge (a, b, w) is kept as two records: a -> b and b -> a, both with weight w.
// The vertex count is fixed at construction and indices are never renumbered.

use std::fmt;
use std::ops::Add;

use ordered_float::OrderedFloat;

use crate::error::GraphError;

pub type VertexId = usize;

/// Floating point edge weight with a total order.
pub type Distance = OrderedFloat<f64>;

/// Edge weight: totally ordered, additive, with `Default` as the zero value.
///
/// Path sums must fit in `W`. Integer weights near their maximum overflow during relaxation.
pub trait Weight: Copy + Ord + Add<Output = Self> + Default + fmt::Debug {}

impl<T> Weight for T where T: Copy + Ord + Add<Output = T> + Default + fmt::Debug {}

/// One adjacency record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<W> {
    pub destination: VertexId,
    pub weight: W,
}

#[derive(Debug, Clone)]
struct VertexRecord<V, W> {
    value: V,
    neighbors: Vec<Edge<W>>,
}

#[derive(Debug, Clone)]
pub struct Graph<V, W> {
    vertices: Vec<VertexRecord<V, W>>,
}

impl<V: Default, W> Graph<V, W> {
    /// Creates `num_vertices` vertices with default payloads and no edges.
    pub fn new(num_vertices: usize) -> Self {
        let vertices = (0..num_vertices)
            .map(|_| VertexRecord {
                value: V::default(),
                neighbors: Vec::new(),
            })
            .collect();
        Self { vertices }
    }
}

impl<V, W> Graph<V, W> {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of logical (undirected) edges.
    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.neighbors.len()).sum::<usize>() / 2
    }

    pub fn check_vertex(&self, vertex: VertexId) -> Result<(), GraphError> {
        if vertex < self.vertices.len() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex,
                count: self.vertices.len(),
            })
        }
    }

    fn check_pair(&self, u: VertexId, v: VertexId) -> Result<(), GraphError> {
        self.check_vertex(u)?;
        self.check_vertex(v)
    }

    fn position(&self, u: VertexId, v: VertexId) -> Option<usize> {
        self.vertices[u]
            .neighbors
            .iter()
            .position(|edge| edge.destination == v)
    }

    /// Adds the undirected edge (u, v). An existing edge keeps its weight.
    ///
    /// Self-loops are accepted but stored twice in the same list; the search does not
    /// special-case them.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, weight: W) -> Result<(), GraphError>
    where
        W: Copy,
    {
        self.check_pair(u, v)?;
        if self.position(u, v).is_some() {
            return Ok(());
        }
        self.vertices[u].neighbors.push(Edge {
            destination: v,
            weight,
        });
        self.vertices[v].neighbors.push(Edge {
            destination: u,
            weight,
        });
        Ok(())
    }

    /// Removes the undirected edge (u, v) if present.
    pub fn remove_edge(&mut self, u: VertexId, v: VertexId) -> Result<(), GraphError> {
        self.check_pair(u, v)?;
        if let Some(i) = self.position(u, v) {
            // Vec::remove keeps the remaining neighbors in insertion order.
            self.vertices[u].neighbors.remove(i);
            if let Some(j) = self.position(v, u) {
                self.vertices[v].neighbors.remove(j);
            }
        }
        Ok(())
    }

    /// Adjacency records of `u` in insertion order.
    pub fn neighbors(&self, u: VertexId) -> Result<&[Edge<W>], GraphError> {
        self.check_vertex(u)?;
        Ok(&self.vertices[u].neighbors)
    }

    pub fn contains_edge(&self, u: VertexId, v: VertexId) -> Result<bool, GraphError> {
        self.check_pair(u, v)?;
        Ok(self.position(u, v).is_some())
    }

    pub fn edge_weight(&self, u: VertexId, v: VertexId) -> Result<W, GraphError>
    where
        W: Copy,
    {
        self.check_pair(u, v)?;
        self.position(u, v)
            .map(|i| self.vertices[u].neighbors[i].weight)
            .ok_or(GraphError::NoSuchEdge { from: u, to: v })
    }

    /// Overwrites the weight of (u, v) in both directions.
    pub fn set_edge_weight(&mut self, u: VertexId, v: VertexId, weight: W) -> Result<(), GraphError>
    where
        W: Copy,
    {
        self.check_pair(u, v)?;
        let i = self
            .position(u, v)
            .ok_or(GraphError::NoSuchEdge { from: u, to: v })?;
        self.vertices[u].neighbors[i].weight = weight;
        if let Some(j) = self.position(v, u) {
            self.vertices[v].neighbors[j].weight = weight;
        }
        Ok(())
    }

    pub fn vertex_value(&self, u: VertexId) -> Result<&V, GraphError> {
        self.check_vertex(u)?;
        Ok(&self.vertices[u].value)
    }

    pub fn set_vertex_value(&mut self, u: VertexId, value: V) -> Result<(), GraphError> {
        self.check_vertex(u)?;
        self.vertices[u].value = value;
        Ok(())
    }
}

impl<V, W> fmt::Display for Graph<V, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, vertex) in self.vertices.iter().enumerate() {
            write!(f, "{} <-->", i)?;
            for edge in &vertex.neighbors {
                write!(f, " {}", edge.destination)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
