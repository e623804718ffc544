use std::fmt;

use thiserror::Error;

/// Which vertex set of a search request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexSet {
    Start,
    Goal,
}

impl fmt::Display for VertexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexSet::Start => f.write_str("start"),
            VertexSet::Goal => f.write_str("goal"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("vertex {vertex} is out of range for a graph of {count} vertices")]
    VertexOutOfRange { vertex: usize, count: usize },
    #[error("no edge between {from} and {to}")]
    NoSuchEdge { from: usize, to: usize },
    #[error("the {0} vertex set is empty")]
    EmptyVertexSet(VertexSet),
    #[error("priority queue is empty")]
    EmptyQueue,
}

/// Errors raised while reading a graph from a text or CSV stream.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("failed to read graph input")]
    Io(#[from] std::io::Error),
    #[error("malformed CSV input")]
    Csv(#[from] csv::Error),
    #[error("input does not start with a vertex count")]
    MissingVertexCount,
    #[error("unexpected token {token:?} at position {position}, expected {expected}")]
    BadToken {
        token: String,
        position: usize,
        expected: &'static str,
    },
    #[error("unexpected CSV field {field:?} on line {line}, expected {expected}")]
    BadField {
        field: String,
        line: u64,
        expected: &'static str,
    },
    #[error("input ended in the middle of a {0}")]
    Incomplete(&'static str),
    #[error(transparent)]
    Graph(#[from] GraphError),
}
