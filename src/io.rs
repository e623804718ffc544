/*
Graph readers and path writers.

Weighted text format (whitespace separated, edges listed once):
    VERTEX_COUNT
    ORIGIN DESTINATION WEIGHT
    ...

Coordinate text format, edge weights are the metric distance between the endpoints:
    VERTEX_COUNT
    INDEX X Y            (exactly VERTEX_COUNT lines)
    ORIGIN DESTINATION
    ...

CSV format: a header row, then origin,destination,weight records.
*/

use std::fmt::Display;
use std::io::{BufRead, Read, Write};
use std::iter::Enumerate;
use std::str::{FromStr, SplitWhitespace};

use ordered_float::OrderedFloat;
use tracing::debug;

use crate::astar::ShortestPath;
use crate::error::FormatError;
use crate::geo::{Metric, Point};
use crate::graph::{Distance, Graph, VertexId, Weight};

struct Tokens<'a> {
    iter: Enumerate<SplitWhitespace<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            iter: input.split_whitespace().enumerate(),
        }
    }

    fn next_value<T: FromStr>(&mut self, expected: &'static str) -> Result<Option<T>, FormatError> {
        match self.iter.next() {
            None => Ok(None),
            Some((position, token)) => token.parse().map(Some).map_err(|_| FormatError::BadToken {
                token: token.to_string(),
                position,
                expected,
            }),
        }
    }

    // A record that has started must be complete.
    fn require<T: FromStr>(
        &mut self,
        expected: &'static str,
        record: &'static str,
    ) -> Result<T, FormatError> {
        self.next_value(expected)?.ok_or(FormatError::Incomplete(record))
    }

    fn vertex_count(&mut self) -> Result<usize, FormatError> {
        self.next_value("a vertex count")?
            .ok_or(FormatError::MissingVertexCount)
    }
}

fn read_to_string<R: Read>(mut reader: R) -> Result<String, FormatError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    Ok(input)
}

/// Reads the weighted text format. Repeated edges keep their first weight.
pub fn read_weighted_graph<W, R>(reader: R) -> Result<Graph<(), W>, FormatError>
where
    W: FromStr + Copy,
    R: BufRead,
{
    let input = read_to_string(reader)?;
    let mut tokens = Tokens::new(&input);
    let mut graph = Graph::new(tokens.vertex_count()?);

    while let Some(origin) = tokens.next_value::<VertexId>("an origin vertex")? {
        let destination = tokens.require("a destination vertex", "edge record")?;
        let weight = tokens.require("an edge weight", "edge record")?;
        graph.add_edge(origin, destination, weight)?;
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "read weighted graph"
    );
    Ok(graph)
}

/// Reads the coordinate text format, weighting every edge with `metric`.
pub fn read_coordinate_graph<R: BufRead>(
    reader: R,
    metric: Metric,
) -> Result<Graph<Point, Distance>, FormatError> {
    let input = read_to_string(reader)?;
    let mut tokens = Tokens::new(&input);
    let num_vertices = tokens.vertex_count()?;
    let mut graph = Graph::new(num_vertices);

    for _ in 0..num_vertices {
        let vertex: VertexId = tokens.require("a vertex index", "coordinate line")?;
        let x = tokens.require("an x coordinate", "coordinate line")?;
        let y = tokens.require("a y coordinate", "coordinate line")?;
        graph.set_vertex_value(vertex, Point::new(x, y))?;
    }

    while let Some(origin) = tokens.next_value::<VertexId>("an origin vertex")? {
        let destination: VertexId = tokens.require("a destination vertex", "edge record")?;
        let a = *graph.vertex_value(origin)?;
        let b = *graph.vertex_value(destination)?;
        graph.add_edge(origin, destination, OrderedFloat(metric.distance(a, b)))?;
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        ?metric,
        "read coordinate graph"
    );
    Ok(graph)
}

/// Reads a CSV edge list. The vertex count is one past the largest index.
pub fn read_csv_edges<W, R>(reader: R) -> Result<Graph<(), W>, FormatError>
where
    W: FromStr + Copy,
    R: Read,
{
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true) // important: skip header line
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut edges: Vec<(VertexId, VertexId, W)> = Vec::new();
    let mut num_vertices = 0;
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        let origin: VertexId = parse_field(&record, 0, line, "an origin vertex")?;
        let destination: VertexId = parse_field(&record, 1, line, "a destination vertex")?;
        let weight = parse_field(&record, 2, line, "an edge weight")?;

        let largest = origin.max(destination);
        let count = largest.checked_add(1).ok_or_else(|| FormatError::BadField {
            field: largest.to_string(),
            line,
            expected: "a vertex index below usize::MAX",
        })?;
        num_vertices = num_vertices.max(count);
        edges.push((origin, destination, weight));
    }

    let mut graph = Graph::new(num_vertices);
    for (u, v, w) in edges {
        graph.add_edge(u, v, w)?;
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "read CSV graph"
    );
    Ok(graph)
}

fn parse_field<T: FromStr>(
    record: &csv::StringRecord,
    index: usize,
    line: u64,
    expected: &'static str,
) -> Result<T, FormatError> {
    let field = record
        .get(index)
        .ok_or(FormatError::Incomplete("CSV edge record"))?;
    field.parse().map_err(|_| FormatError::BadField {
        field: field.to_string(),
        line,
        expected,
    })
}

/// Writes `step,vertex,cost` rows, `cost` being accumulated from the start vertex.
pub fn write_path_csv<V, W, Wr>(
    writer: Wr,
    graph: &Graph<V, W>,
    path: &ShortestPath<W>,
) -> Result<(), FormatError>
where
    W: Weight + Display,
    Wr: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["step", "vertex", "cost"])?;

    let mut cost = W::default();
    let mut previous: Option<VertexId> = None;
    for (step, &vertex) in path.vertices.iter().enumerate() {
        if let Some(prev) = previous {
            cost = cost + graph.edge_weight(prev, vertex)?;
        }
        wtr.write_record(&[step.to_string(), vertex.to_string(), cost.to_string()])?;
        previous = Some(vertex);
    }
    wtr.flush()?;
    Ok(())
}
