// A* over sets of start and goal vertices.
//
// Multiple starts behave like a zero-cost virtual source: every start is seeded into the open
// set with g = 0. Multiple goals are tagged in the status array, and the search stops at the
// first goal-tagged vertex popped with minimal f. With an admissible heuristic that is the
// nearest goal reachable from any start. A zero heuristic gives Dijkstra.

use tracing::{debug, trace};

use crate::error::{GraphError, VertexSet};
use crate::graph::{Graph, VertexId, Weight};
use crate::heuristic::Heuristic;
use crate::open_set::OpenSet;
use crate::priority_queue::{Prioritized, PriorityQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexState {
    Undiscovered,
    Open,
    Closed,
    UndiscoveredGoal,
    OpenGoal,
}

/// Per-vertex bookkeeping for one search call.
#[derive(Debug, Clone, Copy)]
pub struct VertexStatus<W> {
    pub vertex: VertexId,
    pub state: VertexState,
    pub parent: Option<VertexId>,
    /// Cost from the nearest start.
    pub g: W,
    /// Estimate to the nearest goal.
    pub h: W,
    /// g + h, the open set priority.
    pub f: W,
}

impl<W: Default> VertexStatus<W> {
    fn undiscovered(vertex: VertexId) -> Self {
        Self {
            vertex,
            state: VertexState::Undiscovered,
            parent: None,
            g: W::default(),
            h: W::default(),
            f: W::default(),
        }
    }
}

// Ordered by f, identified by vertex, so a stale entry can be found from an updated status.
impl<W: Weight> Prioritized for VertexStatus<W> {
    #[inline(always)]
    fn precedes(&self, other: &Self) -> bool {
        self.f < other.f
    }

    #[inline(always)]
    fn same_entry(&self, other: &Self) -> bool {
        self.vertex == other.vertex
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPath<W> {
    /// From a start vertex to a goal vertex, both included.
    pub vertices: Vec<VertexId>,
    pub cost: W,
    /// Number of vertices closed before the goal was popped.
    pub expanded: usize,
}

impl<W> ShortestPath<W> {
    pub fn start(&self) -> Option<VertexId> {
        self.vertices.first().copied()
    }

    pub fn goal(&self) -> Option<VertexId> {
        self.vertices.last().copied()
    }
}

/// Runs A* with the array-heap open set.
///
/// Returns `Ok(None)` when no goal is reachable from any start, and an error when either set is
/// empty or names a vertex outside the graph.
pub fn find_shortest_path<V, W, H>(
    graph: &Graph<V, W>,
    starts: &[VertexId],
    goals: &[VertexId],
    heuristic: &H,
) -> Result<Option<ShortestPath<W>>, GraphError>
where
    W: Weight,
    H: Heuristic<V, W> + ?Sized,
{
    find_shortest_path_with::<PriorityQueue<VertexStatus<W>>, V, W, H>(
        graph, starts, goals, heuristic,
    )
}

/// Same as [`find_shortest_path`] with a chosen open set implementation.
pub fn find_shortest_path_with<O, V, W, H>(
    graph: &Graph<V, W>,
    starts: &[VertexId],
    goals: &[VertexId],
    heuristic: &H,
) -> Result<Option<ShortestPath<W>>, GraphError>
where
    O: OpenSet<W>,
    W: Weight,
    H: Heuristic<V, W> + ?Sized,
{
    if starts.is_empty() {
        return Err(GraphError::EmptyVertexSet(VertexSet::Start));
    }
    if goals.is_empty() {
        return Err(GraphError::EmptyVertexSet(VertexSet::Goal));
    }
    for &vertex in starts.iter().chain(goals) {
        graph.check_vertex(vertex)?;
    }

    debug!(
        vertices = graph.vertex_count(),
        starts = starts.len(),
        goals = goals.len(),
        "starting search"
    );

    // The estimate to the nearest goal, evaluated against every goal each time.
    let nearest_goal = |vertex: VertexId| -> W {
        goals
            .iter()
            .map(|&goal| heuristic.estimate(graph, vertex, goal))
            .min()
            .unwrap_or_default()
    };

    let mut statuses: Vec<VertexStatus<W>> = (0..graph.vertex_count())
        .map(VertexStatus::undiscovered)
        .collect();
    for &goal in goals {
        statuses[goal].state = VertexState::UndiscoveredGoal;
    }

    let mut open = O::default();
    for &start in starts {
        let status = &mut statuses[start];
        status.state = match status.state {
            VertexState::Undiscovered => VertexState::Open,
            VertexState::UndiscoveredGoal => VertexState::OpenGoal,
            // Listed twice.
            _ => continue,
        };
        status.g = W::default();
        status.h = nearest_goal(start);
        status.f = status.g + status.h;
        open.insert(status);
    }

    let mut expanded = 0;
    while !open.is_empty() {
        let current = open.pop_min()?;
        let cur = statuses[current];

        if cur.state == VertexState::OpenGoal {
            let vertices = reconstruct_path(&statuses, current);
            debug!(
                goal = current,
                cost = ?cur.g,
                expanded,
                hops = vertices.len() - 1,
                "goal reached"
            );
            return Ok(Some(ShortestPath {
                vertices,
                cost: cur.g,
                expanded,
            }));
        }

        statuses[current].state = VertexState::Closed;
        expanded += 1;
        trace!(vertex = current, g = ?cur.g, f = ?cur.f, "closed");

        for edge in graph.neighbors(current)? {
            let neighbor = edge.destination;
            let tentative_g = cur.g + edge.weight;
            let status = &mut statuses[neighbor];

            let was_open = match status.state {
                VertexState::Closed => continue,
                VertexState::Open | VertexState::OpenGoal => {
                    // Ties keep the first parent found.
                    if tentative_g >= status.g {
                        continue;
                    }
                    true
                }
                VertexState::Undiscovered => {
                    status.state = VertexState::Open;
                    false
                }
                VertexState::UndiscoveredGoal => {
                    status.state = VertexState::OpenGoal;
                    false
                }
            };

            status.parent = Some(current);
            status.g = tentative_g;
            status.h = nearest_goal(neighbor);
            status.f = status.g + status.h;
            trace!(vertex = neighbor, parent = current, g = ?status.g, f = ?status.f, "relaxed");

            if was_open {
                open.reprioritize(status);
            } else {
                open.insert(status);
            }
        }
    }

    debug!(expanded, "open set exhausted without reaching a goal");
    Ok(None)
}

fn reconstruct_path<W>(statuses: &[VertexStatus<W>], goal: VertexId) -> Vec<VertexId> {
    let mut path = vec![goal];
    let mut vertex = goal;
    while let Some(parent) = statuses[vertex].parent {
        path.push(parent);
        vertex = parent;
    }
    path.reverse();
    path
}
