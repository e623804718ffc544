use anyhow::{bail, Context, Result};
use astar_sets::io::read_csv_edges;
use astar_sets::{
    find_shortest_path_with, shortest_distances, Distance, Graph, IndexedOpenSet, PriorityQueue,
    ShortestPath, VertexId, VertexStatus, ZeroHeuristic,
};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::time::Instant;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "astar-bench")]
#[command(about = "Build a graph from a CSV with origin, destination and weight per row and time repeated searches.", long_about = None)]
struct Cli {
    /// Path to the .csv file
    #[arg(short, long)]
    csv: String,

    /// Number of runs. Run i searches from vertex i to vertex n-1-i.
    #[arg(short, long)]
    num_runs: usize,

    #[arg(short, long, value_enum, default_value_t = OpenSetKind::Queue)]
    open_set: OpenSetKind,

    /// Check every cost against a plain Dijkstra
    #[arg(long, default_value_t = false)]
    verify: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OpenSetKind {
    /// Array heap with remove-then-reinsert updates
    Queue,
    /// Heap with a position map and decrease-key updates
    Indexed,
}

impl OpenSetKind {
    fn run(
        &self,
        graph: &Graph<(), Distance>,
        start: VertexId,
        goal: VertexId,
    ) -> Result<Option<ShortestPath<Distance>>> {
        let result = match self {
            OpenSetKind::Queue => {
                find_shortest_path_with::<PriorityQueue<VertexStatus<Distance>>, _, _, _>(
                    graph,
                    &[start],
                    &[goal],
                    &ZeroHeuristic,
                )
            }
            OpenSetKind::Indexed => find_shortest_path_with::<IndexedOpenSet<Distance>, _, _, _>(
                graph,
                &[start],
                &[goal],
                &ZeroHeuristic,
            ),
        };
        Ok(result?)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let file = File::open(&cli.csv).with_context(|| format!("opening {}", &cli.csv))?;
    let graph: Graph<(), Distance> =
        read_csv_edges(file).with_context(|| format!("reading {}", &cli.csv))?;
    let n = graph.vertex_count();
    if cli.num_runs > n {
        bail!("{} runs requested but the graph only has {} vertices", cli.num_runs, n);
    }

    let mut duration_millis = Vec::with_capacity(cli.num_runs);
    let mut unreachable = 0;
    for start in 0..cli.num_runs {
        let goal = n - 1 - start;
        let now = Instant::now();
        let path = cli.open_set.run(&graph, start, goal)?;
        duration_millis.push(now.elapsed().as_secs_f64() * 1000.0);

        if path.is_none() {
            unreachable += 1;
        }
        debug!(start, goal, cost = ?path.as_ref().map(|p| p.cost), "run finished");

        if cli.verify {
            let expected = shortest_distances(&graph, &[start])?[goal];
            let found = path.map(|p| p.cost);
            if expected != found {
                bail!("{} -> {}: A* found {:?}, Dijkstra found {:?}", start, goal, found, expected);
            }
        }
    }

    if unreachable > 0 {
        warn!(unreachable, "some goals were not reachable");
    }
    println!("{:?}", duration_millis);

    Ok(())
}
