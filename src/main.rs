use anyhow::{Context, Result};
use astar_sets::io::{read_coordinate_graph, read_csv_edges, read_weighted_graph, write_path_csv};
use astar_sets::{
    find_shortest_path, Distance, Graph, Heuristic, Metric, StraightLineHeuristic, VertexId,
    ZeroHeuristic,
};
use clap::{ArgAction, Parser, ValueEnum};
use std::fs::File;
use std::io::BufReader;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "astar")]
#[command(about = "Load a graph and find the shortest path between a set of start vertices and a set of goal vertices.", long_about = None)]
struct Cli {
    /// Path to the graph file
    #[arg(short, long)]
    graph: String,

    #[arg(short, long, value_enum, default_value_t = GraphFormat::Weighted)]
    format: GraphFormat,

    /// Distance used for coordinate graphs, both for edge weights and the heuristic
    #[arg(short, long, value_enum, default_value_t = Metric::Euclidean)]
    metric: Metric,

    /// Start vertices (comma-separated, e.g. "5,14")
    #[arg(short, long, value_delimiter = ',', required = true)]
    start: Vec<VertexId>,

    /// Goal vertices (comma-separated, e.g. "8,16")
    #[arg(short = 't', long, value_delimiter = ',', required = true)]
    goal: Vec<VertexId>,

    /// Output CSV (step, vertex, cost). If omitted, the path is only printed to stdout.
    #[arg(short, long)]
    out: Option<String>,

    /// Print the adjacency list before searching
    #[arg(long, default_value_t = false)]
    print_graph: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum GraphFormat {
    /// Vertex count, then "origin destination weight" triples
    Weighted,
    /// Vertex count, "index x y" lines, then "origin destination" pairs
    Coordinates,
    /// CSV with a header and origin,destination,weight records
    Csv,
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run<V, H>(cli: &Cli, graph: &Graph<V, Distance>, heuristic: &H) -> Result<()>
where
    H: Heuristic<V, Distance>,
{
    println!(
        "Graph: {} vertices, {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );
    if cli.print_graph {
        print!("{}", graph);
    }

    let now = Instant::now();
    let result = find_shortest_path(graph, &cli.start, &cli.goal, heuristic)
        .context("invalid search request")?;
    info!(elapsed_ms = now.elapsed().as_secs_f64() * 1000.0, "search finished");

    let Some(path) = result else {
        println!("No path from {:?} to {:?}", cli.start, cli.goal);
        return Ok(());
    };

    println!("Cost: {}", path.cost);
    let vertices: Vec<String> = path.vertices.iter().map(|v| v.to_string()).collect();
    println!("Path: {}", vertices.join(" "));
    println!("Expanded: {}", path.expanded);

    if let Some(out_path) = &cli.out {
        let file = File::create(out_path).with_context(|| format!("creating CSV {}", out_path))?;
        write_path_csv(file, graph, &path).with_context(|| format!("writing CSV {}", out_path))?;
        println!("Wrote {} path vertices to {}", path.vertices.len(), out_path);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file = File::open(&cli.graph).with_context(|| format!("opening {}", &cli.graph))?;
    let reader = BufReader::new(file);

    match cli.format {
        GraphFormat::Weighted => {
            let graph: Graph<(), Distance> = read_weighted_graph(reader)
                .with_context(|| format!("reading {}", &cli.graph))?;
            run(&cli, &graph, &ZeroHeuristic)
        }
        GraphFormat::Csv => {
            let graph: Graph<(), Distance> =
                read_csv_edges(reader).with_context(|| format!("reading {}", &cli.graph))?;
            run(&cli, &graph, &ZeroHeuristic)
        }
        GraphFormat::Coordinates => {
            let graph = read_coordinate_graph(reader, cli.metric)
                .with_context(|| format!("reading {}", &cli.graph))?;
            run(&cli, &graph, &StraightLineHeuristic::new(cli.metric))
        }
    }
}
