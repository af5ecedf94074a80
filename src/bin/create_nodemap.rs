//! Create a node map JSON file
//!
//! Lays the partition's nodes out on the enclosure grid, in pbsnodes order,
//! and saves the mapping for later use with `plot-cluster-load-map --node_map`.
//!
//! Usage:
//! ```bash
//! create-nodemap --partition thinking --json thinking_nodemap.json
//! ```

use clap::Parser;
use cluster_load_map::cli::{self, GridArgs, SourceArgs};
use cluster_load_map::logging;
use cluster_load_map::pipeline;
use std::path::PathBuf;
use tracing::info;

/// Create a nodemap JSON file
#[derive(Debug, Parser)]
#[command(name = "create-nodemap", version)]
struct Args {
    #[command(flatten)]
    grid: GridArgs,

    #[command(flatten)]
    source: SourceArgs,

    /// Node map file to write
    #[arg(long)]
    json: PathBuf,

    /// Verbose output
    #[arg(long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let nodes = cli::load_nodes_or_exit(&args.source.node_source()).await?;

    let map = pipeline::select_layout(None, &args.grid.grid_options(), &nodes)?;
    map.save(&args.json)?;
    info!(
        "Wrote {} node coordinates to {}",
        map.nodes.len(),
        args.json.display()
    );

    Ok(())
}
