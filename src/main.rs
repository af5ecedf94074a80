//! Cluster load map - main entry point
//!
//! Runs pbsnodes (or reads a saved copy of its output), places every node of
//! the partition on its rack/slot coordinate and writes a scatter plot:
//! color = CPU load, size = memory load, symbol = job/down status.

use clap::Parser;
use cluster_load_map::cli::{self, GridArgs, SourceArgs};
use cluster_load_map::config::{OutputFormat, PlotConfig};
use cluster_load_map::logging;
use cluster_load_map::pipeline::{self, PlotOutput};
use std::path::PathBuf;
use tracing::{debug, info};

/// Create a heatmap of CPU load
#[derive(Debug, Parser)]
#[command(name = "plot-cluster-load-map", version)]
struct Args {
    #[command(flatten)]
    grid: GridArgs,

    #[command(flatten)]
    source: SourceArgs,

    /// Plot properties file (JSON object)
    #[arg(long)]
    conf: Option<PathBuf>,

    /// Node map file to use
    #[arg(long = "node_map")]
    node_map: Option<PathBuf>,

    /// Directory the plot is written to
    #[arg(long = "output_dir", default_value = ".")]
    output_dir: PathBuf,

    /// Output format; overrides output.format from --conf
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long)]
    verbose: bool,

    /// Do not create plot
    #[arg(long)]
    dryrun: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = PlotConfig::load(args.conf.as_deref())?;
    debug!("Plot configuration: {:?}", config);

    let node_map = pipeline::load_node_map(args.node_map.as_deref())?;

    let nodes = cli::load_nodes_or_exit(&args.source.node_source()).await?;

    let map = pipeline::select_layout(node_map, &args.grid.grid_options(), &nodes)?;
    let loads = pipeline::collect_loads(&nodes, &map)?;
    info!("Plotting {} nodes", loads.len());

    let figure = pipeline::build_figure(&loads, &map, &args.grid.partition, &config);
    let output = PlotOutput {
        output_dir: args.output_dir,
        format: args.format.unwrap_or(config.output_format),
        dryrun: args.dryrun,
    };
    let url = pipeline::create_plot(&figure, &args.grid.partition, &output)?;
    println!("URL: {}", url);

    Ok(())
}
