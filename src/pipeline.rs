//! Shared plot generation pipeline
//!
//! Used by both entry points (`plot-cluster-load-map`, `create-nodemap`).
//!
//! The pipeline:
//! 1. Loads nodes from pbsnodes (or a saved copy of its output)
//! 2. Resolves the node map: from file, or laid out on the enclosure grid
//! 3. Collects one load record per mapped host
//! 4. Builds the scatter figure and writes it

use crate::config::{OutputFormat, PlotConfig};
use crate::encoding::{cpu_color, hover_text, mem_size, rgb_string, status_symbol, NodeLoad};
use crate::figure::{create_annotations, write_figure, Axis, Figure, Layout, Marker, Scatter};
use crate::nodemap::{compute_xy_labels, NodeMap};
use crate::pbs::{run_pbsnodes, Node, PbsnodesParser, Result};
use chrono::Local;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where node status comes from
#[derive(Debug, Clone, PartialEq)]
pub enum NodeSource {
    /// Run this pbsnodes executable
    Command(PathBuf),
    /// Read saved pbsnodes output
    File(PathBuf),
}

impl NodeSource {
    /// `--file` wins over `--pbsnodes` when both are given
    pub fn new(pbsnodes: impl Into<PathBuf>, file: Option<PathBuf>) -> Self {
        match file {
            Some(path) => NodeSource::File(path),
            None => NodeSource::Command(pbsnodes.into()),
        }
    }
}

/// Grid used when no node map file is given
#[derive(Debug, Clone, PartialEq)]
pub struct GridOptions {
    pub partition: String,
    pub enclosures: String,
    pub nr_nodes: usize,
    pub node_offset: usize,
}

/// Output handling for the rendered figure
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOutput {
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub dryrun: bool,
}

/// Load and parse node status
pub async fn load_nodes(source: &NodeSource) -> Result<Vec<Node>> {
    let parser = PbsnodesParser::new();
    let nodes = match source {
        NodeSource::File(path) => {
            info!("Reading pbsnodes output from {}", path.display());
            parser.parse_file(path)?
        }
        NodeSource::Command(pbsnodes) => {
            let output = run_pbsnodes(pbsnodes).await?;
            parser.parse(&output)?
        }
    };
    info!("{} nodes found", nodes.len());
    Ok(nodes)
}

/// Hostnames carrying the partition property, in pbsnodes order
pub fn partition_hostnames<'a>(nodes: &'a [Node], partition: &str) -> Vec<&'a str> {
    nodes
        .iter()
        .filter(|n| n.has_property(partition))
        .map(|n| n.hostname.as_str())
        .collect()
}

/// Use the given node map, or lay the partition's nodes out on the grid
pub fn select_layout(
    node_map: Option<NodeMap>,
    grid: &GridOptions,
    nodes: &[Node],
) -> Result<NodeMap> {
    let map = match node_map {
        Some(map) => map,
        None => {
            let (x_labels, y_labels) =
                compute_xy_labels(grid.node_offset, grid.nr_nodes, &grid.enclosures)?;
            let names = partition_hostnames(nodes, &grid.partition);
            NodeMap::from_grid(x_labels, y_labels, names)?
        }
    };
    map.validate()?;

    info!(
        "{} x-labels, {} y-labels",
        map.x_labels.len(),
        map.y_labels.len()
    );
    info!("{}", names_listing(&map));
    Ok(map)
}

/// `names:` followed by one mapped hostname per line
pub fn names_listing(map: &NodeMap) -> String {
    let mut listing = String::from("names:");
    for hostname in map.hostnames() {
        listing.push('\n');
        listing.push_str(hostname);
    }
    listing
}

/// One load record per mapped host, in hostname order
///
/// A mapped host missing from the pbsnodes output is plotted as down.
pub fn collect_loads(nodes: &[Node], map: &NodeMap) -> Result<Vec<NodeLoad>> {
    let by_name: HashMap<&str, &Node> = nodes.iter().map(|n| (n.hostname.as_str(), n)).collect();

    map.hostnames()
        .map(|hostname| -> Result<NodeLoad> {
            let coordinate = map.coordinate(hostname)?;
            Ok(match by_name.get(hostname) {
                Some(node) => NodeLoad::from_node(node, coordinate),
                None => {
                    warn!("Node {} is in the node map but not in pbsnodes output", hostname);
                    NodeLoad::missing(hostname, coordinate)
                }
            })
        })
        .collect()
}

/// Build the load scatter figure
pub fn build_figure(
    loads: &[NodeLoad],
    map: &NodeMap,
    partition: &str,
    config: &PlotConfig,
) -> Figure {
    let trace = Scatter::markers(
        loads.iter().map(|l| l.coordinate.0).collect(),
        loads.iter().map(|l| l.coordinate.1).collect(),
        Marker {
            color: loads
                .iter()
                .map(|l| rgb_string(cpu_color(l.cpu, l.status)))
                .collect(),
            size: loads.iter().map(|l| mem_size(l.mem, l.status)).collect(),
            symbol: loads.iter().map(|l| status_symbol(l.status)).collect(),
            opacity: config.marker_opacity,
        },
        loads.iter().map(hover_text).collect(),
    );

    let annotations = if config.timestamp_annotation {
        create_annotations(Local::now())
    } else {
        Vec::new()
    };

    Figure {
        data: vec![trace],
        layout: Layout {
            title: config.title_for(partition),
            showlegend: false,
            annotations,
            xaxis: Axis::categorical(&map.x_labels),
            yaxis: Axis::categorical(&map.y_labels),
            width: config.width,
            height: config.height,
            hovermode: "closest",
        },
    }
}

/// `{partition}_cpu_load.{ext}`
pub fn plot_filename(partition: &str, format: OutputFormat) -> String {
    format!("{}_cpu_load.{}", partition, format.extension())
}

/// Write the figure; returns its location, or "dryrun" when nothing is written
pub fn create_plot(figure: &Figure, partition: &str, output: &PlotOutput) -> Result<String> {
    if output.dryrun {
        info!("Dry run, not writing {}", plot_filename(partition, output.format));
        return Ok("dryrun".to_string());
    }

    let path = output.output_dir.join(plot_filename(partition, output.format));
    write_figure(figure, output.format, &path)?;
    info!("Wrote {}", path.display());
    Ok(path.display().to_string())
}

/// Load nodes and build the figure for an existing node map
pub async fn create_map(
    source: &NodeSource,
    node_map: &NodeMap,
    partition: &str,
    config: &PlotConfig,
) -> Result<Figure> {
    let nodes = load_nodes(source).await?;
    let loads = collect_loads(&nodes, node_map)?;
    Ok(build_figure(&loads, node_map, partition, config))
}

/// Convenience for callers holding an optional path
pub fn load_node_map(path: Option<&Path>) -> Result<Option<NodeMap>> {
    path.map(NodeMap::load).transpose()
}
