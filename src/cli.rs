//! Command-line arguments shared by both binaries

use crate::nodemap::{DEFAULT_ENCLOSURES, DEFAULT_NODE_OFFSET, DEFAULT_NR_NODES};
use crate::pbs::{LoadMapError, Node, Result, DEFAULT_PBSNODES};
use crate::pipeline::{self, GridOptions, NodeSource};
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

/// Printed on stderr before exiting with status 1
pub const PBSNODES_ERROR: &str = "### error: could not execute pbsnodes";

/// Partition and grid layout
#[derive(Debug, Clone, Args)]
pub struct GridArgs {
    /// Cluster partition to visualize
    #[arg(long, default_value = "thinking")]
    pub partition: String,

    /// Comma-separated list of enclosures
    #[arg(long, default_value = DEFAULT_ENCLOSURES)]
    pub enclosures: String,

    /// Number of nodes per enclosure (IRU)
    #[arg(long = "nr_nodes", default_value_t = DEFAULT_NR_NODES)]
    pub nr_nodes: usize,

    /// Number of the first node slot
    #[arg(long = "node_offset", default_value_t = DEFAULT_NODE_OFFSET)]
    pub node_offset: usize,
}

impl GridArgs {
    pub fn grid_options(&self) -> GridOptions {
        GridOptions {
            partition: self.partition.clone(),
            enclosures: self.enclosures.clone(),
            nr_nodes: self.nr_nodes,
            node_offset: self.node_offset,
        }
    }
}

/// Where pbsnodes output comes from
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// pbsnodes command to use
    #[arg(long, default_value = DEFAULT_PBSNODES)]
    pub pbsnodes: PathBuf,

    /// File with saved pbsnodes output (skips running pbsnodes)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl SourceArgs {
    pub fn node_source(&self) -> NodeSource {
        NodeSource::new(self.pbsnodes.clone(), self.file.clone())
    }
}

/// Load nodes; exit with status 1 when pbsnodes cannot be executed
///
/// Every other error is returned to the caller.
pub async fn load_nodes_or_exit(source: &NodeSource) -> Result<Vec<Node>> {
    match pipeline::load_nodes(source).await {
        Err(LoadMapError::CommandFailed { command, reason }) => {
            debug!("{}: {}", command.display(), reason);
            eprintln!("{}", PBSNODES_ERROR);
            std::process::exit(1);
        }
        result => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        grid: GridArgs,
        #[command(flatten)]
        source: SourceArgs,
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::parse_from(["test"]);
        assert_eq!(cli.grid.partition, "thinking");
        assert_eq!(cli.grid.nr_nodes, 16);
        assert_eq!(cli.grid.node_offset, 1);
        assert_eq!(cli.grid.enclosures, DEFAULT_ENCLOSURES);
        assert_eq!(
            cli.source.node_source(),
            NodeSource::Command(PathBuf::from(DEFAULT_PBSNODES))
        );
    }

    #[test]
    fn test_underscore_flags() {
        let cli = TestCli::parse_from([
            "test",
            "--nr_nodes",
            "8",
            "--node_offset",
            "0",
            "--enclosures",
            "a,b",
            "--file",
            "nodes.txt",
        ]);
        let grid = cli.grid.grid_options();
        assert_eq!(grid.nr_nodes, 8);
        assert_eq!(grid.node_offset, 0);
        assert_eq!(grid.enclosures, "a,b");
        assert_eq!(
            cli.source.node_source(),
            NodeSource::File(PathBuf::from("nodes.txt"))
        );
    }
}
