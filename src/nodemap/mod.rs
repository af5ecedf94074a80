//! Rack/slot coordinates for cluster nodes

pub mod grid;
pub mod map;

pub use grid::{
    compute_coordinates, compute_xy_labels, DEFAULT_ENCLOSURES, DEFAULT_NODE_OFFSET,
    DEFAULT_NR_NODES,
};
pub use map::NodeMap;
