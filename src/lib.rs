//! Cluster load map library
//!
//! Core modules shared by the `plot-cluster-load-map` and `create-nodemap`
//! binaries.

pub mod cli;
pub mod config;
pub mod encoding;
pub mod figure;
pub mod logging;
pub mod nodemap;
pub mod pbs;
pub mod pipeline;
pub mod properties;
