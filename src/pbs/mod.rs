//! Node status source
//!
//! Runs the PBS/Torque `pbsnodes` command and turns its output into
//! `Node` records.
//!
//! Structure:
//! - `command.rs`: pbsnodes invocation
//! - `parser.rs`: text output parser
//! - `node.rs`: node model and derived loads
//! - `error.rs`: error types shared by the whole crate

pub mod command;
pub mod error;
pub mod node;
pub mod parser;

pub use command::{run_pbsnodes, DEFAULT_PBSNODES};
pub use error::{LoadMapError, Result};
pub use node::Node;
pub use parser::PbsnodesParser;
