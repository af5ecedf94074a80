//! Visual encoding of node load
//!
//! - `colors.rs`: CPU load -> marker color
//! - `markers.rs`: memory load -> marker size, job status -> marker symbol
//! - `status.rs`: job/down classification
//! - `load.rs`: per-host plotting record and hover text

pub mod colors;
pub mod load;
pub mod markers;
pub mod status;

pub use colors::{cpu_color, cpu_color_index, rgb_string, CPU_PALETTE, DOWN_COLOR};
pub use load::{hover_text, NodeLoad};
pub use markers::{mem_size, status_symbol, MarkerSymbol};
pub use status::JobStatus;
