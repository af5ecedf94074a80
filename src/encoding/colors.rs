//! CPU load color scale
//!
//! Load is bucketed into a fixed 10-color palette:
//! - indices 0..=6: `round(6 * cpu)` for cpu <= 1.01, blue (idle) to grey (fully used)
//! - index 7: slightly overloaded (cpu <= 1.06)
//! - index 8: overloaded (cpu <= 2.0)
//! - index 9: heavily overloaded
//!
//! Down nodes and nodes with unknown load are black.

use super::status::JobStatus;

/// Number of blue shades (including the grey "fully loaded" entry)
const NR_BLUES: usize = 7;

/// Upper bound of the blue-to-grey range
pub const FULL_LOAD_MAX: f64 = 1.01;

/// Upper bound of the "slightly overloaded" bucket
pub const SLIGHT_OVERLOAD_MAX: f64 = 1.06;

/// Upper bound of the "overloaded" bucket
pub const OVERLOAD_MAX: f64 = 2.0;

/// CPU load palette, least to most loaded
pub const CPU_PALETTE: [[u8; 3]; 10] = [
    [37, 0, 250],
    [57, 28, 250],
    [79, 52, 250],
    [107, 85, 250],
    [138, 119, 250],
    [164, 150, 250],
    [200, 200, 200], // grey
    [250, 177, 177],
    [250, 93, 93],
    [250, 0, 0],
];

/// Color for down nodes and nodes without a load report
pub const DOWN_COLOR: [u8; 3] = [0, 0, 0];

/// Palette index for a CPU load value
pub fn cpu_color_index(cpu: f64) -> usize {
    if cpu <= FULL_LOAD_MAX {
        // Negative load can't happen on a healthy node; clamp to idle
        ((NR_BLUES - 1) as f64 * cpu).round().max(0.0) as usize
    } else if cpu <= SLIGHT_OVERLOAD_MAX {
        NR_BLUES
    } else if cpu <= OVERLOAD_MAX {
        NR_BLUES + 1
    } else {
        NR_BLUES + 2
    }
}

/// Marker color for a node
pub fn cpu_color(cpu: Option<f64>, status: JobStatus) -> [u8; 3] {
    match cpu {
        Some(cpu) if !status.is_down() && !cpu.is_nan() => CPU_PALETTE[cpu_color_index(cpu)],
        _ => DOWN_COLOR,
    }
}

/// Format an RGB triple as a CSS/plotly color string, `rgb(r,g,b)`
pub fn rgb_string(color: [u8; 3]) -> String {
    format!("rgb({},{},{})", color[0], color[1], color[2])
}
