//! Scatter-plot figure: model, annotations and output writers
//!
//! - `model.rs`: plotly-compatible figure model
//! - `svg.rs`: standalone SVG renderer
//! - `annotations.rs`: footer annotations

pub mod annotations;
pub mod model;
pub mod svg;

pub use annotations::create_annotations;
pub use model::{Annotation, Axis, Figure, Layout, Marker, Scatter};
pub use svg::render_svg;

use crate::config::OutputFormat;
use crate::pbs::Result;
use std::path::Path;

/// Serialize a figure in the requested format
pub fn encode_figure(figure: &Figure, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Svg => Ok(render_svg(figure)),
        OutputFormat::Json => Ok(figure.to_json()?),
    }
}

/// Write a figure to `path` in the requested format
pub fn write_figure(figure: &Figure, format: OutputFormat, path: impl AsRef<Path>) -> Result<()> {
    let contents = encode_figure(figure, format)?;
    std::fs::write(path, contents)?;
    Ok(())
}
