//! Plot configuration from plot properties
//!
//! All default values come from plot_defaults.json via `PropertyReader`;
//! no hardcoded fallbacks here.

use crate::properties::PropertyReader;
use std::fmt;
use std::path::Path;

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Rendered SVG image
    #[default]
    Svg,
    /// Plotly figure JSON (data + layout)
    Json,
}

impl OutputFormat {
    /// Parse from string value
    ///
    /// Validation happens in PropertyReader::get_enum()
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Svg,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Figure width in pixels
    pub width: i32,

    /// Figure height in pixels
    pub height: i32,

    /// Title override; None means "<partition> load"
    pub title: Option<String>,

    pub output_format: OutputFormat,

    /// Add the "generated at" footer annotation
    pub timestamp_annotation: bool,

    pub marker_opacity: f64,
}

impl PlotConfig {
    pub fn from_properties(props: &PropertyReader) -> Self {
        Self {
            width: props.get_i32_in_range("plot.width", 100, 10_000),
            height: props.get_i32_in_range("plot.height", 100, 10_000),
            title: props.get_optional_string("plot.title"),
            output_format: OutputFormat::parse(&props.get_enum("output.format")),
            timestamp_annotation: props.get_bool("annotation.timestamp"),
            marker_opacity: props.get_f64_in_range("marker.opacity", 0.0, 1.0),
        }
    }

    /// Load from an optional properties file; defaults only when None
    pub fn load(path: Option<&Path>) -> crate::pbs::Result<Self> {
        let props = match path {
            Some(path) => PropertyReader::from_json_file(path)?,
            None => PropertyReader::default(),
        };
        Ok(Self::from_properties(&props))
    }

    /// Figure title for a partition
    pub fn title_for(&self, partition: &str) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("{} load", partition))
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self::from_properties(&PropertyReader::default())
    }
}
