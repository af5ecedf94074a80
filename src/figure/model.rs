//! Figure model in plotly's JSON schema
//!
//! Serializes to `{"data": [...], "layout": {...}}`, which plotly.js and the
//! plotly Python client accept as-is. The SVG renderer reads the same model.

use crate::encoding::MarkerSymbol;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Scatter>,
    pub layout: Layout,
}

impl Figure {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Scatter trace, one marker per node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scatter {
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub x: Vec<u32>,
    pub y: Vec<u32>,
    pub mode: &'static str,
    pub marker: Marker,
    /// Hover text, plotly HTML subset (`<b>`, `<br>`)
    pub text: Vec<String>,
}

impl Scatter {
    pub fn markers(x: Vec<u32>, y: Vec<u32>, marker: Marker, text: Vec<String>) -> Self {
        Scatter {
            trace_type: "scatter",
            x,
            y,
            mode: "markers",
            marker,
            text,
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Per-point marker styling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// `rgb(r,g,b)` strings
    pub color: Vec<String>,
    /// Diameters in px
    pub size: Vec<f64>,
    pub symbol: Vec<MarkerSymbol>,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    pub showlegend: bool,
    pub annotations: Vec<Annotation>,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub width: i32,
    pub height: i32,
    pub hovermode: &'static str,
}

/// Categorical axis drawn as integer positions 1..=n with text ticks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub autotick: bool,
    pub tickmode: &'static str,
    pub tickvals: Vec<u32>,
    pub ticktext: Vec<String>,
    pub range: [f64; 2],
    pub zeroline: bool,
}

impl Axis {
    /// Ticks at 1..=labels.len(), with half a cell of padding on both ends
    pub fn categorical(labels: &[String]) -> Self {
        let n = labels.len() as u32;
        Axis {
            autotick: false,
            tickmode: "array",
            tickvals: (1..=n).collect(),
            ticktext: labels.to_vec(),
            range: [0.5, n as f64 + 0.5],
            zeroline: false,
        }
    }
}

/// Free text placed in paper coordinates (0..1 spans the plot area)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub xref: &'static str,
    pub yref: &'static str,
    pub xanchor: &'static str,
    pub showarrow: bool,
}
