use super::model::Annotation;
use chrono::{DateTime, Local};

/// Footer annotations for a figure
///
/// Currently a single "generated" timestamp below the bottom-right corner
/// of the plot area.
pub fn create_annotations(now: DateTime<Local>) -> Vec<Annotation> {
    vec![Annotation {
        text: format!("generated {}", now.format("%Y-%m-%d %H:%M:%S")),
        x: 1.0,
        y: -0.08,
        xref: "paper",
        yref: "paper",
        xanchor: "right",
        showarrow: false,
    }]
}
