//! Standalone SVG rendering of a `Figure`
//!
//! Draws the categorical grid, tick labels, title, annotations and one
//! marker per point. Hover text becomes an SVG `<title>` tooltip.

use super::model::{Annotation, Axis, Figure, Scatter};
use crate::encoding::MarkerSymbol;
use std::fmt::Write;

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_TOP: f64 = 70.0;
const MARGIN_BOTTOM: f64 = 90.0;

const FONT: &str = "font-family=\"Open Sans, Arial, sans-serif\"";

/// Pixel geometry of the plot area
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x_range: [f64; 2],
    y_range: [f64; 2],
}

impl PlotArea {
    fn new(width: i32, height: i32, xaxis: &Axis, yaxis: &Axis) -> Self {
        PlotArea {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: (width as f64 - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (height as f64 - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
            x_range: xaxis.range,
            y_range: yaxis.range,
        }
    }

    fn x_px(&self, x: f64) -> f64 {
        let [lo, hi] = self.x_range;
        self.left + (x - lo) / (hi - lo) * self.width
    }

    /// y grows upwards, as in plotly
    fn y_px(&self, y: f64) -> f64 {
        let [lo, hi] = self.y_range;
        self.top + self.height - (y - lo) / (hi - lo) * self.height
    }

    fn paper_x(&self, x: f64) -> f64 {
        self.left + x * self.width
    }

    fn paper_y(&self, y: f64) -> f64 {
        self.top + (1.0 - y) * self.height
    }
}

/// Render a figure to an SVG document
pub fn render_svg(figure: &Figure) -> String {
    let layout = &figure.layout;
    let area = PlotArea::new(layout.width, layout.height, &layout.xaxis, &layout.yaxis);
    let mut svg = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = layout.width,
        h = layout.height
    );
    let _ = writeln!(
        svg,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
        layout.width, layout.height
    );

    render_axes(&mut svg, &area, &layout.xaxis, &layout.yaxis);

    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="17" {}>{}</text>"#,
        layout.width as f64 / 2.0,
        MARGIN_TOP / 2.0,
        FONT,
        escape_xml(&layout.title)
    );

    for trace in &figure.data {
        render_trace(&mut svg, &area, trace);
    }

    for annotation in &layout.annotations {
        render_annotation(&mut svg, &area, annotation);
    }

    svg.push_str("</svg>\n");
    svg
}

fn render_axes(svg: &mut String, area: &PlotArea, xaxis: &Axis, yaxis: &Axis) {
    svg.push_str("<g class=\"grid\" stroke=\"#eeeeee\" stroke-width=\"1\">\n");
    for &x in &xaxis.tickvals {
        let px = area.x_px(x as f64);
        let _ = writeln!(
            svg,
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"/>"#,
            px,
            area.top,
            px,
            area.top + area.height
        );
    }
    for &y in &yaxis.tickvals {
        let py = area.y_px(y as f64);
        let _ = writeln!(
            svg,
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"/>"#,
            area.left,
            py,
            area.left + area.width,
            py
        );
    }
    svg.push_str("</g>\n");

    svg.push_str("<g class=\"ticks\" font-size=\"12\" fill=\"#444444\">\n");
    for (&x, label) in xaxis.tickvals.iter().zip(&xaxis.ticktext) {
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" {}>{}</text>"#,
            area.x_px(x as f64),
            area.top + area.height + 18.0,
            FONT,
            escape_xml(label)
        );
    }
    for (&y, label) in yaxis.tickvals.iter().zip(&yaxis.ticktext) {
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" dominant-baseline="middle" {}>{}</text>"#,
            area.left - 8.0,
            area.y_px(y as f64),
            FONT,
            escape_xml(label)
        );
    }
    svg.push_str("</g>\n");
}

fn render_trace(svg: &mut String, area: &PlotArea, trace: &Scatter) {
    let _ = writeln!(
        svg,
        "<g class=\"markers\" opacity=\"{}\">",
        trace.marker.opacity
    );
    for i in 0..trace.len() {
        let cx = area.x_px(trace.x[i] as f64);
        let cy = area.y_px(trace.y[i] as f64);
        let size = trace.marker.size.get(i).copied().unwrap_or(10.0);
        let color = trace
            .marker
            .color
            .get(i)
            .map(String::as_str)
            .unwrap_or("rgb(0,0,0)");
        let symbol = trace
            .marker
            .symbol
            .get(i)
            .copied()
            .unwrap_or(MarkerSymbol::Circle);

        let _ = write!(
            svg,
            "<g class=\"node {}\">{}",
            symbol.as_str(),
            marker_shape(symbol, cx, cy, size, color)
        );
        if let Some(text) = trace.text.get(i) {
            let _ = write!(svg, "<title>{}</title>", escape_xml(&hover_plain_text(text)));
        }
        svg.push_str("</g>\n");
    }
    svg.push_str("</g>\n");
}

fn render_annotation(svg: &mut String, area: &PlotArea, annotation: &Annotation) {
    let anchor = match annotation.xanchor {
        "left" => "start",
        "right" => "end",
        _ => "middle",
    };
    let _ = writeln!(
        svg,
        r##"<text x="{:.1}" y="{:.1}" text-anchor="{}" font-size="11" fill="#777777" {}>{}</text>"##,
        area.paper_x(annotation.x),
        area.paper_y(annotation.y),
        anchor,
        FONT,
        escape_xml(&annotation.text)
    );
}

/// SVG element for a marker of diameter `size` centered on (cx, cy)
fn marker_shape(symbol: MarkerSymbol, cx: f64, cy: f64, size: f64, color: &str) -> String {
    let r = size / 2.0;
    match symbol {
        MarkerSymbol::Circle => {
            format!(r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="{color}"/>"#)
        }
        MarkerSymbol::Square => format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            cx - r,
            cy - r,
            size,
            size,
            color
        ),
        MarkerSymbol::Diamond => polygon(
            &[(0.0, -r), (r, 0.0), (0.0, r), (-r, 0.0)],
            cx,
            cy,
            color,
        ),
        MarkerSymbol::Cross => {
            // Plus sign with arms a third of the marker wide
            let a = size / 6.0;
            polygon(
                &[
                    (-a, -r),
                    (a, -r),
                    (a, -a),
                    (r, -a),
                    (r, a),
                    (a, a),
                    (a, r),
                    (-a, r),
                    (-a, a),
                    (-r, a),
                    (-r, -a),
                    (-a, -a),
                ],
                cx,
                cy,
                color,
            )
        }
    }
}

fn polygon(offsets: &[(f64, f64)], cx: f64, cy: f64, color: &str) -> String {
    let points: Vec<String> = offsets
        .iter()
        .map(|(dx, dy)| format!("{:.1},{:.1}", cx + dx, cy + dy))
        .collect();
    format!(r#"<polygon points="{}" fill="{}"/>"#, points.join(" "), color)
}

/// Plotly hover HTML to plain tooltip text
fn hover_plain_text(text: &str) -> String {
    text.replace("<br>", "\n")
        .replace("<b>", "")
        .replace("</b>", "")
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::model::{Layout, Marker};

    fn figure() -> Figure {
        let x_labels = vec!["n01".to_string(), "n02".to_string()];
        let y_labels = vec!["r1i0".to_string()];
        Figure {
            data: vec![Scatter::markers(
                vec![1, 2],
                vec![1, 1],
                Marker {
                    color: vec!["rgb(37,0,250)".to_string(), "rgb(0,0,0)".to_string()],
                    size: vec![25.0, 10.0],
                    symbol: vec![MarkerSymbol::Square, MarkerSymbol::Cross],
                    opacity: 1.0,
                },
                vec![
                    "<b>r1i0n1</b><br>CPU: 0.00<br>MEM: 0.50<br>JOB: 1.master".to_string(),
                    "<b>r1i0n2</b> DOWN".to_string(),
                ],
            )],
            layout: Layout {
                title: "thinking load".to_string(),
                showlegend: false,
                annotations: Vec::new(),
                xaxis: Axis::categorical(&x_labels),
                yaxis: Axis::categorical(&y_labels),
                width: 950,
                height: 800,
                hovermode: "closest",
            },
        }
    }

    #[test]
    fn test_render_svg_elements() {
        let svg = render_svg(&figure());
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("thinking load"));
        assert!(svg.contains(">n01</text>"));
        assert!(svg.contains(">r1i0</text>"));
        assert_eq!(svg.matches("<rect x=").count(), 2); // background + square marker
        assert_eq!(svg.matches("<polygon").count(), 1); // cross marker
        assert!(svg.contains("<g class=\"node square\">"));
        assert!(svg.contains("<g class=\"node cross\">"));
        assert!(svg.contains("<title>r1i0n2 DOWN</title>"));
        assert!(svg.contains("<title>r1i0n1\nCPU: 0.00\nMEM: 0.50\nJOB: 1.master</title>"));
    }

    #[test]
    fn test_plot_area_mapping() {
        let fig = figure();
        let area = PlotArea::new(950, 800, &fig.layout.xaxis, &fig.layout.yaxis);
        // 2 columns over [0.5, 2.5]: centers at 1/4 and 3/4 of the width
        assert!((area.x_px(1.0) - (MARGIN_LEFT + area.width * 0.25)).abs() < 1e-9);
        assert!((area.x_px(2.0) - (MARGIN_LEFT + area.width * 0.75)).abs() < 1e-9);
        // Single row sits in the vertical middle
        assert!((area.y_px(1.0) - (MARGIN_TOP + area.height / 2.0)).abs() < 1e-9);
        // Paper y=1 is the top edge
        assert!((area.paper_y(1.0) - MARGIN_TOP).abs() < 1e-9);
    }

    #[test]
    fn test_marker_shapes() {
        assert!(marker_shape(MarkerSymbol::Circle, 10.0, 10.0, 20.0, "red").starts_with("<circle"));
        assert!(marker_shape(MarkerSymbol::Square, 10.0, 10.0, 20.0, "red")
            .contains(r#"x="0.0" y="0.0" width="20.0""#));
        let diamond = marker_shape(MarkerSymbol::Diamond, 10.0, 10.0, 20.0, "red");
        assert!(diamond.contains("10.0,0.0 20.0,10.0 10.0,20.0 0.0,10.0"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
    }
}
