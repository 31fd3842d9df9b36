//! Minimal SVG charts for the report commands.
//!
//! Each chart is rendered to a self-contained SVG string; [`write_svg`] puts it
//! on disk. Only bars, lines and scatter points are supported.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const LEFT: f64 = 80.0;
const RIGHT: f64 = 30.0;
const TOP: f64 = 50.0;
/// Leaves room for rotated category labels under bar charts.
const BOTTOM: f64 = 110.0;
const TICKS: usize = 5;

const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Title and axis labels shared by every chart kind.
#[derive(Debug, Clone, Copy)]
pub struct Axes<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Dot,
    /// Drawn larger, for centroids and other reference points.
    Cross,
}

#[derive(Debug, Clone)]
pub struct ScatterGroup {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub marker: Marker,
}

/// Linear map from a data range onto a pixel range.
#[derive(Debug, Clone, Copy)]
struct Scale {
    min: f64,
    max: f64,
    from_px: f64,
    to_px: f64,
}

impl Scale {
    fn new(min: f64, max: f64, from_px: f64, to_px: f64) -> Self {
        let (min, max) = if max - min > f64::EPSILON {
            (min, max)
        } else {
            let pad = if min.abs() > 0.0 { min.abs() * 0.1 } else { 1.0 };
            (min - pad, max + pad)
        };
        Self {
            min,
            max,
            from_px,
            to_px,
        }
    }

    /// Data extent padded by 5% on both sides.
    fn padded(values: impl Iterator<Item = f64> + Clone, from_px: f64, to_px: f64) -> Self {
        let min = values.clone().fold(f64::INFINITY, f64::min);
        let max = values.fold(f64::NEG_INFINITY, f64::max);
        if !min.is_finite() || !max.is_finite() {
            return Self::new(0.0, 1.0, from_px, to_px);
        }
        let pad = (max - min) * 0.05;
        Self::new(min - pad, max + pad, from_px, to_px)
    }

    fn map(&self, value: f64) -> f64 {
        self.from_px + (value - self.min) / (self.max - self.min) * (self.to_px - self.from_px)
    }

    fn ticks(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=TICKS).map(|i| self.min + (self.max - self.min) * i as f64 / TICKS as f64)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn tick_label(value: f64) -> String {
    if value.abs() >= 1000.0 || (value.fract() == 0.0 && value.abs() >= 10.0) {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn open(axes: &Axes) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
    );
    svg.push_str(&format!(r#"<rect width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#));
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="28" text-anchor="middle" font-size="18">{}</text>"#,
        WIDTH / 2.0,
        escape(axes.title)
    ));
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="13">{}</text>"#,
        LEFT + (WIDTH - LEFT - RIGHT) / 2.0,
        HEIGHT - 12.0,
        escape(axes.x_label)
    ));
    svg.push_str(&format!(
        r#"<text x="18" y="{y:.1}" text-anchor="middle" font-size="13" transform="rotate(-90 18 {y:.1})">{}</text>"#,
        escape(axes.y_label),
        y = TOP + (HEIGHT - TOP - BOTTOM) / 2.0,
    ));
    svg.push_str(&format!(
        r#"<line x1="{LEFT}" y1="{bottom}" x2="{right}" y2="{bottom}" stroke="black"/><line x1="{LEFT}" y1="{TOP}" x2="{LEFT}" y2="{bottom}" stroke="black"/>"#,
        bottom = HEIGHT - BOTTOM,
        right = WIDTH - RIGHT,
    ));
    svg
}

fn y_axis(svg: &mut String, y: &Scale) {
    for tick in y.ticks() {
        let py = y.map(tick);
        svg.push_str(&format!(
            r##"<line x1="{LEFT}" y1="{py:.1}" x2="{:.1}" y2="{py:.1}" stroke="#e0e0e0"/><text x="{:.1}" y="{:.1}" text-anchor="end" font-size="11">{}</text>"##,
            WIDTH - RIGHT,
            LEFT - 6.0,
            py + 4.0,
            tick_label(tick)
        ));
    }
}

fn x_axis(svg: &mut String, x: &Scale) {
    for tick in x.ticks() {
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11">{}</text>"#,
            x.map(tick),
            HEIGHT - BOTTOM + 18.0,
            tick_label(tick)
        ));
    }
}

fn no_data(mut svg: String) -> String {
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="14">No data</text></svg>"#,
        WIDTH / 2.0,
        HEIGHT / 2.0
    ));
    svg
}

/// One bar per category, in the given order.
pub fn bar_chart(axes: &Axes, bars: &[(String, f64)]) -> String {
    let mut svg = open(axes);
    let values: Vec<f64> = bars.iter().map(|(_, v)| *v).filter(|v| v.is_finite()).collect();
    if values.is_empty() {
        return no_data(svg);
    }

    let lo = values.iter().copied().fold(0.0, f64::min);
    let hi = values.iter().copied().fold(0.0, f64::max);
    let y = Scale::new(lo, hi * 1.05, HEIGHT - BOTTOM, TOP);
    y_axis(&mut svg, &y);

    let slot = (WIDTH - LEFT - RIGHT) / bars.len() as f64;
    let zero = y.map(0.0);
    for (i, (label, value)) in bars.iter().enumerate() {
        let x = LEFT + slot * i as f64 + slot * 0.1;
        let top = y.map(*value);
        let label_x = x + slot * 0.4;
        let label_y = HEIGHT - BOTTOM + 14.0;
        svg.push_str(&format!(
            r#"<rect x="{x:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{}: {value:.2}</title></rect>"#,
            top.min(zero),
            slot * 0.8,
            (zero - top).abs(),
            PALETTE[0],
            escape(label)
        ));
        svg.push_str(&format!(
            r#"<text x="{label_x:.1}" y="{label_y:.1}" text-anchor="end" font-size="10" transform="rotate(-40 {label_x:.1} {label_y:.1})">{}</text>"#,
            escape(label)
        ));
    }

    svg.push_str("</svg>");
    svg
}

/// A polyline through `points` with a marker at each point.
pub fn line_chart(axes: &Axes, points: &[(f64, f64)]) -> String {
    let mut svg = open(axes);
    let points: Vec<(f64, f64)> = points
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    if points.is_empty() {
        return no_data(svg);
    }

    let x = Scale::padded(points.iter().map(|p| p.0), LEFT, WIDTH - RIGHT);
    let y = Scale::padded(points.iter().map(|p| p.1), HEIGHT - BOTTOM, TOP);
    y_axis(&mut svg, &y);
    x_axis(&mut svg, &x);

    let path: Vec<String> = points
        .iter()
        .map(|(px, py)| format!("{:.1},{:.1}", x.map(*px), y.map(*py)))
        .collect();
    svg.push_str(&format!(
        r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
        path.join(" "),
        PALETTE[0]
    ));
    for (px, py) in &points {
        svg.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="3.5" fill="{}"/>"#,
            x.map(*px),
            y.map(*py),
            PALETTE[0]
        ));
    }

    svg.push_str("</svg>");
    svg
}

/// Colored point groups with a legend.
pub fn scatter_chart(axes: &Axes, groups: &[ScatterGroup]) -> String {
    let mut svg = open(axes);
    let all = groups
        .iter()
        .flat_map(|g| g.points.iter().copied())
        .filter(|(x, y)| x.is_finite() && y.is_finite());
    if all.clone().next().is_none() {
        return no_data(svg);
    }

    let x = Scale::padded(all.clone().map(|p| p.0), LEFT, WIDTH - RIGHT);
    let y = Scale::padded(all.map(|p| p.1), HEIGHT - BOTTOM, TOP);
    y_axis(&mut svg, &y);
    x_axis(&mut svg, &x);

    for (i, group) in groups.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        for &(px, py) in group.points.iter().filter(|(a, b)| a.is_finite() && b.is_finite()) {
            let (cx, cy) = (x.map(px), y.map(py));
            match group.marker {
                Marker::Dot => svg.push_str(&format!(
                    r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="4" fill="{color}" fill-opacity="0.7"/>"#
                )),
                Marker::Cross => svg.push_str(&format!(
                    r#"<path d="M{:.1},{:.1} L{:.1},{:.1} M{:.1},{:.1} L{:.1},{:.1}" stroke="black" stroke-width="3"/>"#,
                    cx - 7.0,
                    cy - 7.0,
                    cx + 7.0,
                    cy + 7.0,
                    cx - 7.0,
                    cy + 7.0,
                    cx + 7.0,
                    cy - 7.0
                )),
            }
        }

        let ly = TOP + 16.0 * i as f64;
        let lx = WIDTH - RIGHT - 170.0;
        svg.push_str(&format!(
            r#"<rect x="{lx:.1}" y="{:.1}" width="10" height="10" fill="{}"/><text x="{:.1}" y="{ly:.1}" font-size="11">{}</text>"#,
            ly - 9.0,
            if group.marker == Marker::Cross { "black" } else { color },
            lx + 14.0,
            escape(&group.label)
        ));
    }

    svg.push_str("</svg>");
    svg
}

/// Writes `svg` to `dir/name`, creating `dir` if needed.
pub fn write_svg(dir: &Path, name: &str, svg: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create chart directory {}", dir.display()))?;
    let path = dir.join(name);
    fs::write(&path, svg).with_context(|| format!("Failed to write chart {}", path.display()))?;
    tracing::info!(path = %path.display(), "Chart written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AXES: Axes<'static> = Axes {
        title: "Price & Rating",
        x_label: "x",
        y_label: "y",
    };

    #[test]
    fn test_bar_chart_draws_one_rect_per_bar() {
        let bars = vec![("A".to_string(), 3.0), ("B<1>".to_string(), 5.0)];
        let svg = bar_chart(&AXES, &bars);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        // The background plus two bars.
        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(svg.contains("Price &amp; Rating"));
        assert!(svg.contains("B&lt;1&gt;"));
    }

    #[test]
    fn test_line_chart_handles_a_single_point() {
        let svg = line_chart(&AXES, &[(1.0, 2.0)]);
        assert!(!svg.contains("NaN"));
        assert_eq!(svg.matches("<circle").count(), 1);
    }

    #[test]
    fn test_empty_charts_say_no_data() {
        assert!(bar_chart(&AXES, &[]).contains("No data"));
        assert!(line_chart(&AXES, &[]).contains("No data"));
        assert!(scatter_chart(&AXES, &[]).contains("No data"));
    }

    #[test]
    fn test_scatter_chart_draws_markers_and_legend() {
        let groups = vec![
            ScatterGroup {
                label: "Cluster 0".to_string(),
                points: vec![(1.0, 1.0), (2.0, 2.0)],
                marker: Marker::Dot,
            },
            ScatterGroup {
                label: "Centroids".to_string(),
                points: vec![(1.5, 1.5)],
                marker: Marker::Cross,
            },
        ];
        let svg = scatter_chart(&AXES, &groups);
        assert_eq!(svg.matches("<circle").count(), 2);
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(svg.contains("Cluster 0"));
        assert!(svg.contains("Centroids"));
    }

    #[test]
    fn test_write_svg_creates_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let nested = dir.path().join("charts");
        let path = write_svg(&nested, "elbow.svg", "<svg></svg>").expect("writable");
        assert_eq!(fs::read_to_string(path).expect("readable"), "<svg></svg>");
    }
}
