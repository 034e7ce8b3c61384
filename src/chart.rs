//! Chart surface for filter sweeps.
//!
//! A chart is an owned handle: the caller keeps at most one alive, and a new
//! analysis goes through [`replace_chart`], which destroys the previous chart
//! before the renderer creates its replacement. Nothing here keeps a chart in
//! shared state.
//!
//! [`SvgRenderer`] is the built-in renderer. It draws a single line series on
//! linear axes and exports the chart as a standalone SVG document.

use std::fmt::{self, Write};

use crate::error::{LabError, Result};
use crate::filters::FrequencySweep;
use crate::units::format_si;

/// X axis title.
pub const FREQUENCY_AXIS_LABEL: &str = "Frequency (Hz)";

/// Y axis title.
pub const MAGNITUDE_AXIS_LABEL: &str = "|H(jω)|";

/// Default file name for an exported chart.
pub const DEFAULT_EXPORT_FILE: &str = "filter-response.svg";

/// A 2-D line-chart renderer with destroy-and-recreate semantics.
pub trait ChartRenderer {
    /// Handle to a live chart.
    type Chart;

    /// Create a chart for a sweep.
    fn create(&mut self, sweep: &FrequencySweep) -> Self::Chart;

    /// Release a chart.
    fn destroy(&mut self, chart: Self::Chart);

    /// Export a chart as image bytes.
    fn export_image(&self, chart: &Self::Chart) -> Result<Vec<u8>>;
}

/// Destroy `previous` (if any), then create a chart for `sweep`.
pub fn replace_chart<R: ChartRenderer>(
    renderer: &mut R,
    previous: Option<R::Chart>,
    sweep: &FrequencySweep,
) -> R::Chart {
    if let Some(chart) = previous {
        renderer.destroy(chart);
    }
    renderer.create(sweep)
}

/// Export the current chart, failing if no filter has been analyzed yet.
pub fn export_chart<R: ChartRenderer>(renderer: &R, current: Option<&R::Chart>) -> Result<Vec<u8>> {
    let chart = current.ok_or(LabError::NoChart)?;
    renderer.export_image(chart)
}

/// Layout of the SVG chart.
#[derive(Debug, Clone)]
pub struct SvgLayout {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    /// Maximum number of x axis tick labels
    pub max_x_ticks: usize,
    pub stroke_width: f64,
}

impl Default for SvgLayout {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 400.0,
            margin: 60.0,
            max_x_ticks: 7,
            stroke_width: 2.0,
        }
    }
}

/// A chart rendered to SVG.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgChart {
    id: u64,
    document: String,
}

impl SvgChart {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The SVG document.
    pub fn document(&self) -> &str {
        &self.document
    }
}

/// Renders sweeps to standalone SVG documents.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    layout: SvgLayout,
    next_id: u64,
    live: usize,
}

impl SvgRenderer {
    /// Create a renderer with the default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with a custom layout.
    pub fn with_layout(layout: SvgLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Number of charts created and not yet destroyed.
    pub fn live_charts(&self) -> usize {
        self.live
    }

    fn render(&self, sweep: &FrequencySweep) -> String {
        let mut svg = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_svg(&mut svg, sweep);
        svg
    }

    /// Write the SVG document for `sweep` into `out`.
    pub fn write_svg<W: Write>(&self, out: &mut W, sweep: &FrequencySweep) -> fmt::Result {
        let SvgLayout {
            width,
            height,
            margin,
            max_x_ticks,
            stroke_width,
        } = self.layout;

        let points = sweep.points();
        let plot_w = width - 2.0 * margin;
        let plot_h = height - 2.0 * margin;

        let (x_min, x_max) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(x, _)| {
                (lo.min(x), hi.max(x))
            });
        let (x_min, x_max) = if points.is_empty() || x_max <= x_min {
            (0.0, 1.0)
        } else {
            (x_min, x_max)
        };
        let y_max = points.iter().map(|&(_, y)| y).fold(1.0_f64, f64::max);

        let sx = |x: f64| margin + (x - x_min) / (x_max - x_min) * plot_w;
        let sy = |y: f64| margin + plot_h - (y / y_max) * plot_h;

        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        )?;
        writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)?;

        // Axes
        writeln!(
            out,
            r#"<line x1="{x0}" y1="{y0}" x2="{x1}" y2="{y0}" stroke="black"/>"#,
            x0 = margin,
            x1 = margin + plot_w,
            y0 = margin + plot_h
        )?;
        writeln!(
            out,
            r#"<line x1="{x0}" y1="{y0}" x2="{x0}" y2="{y1}" stroke="black"/>"#,
            x0 = margin,
            y0 = margin,
            y1 = margin + plot_h
        )?;

        // X ticks
        let ticks = max_x_ticks.max(2);
        for i in 0..ticks {
            let value = x_min + (x_max - x_min) * i as f64 / (ticks - 1) as f64;
            writeln!(
                out,
                r#"<text x="{x:.1}" y="{y:.1}" font-size="10" text-anchor="middle">{label}</text>"#,
                x = sx(value),
                y = margin + plot_h + 15.0,
                label = format_si(value)
            )?;
        }

        // Y ticks
        let y_ticks = 5;
        for i in 0..=y_ticks {
            let value = y_max * i as f64 / y_ticks as f64;
            writeln!(
                out,
                r#"<text x="{x:.1}" y="{y:.1}" font-size="10" text-anchor="end">{value:.2}</text>"#,
                x = margin - 6.0,
                y = sy(value) + 3.0,
                value = value
            )?;
        }

        // Axis titles and legend
        writeln!(
            out,
            r#"<text x="{x:.1}" y="{y:.1}" font-size="12" text-anchor="middle">{title}</text>"#,
            x = margin + plot_w / 2.0,
            y = height - 15.0,
            title = escape_xml(FREQUENCY_AXIS_LABEL)
        )?;
        writeln!(
            out,
            r#"<text x="15" y="{y:.1}" font-size="12" text-anchor="middle" transform="rotate(-90 15 {y:.1})">{title}</text>"#,
            y = margin + plot_h / 2.0,
            title = escape_xml(MAGNITUDE_AXIS_LABEL)
        )?;
        writeln!(
            out,
            r#"<text x="{x:.1}" y="{y:.1}" font-size="10" text-anchor="middle">{label}</text>"#,
            x = margin + plot_w / 2.0,
            y = margin - 20.0,
            label = escape_xml(&sweep.label)
        )?;

        // Series
        let polyline: Vec<String> = points
            .iter()
            .map(|&(x, y)| format!("{:.2},{:.2}", sx(x), sy(y)))
            .collect();
        writeln!(
            out,
            r#"<polyline fill="none" stroke="steelblue" stroke-width="{stroke_width}" points="{points}"/>"#,
            stroke_width = stroke_width,
            points = polyline.join(" ")
        )?;
        writeln!(out, "</svg>")
    }
}

impl ChartRenderer for SvgRenderer {
    type Chart = SvgChart;

    fn create(&mut self, sweep: &FrequencySweep) -> SvgChart {
        let chart = SvgChart {
            id: self.next_id,
            document: self.render(sweep),
        };
        self.next_id += 1;
        self.live += 1;
        chart
    }

    fn destroy(&mut self, chart: SvgChart) {
        drop(chart);
        self.live = self.live.saturating_sub(1);
    }

    fn export_image(&self, chart: &SvgChart) -> Result<Vec<u8>> {
        Ok(chart.document.clone().into_bytes())
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{analyze_filter, FilterCircuit, FilterKind, SweepConfig};

    fn sweep(kind: FilterKind) -> FrequencySweep {
        analyze_filter(&FilterCircuit::default_for(kind), &SweepConfig::default())
            .unwrap()
            .sweep
    }

    #[test]
    fn test_replace_destroys_previous_chart() {
        let mut renderer = SvgRenderer::new();

        let first = replace_chart(&mut renderer, None, &sweep(FilterKind::LowPass));
        assert_eq!(renderer.live_charts(), 1);

        let second = replace_chart(&mut renderer, Some(first), &sweep(FilterKind::HighPass));
        assert_eq!(renderer.live_charts(), 1);
        assert_eq!(second.id(), 1);
        assert!(second.document().contains("High-Pass |H(jω)|"));
    }

    #[test]
    fn test_export_without_chart_fails() {
        let renderer = SvgRenderer::new();
        let err = export_chart(&renderer, None).unwrap_err();
        assert!(matches!(err, LabError::NoChart));
        assert_eq!(
            err.to_string(),
            "Please analyze a filter first to generate a graph."
        );
    }

    #[test]
    fn test_export_produces_svg_with_all_points() {
        let mut renderer = SvgRenderer::new();
        let chart = replace_chart(&mut renderer, None, &sweep(FilterKind::BandPass));
        let bytes = export_chart(&renderer, Some(&chart)).unwrap();
        let svg = String::from_utf8(bytes).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(FREQUENCY_AXIS_LABEL));
        assert!(svg.contains(MAGNITUDE_AXIS_LABEL));

        let points = svg
            .lines()
            .find(|l| l.starts_with("<polyline"))
            .map(|l| l.matches(',').count())
            .unwrap();
        assert_eq!(points, 81);
    }

    struct FullWriter;

    impl Write for FullWriter {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_write_svg_matches_document_and_propagates_errors() {
        let mut renderer = SvgRenderer::new();
        let sweep = sweep(FilterKind::LowPass);
        let chart = replace_chart(&mut renderer, None, &sweep);

        let mut out = String::new();
        renderer.write_svg(&mut out, &sweep).unwrap();
        assert_eq!(out, chart.document());

        assert!(renderer.write_svg(&mut FullWriter, &sweep).is_err());
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b & c>d"), "a&lt;b &amp; c&gt;d");
    }
}
