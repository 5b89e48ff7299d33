// SVG chart backend - Renders chart snapshots without a browser
use crate::application::chart::{ChartBackend, ChartImage, ChartKind, ChartStyle, ChartWidget, IndexAxis};
use crate::application::page::Surface;
use crate::domain::series::SeriesData;
use bytes::Bytes;
use std::fmt::Write;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 400.0;
const MARGIN: f64 = 40.0;
const PREVIEW_ROWS: usize = 10;
const PREVIEW_WIDTH: f64 = 40.0;

/// Builds SVG documents; optionally prints a text preview of each chart.
#[derive(Debug, Clone, Default)]
pub struct SvgChartBackend {
    preview: bool,
}

impl SvgChartBackend {
    pub fn new(preview: bool) -> Self {
        Self { preview }
    }
}

impl ChartBackend for SvgChartBackend {
    fn create(&self, surface: Surface, series: &SeriesData, style: &ChartStyle) -> Box<dyn ChartWidget> {
        if self.preview {
            println!("{}", text_preview(surface, series));
        }
        Box::new(SvgChart {
            surface,
            document: Some(Bytes::from(render_svg(series, style))),
        })
    }
}

pub struct SvgChart {
    surface: Surface,
    document: Option<Bytes>,
}

impl ChartWidget for SvgChart {
    fn destroy(&mut self) {
        tracing::trace!("Destroying SVG chart on {}", self.surface);
        self.document = None;
    }

    fn to_image(&self) -> ChartImage {
        ChartImage {
            mime: "image/svg+xml",
            extension: "svg",
            bytes: self.document.clone().unwrap_or_default(),
        }
    }
}

pub fn render_svg(series: &SeriesData, style: &ChartStyle) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = WIDTH,
        h = HEIGHT
    );
    let _ = writeln!(svg, "<title>{}</title>", escape(style.dataset_label));

    let max = series.max_value().max(1.0);
    let plot_w = WIDTH - 2.0 * MARGIN;
    let plot_h = HEIGHT - 2.0 * MARGIN;
    let n = series.len().max(1) as f64;

    match (style.kind, style.index_axis) {
        (ChartKind::Line, _) => {
            let points: Vec<String> = series
                .values
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let x = MARGIN + plot_w * i as f64 / (n - 1.0).max(1.0);
                    let y = MARGIN + plot_h * (1.0 - v / max);
                    format!("{:.1},{:.1}", x, y)
                })
                .collect();

            if let (Some(fill), Some(first), Some(last)) = (style.fill, points.first(), points.last()) {
                let base = MARGIN + plot_h;
                let first_x = first.split(',').next().unwrap_or_default();
                let last_x = last.split(',').next().unwrap_or_default();
                let _ = writeln!(
                    svg,
                    r#"<polygon fill="{}" stroke="none" points="{},{:.1} {} {},{:.1}"/>"#,
                    fill,
                    first_x,
                    base,
                    points.join(" "),
                    last_x,
                    base
                );
            }
            let _ = writeln!(
                svg,
                r#"<polyline fill="none" stroke="{}" stroke-width="2" points="{}"/>"#,
                style.color,
                points.join(" ")
            );
        }
        (ChartKind::Bar, IndexAxis::X) => {
            let slot = plot_w / n;
            for (i, (label, v)) in series.labels.iter().zip(&series.values).enumerate() {
                let h = plot_h * v / max;
                let x = MARGIN + slot * i as f64 + slot * 0.1;
                let _ = writeln!(
                    svg,
                    r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{}: {}</title></rect>"#,
                    x,
                    MARGIN + plot_h - h,
                    slot * 0.8,
                    h,
                    style.color,
                    escape(label),
                    v
                );
            }
        }
        (ChartKind::Bar, IndexAxis::Y) => {
            let slot = plot_h / n;
            let font = style.tick_font_size.unwrap_or(12);
            for (i, (label, v)) in series.labels.iter().zip(&series.values).enumerate() {
                let y = MARGIN + slot * i as f64;
                let _ = writeln!(
                    svg,
                    r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                    MARGIN,
                    y + slot * 0.1,
                    plot_w * v / max,
                    slot * 0.8,
                    style.color
                );
                let _ = writeln!(
                    svg,
                    r#"<text x="{:.1}" y="{:.1}" font-size="{}">{}</text>"#,
                    MARGIN + 2.0,
                    y + slot * 0.7,
                    font,
                    escape(label)
                );
            }
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Horizontal text bars for the first rows of a series
pub fn text_preview(surface: Surface, series: &SeriesData) -> String {
    let mut out = format!("== {} ({} entries)", surface, series.len());
    let max = series.max_value().max(1.0);
    let label_width = series
        .labels
        .iter()
        .take(PREVIEW_ROWS)
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);

    for (label, v) in series.labels.iter().zip(&series.values).take(PREVIEW_ROWS) {
        let bar = "█".repeat((PREVIEW_WIDTH * v / max).round() as usize);
        let _ = write!(out, "\n{:<width$} {} {}", label, bar, v, width = label_width);
    }
    if series.len() > PREVIEW_ROWS {
        let _ = write!(out, "\n… {} more", series.len() - PREVIEW_ROWS);
    }
    out
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
