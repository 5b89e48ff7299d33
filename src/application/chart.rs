// Chart widget collaborators - Factory, live widget and per-chart styling
use crate::application::page::Surface;
use crate::domain::series::SeriesData;
use bytes::Bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

/// Axis carrying the category labels. `Y` gives horizontal bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexAxis {
    X,
    Y,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub kind: ChartKind,
    pub index_axis: IndexAxis,
    pub dataset_label: &'static str,
    pub color: &'static str,
    pub fill: Option<&'static str>,
    pub tension: f32,
    pub show_legend: bool,
    pub maintain_aspect_ratio: bool,
    pub tick_font_size: Option<u8>,
    pub auto_skip_labels: bool,
}

impl ChartStyle {
    fn base(kind: ChartKind, color: &'static str) -> Self {
        Self {
            kind,
            index_axis: IndexAxis::X,
            dataset_label: "Downloads",
            color,
            fill: None,
            tension: 0.0,
            show_legend: false,
            maintain_aspect_ratio: true,
            tick_font_size: None,
            auto_skip_labels: true,
        }
    }

    /// Horizontal bars with every template name listed
    fn template_bars(color: &'static str) -> Self {
        Self {
            index_axis: IndexAxis::Y,
            maintain_aspect_ratio: false,
            tick_font_size: Some(10),
            auto_skip_labels: false,
            ..Self::base(ChartKind::Bar, color)
        }
    }

    pub fn total_downloads() -> Self {
        Self {
            fill: Some("rgba(96,165,250,0.12)"),
            tension: 0.3,
            ..Self::base(ChartKind::Line, "#60a5fa")
        }
    }

    pub fn templates() -> Self {
        Self::template_bars("#34d399")
    }

    pub fn templates_range() -> Self {
        Self::template_bars("#f9a8d4")
    }

    pub fn weekdays() -> Self {
        Self::base(ChartKind::Bar, "#fca5a5")
    }
}

/// Snapshot of a rendered chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartImage {
    pub mime: &'static str,
    pub extension: &'static str,
    pub bytes: Bytes,
}

/// One live chart bound to one surface
pub trait ChartWidget: Send {
    fn destroy(&mut self);
    fn to_image(&self) -> ChartImage;
}

/// Charting library entry point. Only `ChartSlot` calls this.
pub trait ChartBackend: Send + Sync {
    fn create(&self, surface: Surface, series: &SeriesData, style: &ChartStyle) -> Box<dyn ChartWidget>;
}
