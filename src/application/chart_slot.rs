// Chart slot - Owns the single live chart of one surface
use crate::application::chart::{ChartBackend, ChartStyle, ChartWidget};
use crate::application::page::{Page, Surface};
use crate::domain::series::SeriesData;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("chart not ready")]
    NotReady,
    #[error("failed to save {filename}: {source}")]
    Save {
        filename: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    NoChart,
    Live,
    Hidden,
}

/// Lifecycle owner for the chart on one surface.
///
/// The previous widget is always destroyed before a new one is created, so a
/// surface never has two live widgets. Callers never talk to the backend directly.
pub struct ChartSlot {
    surface: Surface,
    backend: Arc<dyn ChartBackend>,
    page: Arc<dyn Page>,
    handle: Option<Box<dyn ChartWidget>>,
    state: SlotState,
    rendered: u64,
    destroyed: u64,
}

impl ChartSlot {
    pub fn new(surface: Surface, backend: Arc<dyn ChartBackend>, page: Arc<dyn Page>) -> Self {
        Self {
            surface,
            backend,
            page,
            handle: None,
            state: SlotState::NoChart,
            rendered: 0,
            destroyed: 0,
        }
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn state(&self) -> SlotState {
        self.state
    }

    pub fn has_chart(&self) -> bool {
        self.handle.is_some()
    }

    /// Number of widgets created over the slot's lifetime
    pub fn rendered(&self) -> u64 {
        self.rendered
    }

    /// Number of widgets destroyed over the slot's lifetime
    pub fn destroyed(&self) -> u64 {
        self.destroyed
    }

    /// Replace the current chart with one built from `series`.
    ///
    /// Precondition: `series.labels` and `series.values` have equal length.
    pub fn render(&mut self, series: &SeriesData, style: &ChartStyle) -> &dyn ChartWidget {
        debug_assert!(
            series.is_consistent(),
            "series for {} has {} labels but {} values",
            self.surface,
            series.labels.len(),
            series.values.len()
        );

        self.destroy_current();
        let widget = self.backend.create(self.surface, series, style);
        self.rendered += 1;
        self.state = SlotState::Live;
        tracing::debug!("Rendered {} with {} points", self.surface, series.len());

        &**self.handle.insert(widget)
    }

    /// Drop the chart and show the "no data" state instead
    pub fn hide_empty(&mut self) {
        self.destroy_current();
        self.page.set_surface_empty(self.surface, true);
        self.page.set_canvas_visible(self.surface, false);
        self.state = SlotState::Hidden;
        tracing::debug!("Surface {} marked empty", self.surface);
    }

    /// Undo `hide_empty`; the next `render` makes the slot live again
    pub fn show_active(&mut self) {
        self.page.set_surface_empty(self.surface, false);
        self.page.set_canvas_visible(self.surface, true);
        if self.state == SlotState::Hidden {
            self.state = SlotState::NoChart;
        }
    }

    /// Download a snapshot of the live chart as `<stem>.<ext>`.
    pub fn export_image(&self, stem: &str) -> Result<String, ExportError> {
        let handle = self.handle.as_ref().ok_or(ExportError::NotReady)?;
        let image = handle.to_image();
        let filename = format!("{}.{}", stem, image.extension);

        self.page
            .download(&filename, &image)
            .map_err(|source| ExportError::Save {
                filename: filename.clone(),
                source,
            })?;

        Ok(filename)
    }

    fn destroy_current(&mut self) {
        if let Some(mut widget) = self.handle.take() {
            widget.destroy();
            self.destroyed += 1;
        }
    }
}

impl Drop for ChartSlot {
    fn drop(&mut self) {
        self.destroy_current();
    }
}
