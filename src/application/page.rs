// Page collaborators - Display elements and user notices the controllers write to
use crate::application::chart::ChartImage;
use std::fmt;

/// Text boxes of the summary row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    AllTime,
    Last7Days,
    Last1Day,
    CustomRange,
}

/// Display regions that each hold at most one chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Total,
    Templates,
    TemplatesRange,
    Weekdays,
}

impl Surface {
    pub fn name(&self) -> &'static str {
        match self {
            Surface::Total => "chartTotal",
            Surface::Templates => "chartTemplates",
            Surface::TemplatesRange => "chartTemplatesRange",
            Surface::Weekdays => "chartWeekdays",
        }
    }

    /// Fixed download name (without extension) used by the export buttons
    pub fn export_stem(&self) -> &'static str {
        match self {
            Surface::Total => "total_downloads",
            Surface::Templates => "templates",
            Surface::TemplatesRange => "templates_range",
            Surface::Weekdays => "weekdays",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Initial state of the item-count multi-select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOptions {
    pub choices: Vec<usize>,
    pub selected: usize,
    pub searchable: bool,
    pub sorted: bool,
    pub placeholder: bool,
}

impl SelectorOptions {
    pub fn new(choices: Vec<usize>, selected: usize) -> Self {
        Self {
            choices,
            selected,
            searchable: false,
            sorted: false,
            placeholder: false,
        }
    }
}

/// Everything the controllers touch outside of chart widgets.
pub trait Page: Send + Sync {
    fn set_text(&self, element: Element, text: &str);

    /// Show or hide the "clear range" button
    fn set_clear_visible(&self, visible: bool);

    /// Toggle the "no data" flag on the container around `surface`
    fn set_surface_empty(&self, surface: Surface, empty: bool);

    /// Reveal or conceal the drawing area of `surface`
    fn set_canvas_visible(&self, surface: Surface, visible: bool);

    /// Programmatic reset of the range picker. Does not emit a selection event.
    fn clear_picker(&self);

    fn init_item_selector(&self, options: &SelectorOptions);

    /// Blocking notice for user-initiated actions
    fn alert(&self, message: &str);

    /// Hand a chart snapshot to the user as a file download
    fn download(&self, filename: &str, image: &ChartImage) -> std::io::Result<()>;
}
