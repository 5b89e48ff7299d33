// Terminal page - Prints display updates and saves downloads to disk
use crate::application::chart::ChartImage;
use crate::application::page::{Element, Page, SelectorOptions, Surface};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct TerminalPage {
    export_dir: PathBuf,
}

impl TerminalPage {
    pub fn new(export_dir: PathBuf) -> Self {
        Self { export_dir }
    }
}

fn label(element: Element) -> &'static str {
    match element {
        Element::AllTime => "All time",
        Element::Last7Days => "Last 7 days",
        Element::Last1Day => "Last day",
        Element::CustomRange => "Custom range",
    }
}

impl Page for TerminalPage {
    fn set_text(&self, element: Element, text: &str) {
        println!("{:>12}: {}", label(element), text);
    }

    fn set_clear_visible(&self, visible: bool) {
        tracing::debug!("Clear button {}", if visible { "shown" } else { "hidden" });
    }

    fn set_surface_empty(&self, surface: Surface, empty: bool) {
        if empty {
            println!("== {}: no data in range", surface);
        }
    }

    fn set_canvas_visible(&self, surface: Surface, visible: bool) {
        tracing::trace!("Canvas {} visible={}", surface, visible);
    }

    fn clear_picker(&self) {
        tracing::debug!("Range picker cleared");
    }

    fn init_item_selector(&self, options: &SelectorOptions) {
        let choices: Vec<String> = options.choices.iter().map(|c| c.to_string()).collect();
        println!("Top templates: {} (choices: {})", options.selected, choices.join(", "));
    }

    fn alert(&self, message: &str) {
        eprintln!("!! {}", message);
    }

    fn download(&self, filename: &str, image: &ChartImage) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.export_dir)?;
        let path = self.export_dir.join(filename);
        std::fs::write(&path, &image.bytes)?;
        println!("Saved {} ({} bytes, {})", path.display(), image.bytes.len(), image.mime);
        Ok(())
    }
}
