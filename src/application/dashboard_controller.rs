// Dashboard controller - Startup sequencing and UI event wiring
use crate::application::analytics_api::{AnalyticsApi, FetchError};
use crate::application::chart::{ChartBackend, ChartStyle};
use crate::application::chart_slot::{ChartSlot, ExportError};
use crate::application::page::{Element, Page, SelectorOptions, Surface};
use crate::application::range_selection::{RangeCompletion, RangeSelectionController};
use crate::domain::series::SeriesData;
use chrono::NaiveDate;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, Stream, StreamExt};
use futures::FutureExt;
use std::sync::Arc;

const NOT_READY: &str = "Chart not ready";

/// Messages emitted by the page controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Range picker selection with zero, one or two dates
    RangeChanged(Vec<NaiveDate>),
    ClearRange,
    /// Raw value of the item-count selector
    ItemCountChanged(String),
    Export(Surface),
}

#[derive(Debug)]
enum Completion {
    Total(Result<SeriesData, FetchError>),
    Templates {
        generation: u64,
        top_n: usize,
        result: Result<SeriesData, FetchError>,
    },
    Weekdays(Result<SeriesData, FetchError>),
    Range(RangeCompletion),
}

/// Owns every slot and the range controller; all state changes go through here.
pub struct DashboardController {
    api: Arc<dyn AnalyticsApi>,
    page: Arc<dyn Page>,
    total: ChartSlot,
    templates: ChartSlot,
    weekdays: ChartSlot,
    range: RangeSelectionController,
    selector: SelectorOptions,
    top_n: usize,
    templates_generation: u64,
    pending: FuturesUnordered<BoxFuture<'static, Completion>>,
}

impl DashboardController {
    pub fn new(
        api: Arc<dyn AnalyticsApi>,
        page: Arc<dyn Page>,
        backend: Arc<dyn ChartBackend>,
        selector: SelectorOptions,
    ) -> Self {
        let slot = |surface| ChartSlot::new(surface, backend.clone(), page.clone());
        let range = RangeSelectionController::new(
            slot(Surface::TemplatesRange),
            page.clone(),
            api.clone(),
        );

        Self {
            total: slot(Surface::Total),
            templates: slot(Surface::Templates),
            weekdays: slot(Surface::Weekdays),
            range,
            top_n: selector.selected,
            selector,
            templates_generation: 0,
            pending: FuturesUnordered::new(),
            api,
            page,
        }
    }

    pub fn slot(&self, surface: Surface) -> &ChartSlot {
        match surface {
            Surface::Total => &self.total,
            Surface::Templates => &self.templates,
            Surface::TemplatesRange => self.range.slot(),
            Surface::Weekdays => &self.weekdays,
        }
    }

    pub fn range(&self) -> &RangeSelectionController {
        &self.range
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Number of fetches issued by event handlers that have not been applied yet
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Load the summary first, then the three unconditional charts concurrently.
    ///
    /// Startup failures are logged only so one broken chart does not block the page.
    pub async fn boot(&mut self) {
        self.page.init_item_selector(&self.selector);
        self.load_summary().await;

        let mut startup: FuturesUnordered<BoxFuture<'static, Completion>> = FuturesUnordered::new();
        startup.push(self.fetch_total());
        startup.push(self.fetch_templates());
        startup.push(self.fetch_weekdays());

        while let Some(completion) = startup.next().await {
            self.apply(completion);
        }

        tracing::info!("Dashboard ready");
    }

    /// Dispatch one UI event. Fetches it starts are applied by `settle` or `run`.
    pub fn handle(&mut self, event: UiEvent) {
        tracing::debug!("UI event: {:?}", event);

        match event {
            UiEvent::RangeChanged(dates) => {
                for fetch in self.range.on_range_chosen(&dates) {
                    self.pending.push(fetch.map(Completion::Range).boxed());
                }
            }
            UiEvent::ClearRange => self.range.clear(),
            UiEvent::ItemCountChanged(value) => {
                self.top_n = parse_top_n(&value, self.selector.selected);
                let fetch = self.fetch_templates();
                self.pending.push(fetch);
            }
            UiEvent::Export(surface) => self.export(surface),
        }
    }

    /// Apply every outstanding fetch, in completion order
    pub async fn settle(&mut self) {
        while let Some(completion) = self.pending.next().await {
            self.apply(completion);
        }
    }

    /// Event loop: interleave UI events with fetch completions until the event
    /// stream ends, then let outstanding fetches land.
    pub async fn run<S>(&mut self, mut events: S)
    where
        S: Stream<Item = UiEvent> + Unpin,
    {
        loop {
            tokio::select! {
                event = events.next() => match event {
                    Some(event) => self.handle(event),
                    None => break,
                },
                Some(completion) = self.pending.next(), if !self.pending.is_empty() => {
                    self.apply(completion);
                }
            }
        }

        self.settle().await;
    }

    async fn load_summary(&mut self) {
        match self.api.summary(None).await {
            Ok(metrics) => {
                self.page.set_text(Element::AllTime, &metrics.all_time.to_string());
                self.page.set_text(Element::Last7Days, &metrics.last_7_days.to_string());
                self.page.set_text(Element::Last1Day, &metrics.last_1_day.to_string());
                self.range.reset();
            }
            Err(e) => tracing::error!("Summary load failed: {}", e),
        }
    }

    fn export(&self, surface: Surface) {
        match self.slot(surface).export_image(surface.export_stem()) {
            Ok(filename) => tracing::info!("Exported {} as {}", surface, filename),
            Err(ExportError::NotReady) => {
                tracing::warn!("Export of {} requested before it rendered", surface);
                self.page.alert(NOT_READY);
            }
            Err(e) => {
                tracing::error!("Export of {} failed: {}", surface, e);
                self.page.alert(&e.to_string());
            }
        }
    }

    fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Total(Ok(series)) => {
                self.total.render(&series, &ChartStyle::total_downloads());
            }
            Completion::Templates {
                generation,
                top_n,
                result,
            } => {
                if generation != self.templates_generation {
                    tracing::debug!("Discarding stale template list (generation {})", generation);
                    return;
                }
                match result {
                    Ok(series) => {
                        self.templates
                            .render(&series.top_n(top_n), &ChartStyle::templates());
                    }
                    Err(e) => tracing::error!("Template chart failed: {}", e),
                }
            }
            Completion::Weekdays(Ok(series)) => {
                self.weekdays.render(&series, &ChartStyle::weekdays());
            }
            Completion::Total(Err(e)) | Completion::Weekdays(Err(e)) => {
                tracing::error!("Chart load failed: {}", e);
            }
            Completion::Range(completion) => self.range.complete(completion),
        }
    }

    fn fetch_total(&self) -> BoxFuture<'static, Completion> {
        let api = self.api.clone();
        async move { Completion::Total(api.total_downloads().await) }.boxed()
    }

    /// Always a full re-fetch; the previous list is never reused
    fn fetch_templates(&mut self) -> BoxFuture<'static, Completion> {
        self.templates_generation += 1;
        let generation = self.templates_generation;
        let top_n = self.top_n;
        let api = self.api.clone();
        async move {
            Completion::Templates {
                generation,
                top_n,
                result: api.downloads_by_template().await,
            }
        }
        .boxed()
    }

    fn fetch_weekdays(&self) -> BoxFuture<'static, Completion> {
        let api = self.api.clone();
        async move { Completion::Weekdays(api.best_weekdays().await) }.boxed()
    }
}

/// Selector value as a count; unparsable or zero values fall back to `default`
pub fn parse_top_n(value: &str, default: usize) -> usize {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .unwrap_or(default)
}
