// Range selection - Custom date range summary and the conditional template chart
use crate::application::analytics_api::{AnalyticsApi, FetchError};
use crate::application::chart::ChartStyle;
use crate::application::chart_slot::ChartSlot;
use crate::application::page::{Element, Page};
use crate::domain::metrics::{SummaryMetrics, PLACEHOLDER};
use crate::domain::range::DateRange;
use crate::domain::series::SeriesData;
use chrono::NaiveDate;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;

const SUMMARY_FAILED: &str = "Failed to fetch range";
const SERIES_FAILED: &str = "Failed to fetch custom range template data.";

/// Side effects requested by a range state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeEffect {
    SetClearVisible(bool),
    ResetCustomRange,
    ClearPicker,
    HideChart,
    Fetch { range: DateRange, generation: u64 },
}

/// Pure selection state.
///
/// Every complete selection, clear and reset starts a new generation. Responses
/// tagged with an older generation are stale and must be dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeState {
    range: Option<DateRange>,
    generation: u64,
}

impl RangeState {
    pub fn range(&self) -> Option<DateRange> {
        self.range
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Picker emitted a selection with zero, one or two dates
    pub fn choose(&mut self, dates: &[NaiveDate]) -> Vec<RangeEffect> {
        let Some(range) = DateRange::from_selection(dates) else {
            return vec![RangeEffect::SetClearVisible(false)];
        };

        self.range = Some(range);
        self.generation += 1;
        vec![
            RangeEffect::SetClearVisible(true),
            RangeEffect::Fetch {
                range,
                generation: self.generation,
            },
        ]
    }

    /// User pressed "clear"
    pub fn clear(&mut self) -> Vec<RangeEffect> {
        self.range = None;
        self.generation += 1;
        vec![
            RangeEffect::ClearPicker,
            RangeEffect::ResetCustomRange,
            RangeEffect::HideChart,
            RangeEffect::SetClearVisible(false),
        ]
    }

    /// A fresh summary load wipes the selection UI but leaves the chart alone
    pub fn reset(&mut self) -> Vec<RangeEffect> {
        self.range = None;
        self.generation += 1;
        vec![
            RangeEffect::ClearPicker,
            RangeEffect::ResetCustomRange,
            RangeEffect::SetClearVisible(false),
        ]
    }
}

#[derive(Debug)]
pub enum RangeUpdate {
    Summary(Result<SummaryMetrics, FetchError>),
    Series(Result<SeriesData, FetchError>),
}

/// Outcome of one range-scoped fetch, tagged with the generation that issued it
#[derive(Debug)]
pub struct RangeCompletion {
    pub generation: u64,
    pub range: DateRange,
    pub update: RangeUpdate,
}

pub type RangeFetch = BoxFuture<'static, RangeCompletion>;

pub struct RangeSelectionController {
    state: RangeState,
    slot: ChartSlot,
    page: Arc<dyn Page>,
    api: Arc<dyn AnalyticsApi>,
}

impl RangeSelectionController {
    pub fn new(slot: ChartSlot, page: Arc<dyn Page>, api: Arc<dyn AnalyticsApi>) -> Self {
        Self {
            state: RangeState::default(),
            slot,
            page,
            api,
        }
    }

    pub fn state(&self) -> &RangeState {
        &self.state
    }

    pub fn slot(&self) -> &ChartSlot {
        &self.slot
    }

    /// Returns the two independent fetches for a complete selection, none otherwise.
    pub fn on_range_chosen(&mut self, dates: &[NaiveDate]) -> Vec<RangeFetch> {
        let effects = self.state.choose(dates);
        self.apply(effects)
    }

    pub fn clear(&mut self) {
        let effects = self.state.clear();
        self.apply(effects);
        tracing::debug!("Range cleared (generation {})", self.state.generation());
    }

    pub fn reset(&mut self) {
        let effects = self.state.reset();
        self.apply(effects);
    }

    /// Apply a finished fetch to its own display element. Stale results are dropped.
    pub fn complete(&mut self, completion: RangeCompletion) {
        let RangeCompletion {
            generation,
            range,
            update,
        } = completion;

        if !self.state.is_current(generation) {
            if let RangeUpdate::Summary(Err(e)) | RangeUpdate::Series(Err(e)) = &update {
                tracing::warn!("Stale range fetch for {} failed: {}", range, e);
            }
            tracing::debug!(
                "Discarding stale response for {} (generation {}, current {})",
                range,
                generation,
                self.state.generation()
            );
            return;
        }

        match update {
            RangeUpdate::Summary(Ok(metrics)) => {
                self.page
                    .set_text(Element::CustomRange, &metrics.custom_range_text());
            }
            RangeUpdate::Summary(Err(e)) => {
                tracing::error!("Range summary for {} failed: {}", range, e);
                self.page.alert(SUMMARY_FAILED);
            }
            RangeUpdate::Series(Ok(series)) if series.is_empty() => {
                tracing::info!("No template downloads in {}", range);
                self.slot.hide_empty();
            }
            RangeUpdate::Series(Ok(series)) => {
                self.slot.show_active();
                self.slot.render(&series, &ChartStyle::templates_range());
            }
            RangeUpdate::Series(Err(e)) => {
                tracing::error!("Range templates for {} failed: {}", range, e);
                self.page.alert(SERIES_FAILED);
            }
        }
    }

    fn apply(&mut self, effects: Vec<RangeEffect>) -> Vec<RangeFetch> {
        let mut fetches = Vec::new();

        for effect in effects {
            match effect {
                RangeEffect::SetClearVisible(visible) => self.page.set_clear_visible(visible),
                RangeEffect::ResetCustomRange => self.page.set_text(Element::CustomRange, PLACEHOLDER),
                RangeEffect::ClearPicker => self.page.clear_picker(),
                RangeEffect::HideChart => self.slot.hide_empty(),
                RangeEffect::Fetch { range, generation } => {
                    tracing::debug!("Fetching range {} (generation {})", range, generation);
                    fetches.push(self.fetch_summary(range, generation));
                    fetches.push(self.fetch_series(range, generation));
                }
            }
        }

        fetches
    }

    fn fetch_summary(&self, range: DateRange, generation: u64) -> RangeFetch {
        let api = self.api.clone();
        async move {
            let update = RangeUpdate::Summary(api.summary(Some(range)).await);
            RangeCompletion {
                generation,
                range,
                update,
            }
        }
        .boxed()
    }

    fn fetch_series(&self, range: DateRange, generation: u64) -> RangeFetch {
        let api = self.api.clone();
        async move {
            let update = RangeUpdate::Series(api.downloads_by_template_range(range).await);
            RangeCompletion {
                generation,
                range,
                update,
            }
        }
        .boxed()
    }
}
