#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use template_downloads_dashboard::application::analytics_api::{
    AnalyticsApi, FetchCause, FetchError, BEST_WEEKDAYS, DOWNLOADS_BY_TEMPLATE,
    DOWNLOADS_BY_TEMPLATE_RANGE, SUMMARY, TOTAL_DOWNLOADS,
};
use template_downloads_dashboard::application::chart::{
    ChartBackend, ChartImage, ChartStyle, ChartWidget,
};
use template_downloads_dashboard::application::dashboard_controller::DashboardController;
use template_downloads_dashboard::application::page::{Element, Page, SelectorOptions, Surface};
use template_downloads_dashboard::domain::metrics::SummaryMetrics;
use template_downloads_dashboard::domain::range::{parse_date, DateRange};
use template_downloads_dashboard::domain::series::SeriesData;

pub fn date(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

pub fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(date(start), date(end))
}

pub fn series(pairs: &[(&str, f64)]) -> SeriesData {
    SeriesData::new(
        pairs.iter().map(|(l, _)| l.to_string()).collect(),
        pairs.iter().map(|(_, v)| *v).collect(),
    )
}

/// Twenty templates sorted by descending downloads: template-00 has 200
pub fn twenty_templates() -> SeriesData {
    let labels = (0..20).map(|i| format!("template-{:02}", i)).collect();
    let values = (0..20).map(|i| (200 - i * 10) as f64).collect();
    SeriesData::new(labels, values)
}

pub fn weekdays() -> SeriesData {
    series(&[
        ("Monday", 9.0),
        ("Tuesday", 4.0),
        ("Wednesday", 6.0),
        ("Thursday", 2.0),
        ("Friday", 8.0),
        ("Saturday", 1.0),
        ("Sunday", 0.0),
    ])
}

/// In-memory analytics API with per-resource failure switches
#[derive(Default)]
pub struct FakeApi {
    pub summary: Mutex<SummaryMetrics>,
    pub range_totals: Mutex<HashMap<DateRange, u64>>,
    pub total: Mutex<SeriesData>,
    pub templates: Mutex<SeriesData>,
    pub range_series: Mutex<HashMap<DateRange, SeriesData>>,
    pub weekdays: Mutex<SeriesData>,
    pub failing: Mutex<HashSet<&'static str>>,
    pub calls: Mutex<Vec<&'static str>>,
    /// (waiting resource, resource whose call releases it, signal)
    pub gates: Mutex<Vec<(&'static str, &'static str, Arc<Notify>)>>,
}

impl FakeApi {
    pub fn standard() -> Self {
        let api = Self::default();
        *api.summary.lock().unwrap() = SummaryMetrics {
            all_time: 120,
            last_7_days: 15,
            last_1_day: 2,
            custom_range: None,
        };
        *api.total.lock().unwrap() = series(&[("2024-01-01", 3.0), ("2024-01-02", 5.0)]);
        *api.templates.lock().unwrap() = twenty_templates();
        *api.weekdays.lock().unwrap() = weekdays();
        api
    }

    pub fn fail(&self, resource: &'static str) {
        self.failing.lock().unwrap().insert(resource);
    }

    /// Hold calls to `waiter` until `opener` has been called
    pub fn gate(&self, waiter: &'static str, opener: &'static str) {
        self.gates
            .lock()
            .unwrap()
            .push((waiter, opener, Arc::new(Notify::new())));
    }

    pub fn calls_to(&self, resource: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == resource).count()
    }

    async fn call(&self, resource: &'static str) -> Result<(), FetchError> {
        self.calls.lock().unwrap().push(resource);

        let waits: Vec<Arc<Notify>> = {
            let gates = self.gates.lock().unwrap();
            for (_, opener, signal) in gates.iter() {
                if *opener == resource {
                    signal.notify_one();
                }
            }
            gates
                .iter()
                .filter(|(waiter, _, _)| *waiter == resource)
                .map(|(_, _, signal)| signal.clone())
                .collect()
        };
        for signal in waits {
            signal.notified().await;
        }

        if self.failing.lock().unwrap().contains(resource) {
            return Err(FetchError::new(resource, FetchCause::Status(500)));
        }
        Ok(())
    }
}

#[async_trait]
impl AnalyticsApi for FakeApi {
    async fn summary(&self, range: Option<DateRange>) -> Result<SummaryMetrics, FetchError> {
        self.call(SUMMARY).await?;
        let mut metrics = self.summary.lock().unwrap().clone();
        metrics.custom_range = range.and_then(|r| self.range_totals.lock().unwrap().get(&r).copied());
        Ok(metrics)
    }

    async fn total_downloads(&self) -> Result<SeriesData, FetchError> {
        self.call(TOTAL_DOWNLOADS).await?;
        Ok(self.total.lock().unwrap().clone())
    }

    async fn downloads_by_template(&self) -> Result<SeriesData, FetchError> {
        self.call(DOWNLOADS_BY_TEMPLATE).await?;
        Ok(self.templates.lock().unwrap().clone())
    }

    async fn downloads_by_template_range(&self, range: DateRange) -> Result<SeriesData, FetchError> {
        self.call(DOWNLOADS_BY_TEMPLATE_RANGE).await?;
        Ok(self
            .range_series
            .lock()
            .unwrap()
            .get(&range)
            .cloned()
            .unwrap_or_default())
    }

    async fn best_weekdays(&self) -> Result<SeriesData, FetchError> {
        self.call(BEST_WEEKDAYS).await?;
        Ok(self.weekdays.lock().unwrap().clone())
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PageState {
    pub texts: HashMap<Element, String>,
    pub clear_visible: bool,
    pub empty: HashSet<Surface>,
    pub hidden_canvas: HashSet<Surface>,
    pub picker_clears: usize,
    pub selector: Option<SelectorOptions>,
    pub alerts: Vec<String>,
    pub downloads: Vec<(String, Bytes)>,
}

#[derive(Default)]
pub struct RecordingPage {
    pub state: Mutex<PageState>,
    pub fail_downloads: Mutex<bool>,
}

impl RecordingPage {
    pub fn snapshot(&self) -> PageState {
        self.state.lock().unwrap().clone()
    }

    pub fn text(&self, element: Element) -> Option<String> {
        self.state.lock().unwrap().texts.get(&element).cloned()
    }
}

impl Page for RecordingPage {
    fn set_text(&self, element: Element, text: &str) {
        self.state.lock().unwrap().texts.insert(element, text.to_string());
    }

    fn set_clear_visible(&self, visible: bool) {
        self.state.lock().unwrap().clear_visible = visible;
    }

    fn set_surface_empty(&self, surface: Surface, empty: bool) {
        let mut state = self.state.lock().unwrap();
        if empty {
            state.empty.insert(surface);
        } else {
            state.empty.remove(&surface);
        }
    }

    fn set_canvas_visible(&self, surface: Surface, visible: bool) {
        let mut state = self.state.lock().unwrap();
        if visible {
            state.hidden_canvas.remove(&surface);
        } else {
            state.hidden_canvas.insert(surface);
        }
    }

    fn clear_picker(&self) {
        self.state.lock().unwrap().picker_clears += 1;
    }

    fn init_item_selector(&self, options: &SelectorOptions) {
        self.state.lock().unwrap().selector = Some(options.clone());
    }

    fn alert(&self, message: &str) {
        self.state.lock().unwrap().alerts.push(message.to_string());
    }

    fn download(&self, filename: &str, image: &ChartImage) -> std::io::Result<()> {
        if *self.fail_downloads.lock().unwrap() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "export directory is read-only",
            ));
        }
        self.state
            .lock()
            .unwrap()
            .downloads
            .push((filename.to_string(), image.bytes.clone()));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct BackendLog {
    pub live: HashMap<Surface, usize>,
    pub max_live: HashMap<Surface, usize>,
    pub created: HashMap<Surface, usize>,
    pub destroyed: HashMap<Surface, usize>,
    /// Labels of the most recent chart per surface
    pub labels: HashMap<Surface, Vec<String>>,
}

#[derive(Default)]
pub struct RecordingBackend {
    pub log: Arc<Mutex<BackendLog>>,
}

impl RecordingBackend {
    pub fn live(&self, surface: Surface) -> usize {
        self.log.lock().unwrap().live.get(&surface).copied().unwrap_or(0)
    }

    pub fn created(&self, surface: Surface) -> usize {
        self.log.lock().unwrap().created.get(&surface).copied().unwrap_or(0)
    }

    pub fn destroyed(&self, surface: Surface) -> usize {
        self.log.lock().unwrap().destroyed.get(&surface).copied().unwrap_or(0)
    }

    pub fn max_live(&self, surface: Surface) -> usize {
        self.log.lock().unwrap().max_live.get(&surface).copied().unwrap_or(0)
    }

    pub fn labels(&self, surface: Surface) -> Vec<String> {
        self.log.lock().unwrap().labels.get(&surface).cloned().unwrap_or_default()
    }
}

struct RecordingWidget {
    surface: Surface,
    log: Arc<Mutex<BackendLog>>,
}

impl ChartWidget for RecordingWidget {
    fn destroy(&mut self) {
        let mut log = self.log.lock().unwrap();
        *log.live.entry(self.surface).or_default() -= 1;
        *log.destroyed.entry(self.surface).or_default() += 1;
    }

    fn to_image(&self) -> ChartImage {
        ChartImage {
            mime: "image/png",
            extension: "png",
            bytes: Bytes::from(self.surface.name()),
        }
    }
}

impl ChartBackend for RecordingBackend {
    fn create(&self, surface: Surface, series: &SeriesData, _: &ChartStyle) -> Box<dyn ChartWidget> {
        let mut log = self.log.lock().unwrap();
        let live = {
            let live = log.live.entry(surface).or_default();
            *live += 1;
            *live
        };
        let max = log.max_live.entry(surface).or_default();
        *max = (*max).max(live);
        *log.created.entry(surface).or_default() += 1;
        log.labels.insert(surface, series.labels.clone());

        Box::new(RecordingWidget {
            surface,
            log: self.log.clone(),
        })
    }
}

pub struct Harness {
    pub api: Arc<FakeApi>,
    pub page: Arc<RecordingPage>,
    pub backend: Arc<RecordingBackend>,
    pub dashboard: DashboardController,
}

pub fn harness(api: FakeApi) -> Harness {
    let api = Arc::new(api);
    let page = Arc::new(RecordingPage::default());
    let backend = Arc::new(RecordingBackend::default());
    let dashboard = DashboardController::new(
        api.clone(),
        page.clone(),
        backend.clone(),
        SelectorOptions::new(vec![5, 10, 20, 50], 10),
    );

    Harness {
        api,
        page,
        backend,
        dashboard,
    }
}
