// Analytics API trait - Typed access to the aggregation endpoints
use crate::domain::metrics::SummaryMetrics;
use crate::domain::range::DateRange;
use crate::domain::series::SeriesData;
use async_trait::async_trait;
use thiserror::Error;

/// Why a single resource fetch failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchCause {
    #[error("status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected body: {0}")]
    Decode(String),
}

/// The only error kind surfaced by the data layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to fetch {resource}: {cause}")]
pub struct FetchError {
    pub resource: String,
    pub cause: FetchCause,
}

impl FetchError {
    pub fn new(resource: impl Into<String>, cause: FetchCause) -> Self {
        Self {
            resource: resource.into(),
            cause,
        }
    }
}

pub const SUMMARY: &str = "/api/summary";
pub const TOTAL_DOWNLOADS: &str = "/api/total_downloads";
pub const DOWNLOADS_BY_TEMPLATE: &str = "/api/downloads_by_template";
pub const DOWNLOADS_BY_TEMPLATE_RANGE: &str = "/api/downloads_by_template_range";
pub const BEST_WEEKDAYS: &str = "/api/best_weekdays";

/// Every call is one independent request: no retries, no caching, no deduplication.
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    /// Headline counters, plus the range total when `range` is given
    async fn summary(&self, range: Option<DateRange>) -> Result<SummaryMetrics, FetchError>;

    /// Daily downloads over the whole history
    async fn total_downloads(&self) -> Result<SeriesData, FetchError>;

    /// Downloads per template, sorted by descending value
    async fn downloads_by_template(&self) -> Result<SeriesData, FetchError>;

    /// Downloads per template inside `range`; may be empty
    async fn downloads_by_template_range(&self, range: DateRange) -> Result<SeriesData, FetchError>;

    /// Downloads per weekday, Monday first
    async fn best_weekdays(&self) -> Result<SeriesData, FetchError>;
}
