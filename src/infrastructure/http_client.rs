// HTTP data client - reqwest implementation of the analytics API
use crate::application::analytics_api::{
    AnalyticsApi, FetchCause, FetchError, BEST_WEEKDAYS, DOWNLOADS_BY_TEMPLATE,
    DOWNLOADS_BY_TEMPLATE_RANGE, SUMMARY, TOTAL_DOWNLOADS,
};
use crate::domain::metrics::SummaryMetrics;
use crate::domain::range::DateRange;
use crate::domain::series::SeriesData;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpDataClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDataClient {
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn build_url(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    /// One GET request, decoded as `T`. Non-2xx and undecodable bodies are errors.
    pub async fn fetch_resource<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = self.build_url(path, query);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::new(path, FetchCause::Transport(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(path, FetchCause::Status(status.as_u16())));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::new(path, FetchCause::Transport(e.to_string())))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::new(path, FetchCause::Decode(e.to_string())))
    }
}

#[async_trait]
impl AnalyticsApi for HttpDataClient {
    async fn summary(&self, range: Option<DateRange>) -> Result<SummaryMetrics, FetchError> {
        let query = range.map(|r| r.query()).unwrap_or_default();
        self.fetch_resource(SUMMARY, &query).await
    }

    async fn total_downloads(&self) -> Result<SeriesData, FetchError> {
        self.fetch_resource(TOTAL_DOWNLOADS, &[]).await
    }

    async fn downloads_by_template(&self) -> Result<SeriesData, FetchError> {
        self.fetch_resource(DOWNLOADS_BY_TEMPLATE, &[]).await
    }

    async fn downloads_by_template_range(&self, range: DateRange) -> Result<SeriesData, FetchError> {
        self.fetch_resource(DOWNLOADS_BY_TEMPLATE_RANGE, &range.query()).await
    }

    async fn best_weekdays(&self) -> Result<SeriesData, FetchError> {
        self.fetch_resource(BEST_WEEKDAYS, &[]).await
    }
}
