// Labelled series domain model
use serde::Deserialize;

/// Parallel label/value sequences as returned by the chart endpoints.
///
/// `labels[i]` belongs to `values[i]`. Equal length is guaranteed by the API;
/// renderers treat a mismatch as a contract violation rather than repairing it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SeriesData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl SeriesData {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Self {
        Self { labels, values }
    }

    /// An empty series means "no data in range", not a failure.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_consistent(&self) -> bool {
        self.labels.len() == self.values.len()
    }

    /// Keep the first `n` entries of an already-sorted series
    pub fn top_n(mut self, n: usize) -> Self {
        self.labels.truncate(n);
        self.values.truncate(n);
        self
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}
