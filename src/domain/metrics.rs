// Summary metrics domain model
use serde::Deserialize;

/// Glyph shown in the custom-range box when no range total is available
pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SummaryMetrics {
    #[serde(default)]
    pub all_time: u64,
    #[serde(default)]
    pub last_7_days: u64,
    #[serde(default)]
    pub last_1_day: u64,
    #[serde(default)]
    pub custom_range: Option<u64>,
}

impl SummaryMetrics {
    /// Text for the custom-range box. Absent and zero totals both show the placeholder.
    pub fn custom_range_text(&self) -> String {
        match self.custom_range {
            Some(total) if total > 0 => total.to_string(),
            _ => PLACEHOLDER.to_string(),
        }
    }
}
