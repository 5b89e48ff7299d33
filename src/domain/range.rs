// Date range domain model
use chrono::NaiveDate;
use std::fmt;

/// Wire format of calendar dates at the API boundary
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive calendar date range. The picker guarantees `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A picker selection is complete only with exactly two endpoints.
    pub fn from_selection(dates: &[NaiveDate]) -> Option<Self> {
        match dates {
            [start, end] => Some(Self::new(*start, *end)),
            _ => None,
        }
    }

    /// Ordered query parameters for range-scoped endpoints
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("start", self.start.format(DATE_FORMAT).to_string()),
            ("end", self.end.format(DATE_FORMAT).to_string()),
        ]
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input, DATE_FORMAT)
}
