use chrono::{Datelike, Local, NaiveDate};

/// Years of history the recency filter keeps by default.
pub const DEFAULT_LOOKBACK_YEARS: i64 = 5;

/// Run-wide inputs the predicates read: "now" and the recency cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionContext {
    pub today: NaiveDate,
    pub since_year: i64,
}

impl ExecutionContext {
    /// Context frozen at `today`, with the cutoff five years earlier.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            since_year: i64::from(today.year()) - DEFAULT_LOOKBACK_YEARS,
        }
    }

    /// Context for the local calendar date.
    pub fn now() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn with_since_year(mut self, since_year: i64) -> Self {
        self.since_year = since_year;
        self
    }
}
