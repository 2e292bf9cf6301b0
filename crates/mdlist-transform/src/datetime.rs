//! Calendar date parsing.
//!
//! Inputs come from hand-written YAML and spreadsheets, so several common
//! layouts are accepted. Partial dates expand to the first day of the period
//! they name (`2003-12` is 1 December 2003, `2003` is 1 January 2003).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use mdlist_model::Value;

use crate::error::{Result, TransformError};

/// Layouts tried for full dates, in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d %B %Y", "%d %b %Y", "%B %d, %Y", "%b %d, %Y",
];

/// Layouts tried for date-times; the time part is dropped.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a date from text, returning `None` when no layout matches.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    try_parse_date(trimmed)
        .or_else(|| try_parse_datetime(trimmed))
        .or_else(|| try_parse_year_month(trimmed))
        .or_else(|| try_parse_year(trimmed))
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn try_parse_datetime(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|dt| dt.date())
}

fn try_parse_year_month(value: &str) -> Option<NaiveDate> {
    let (year, month) = value.split_once('-')?;
    if year.len() != 4 || month.is_empty() || month.len() > 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

fn try_parse_year(value: &str) -> Option<NaiveDate> {
    if value.len() != 4 || !value.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    NaiveDate::from_ymd_opt(value.parse().ok()?, 1, 1)
}

/// Interpret a cell as a date for the date converter.
///
/// Text is parsed with [`parse_date`]; an integer is read as a bare year.
/// Anything else, including unparseable text, yields `None`.
pub fn value_to_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Date(date) => Some(*date),
        Value::Text(text) => parse_date(text),
        Value::Int(year) => {
            let year = i32::try_from(*year).ok()?;
            NaiveDate::from_ymd_opt(year, 1, 1)
        }
        _ => None,
    }
}

/// Build the date `year-month-day`, failing on impossible combinations.
pub(crate) fn ymd(column: &str, row: usize, year: i64, month: u32, day: u32) -> Result<NaiveDate> {
    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
        .ok_or_else(|| TransformError::InvalidDate {
            column: column.to_string(),
            row,
            value: format!("{year}-{month:02}-{day:02}"),
        })
}

/// English month name, e.g. "March".
pub fn month_name(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_common_layouts() {
        assert_eq!(parse_date("2021-05-17"), Some(date(2021, 5, 17)));
        assert_eq!(parse_date("2021/05/17"), Some(date(2021, 5, 17)));
        assert_eq!(parse_date("17/05/2021"), Some(date(2021, 5, 17)));
        assert_eq!(parse_date("17 May 2021"), Some(date(2021, 5, 17)));
        assert_eq!(parse_date("May 17, 2021"), Some(date(2021, 5, 17)));
        assert_eq!(parse_date("2021-05-17T09:30:00"), Some(date(2021, 5, 17)));
        assert_eq!(parse_date("2021-05-17 09:30"), Some(date(2021, 5, 17)));
        assert_eq!(parse_date("2021-05-17T09:30:00+01:00"), Some(date(2021, 5, 17)));
    }

    #[test]
    fn partial_dates_expand_to_period_start() {
        assert_eq!(parse_date("2003-12"), Some(date(2003, 12, 1)));
        assert_eq!(parse_date("2003"), Some(date(2003, 1, 1)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("soon"), None);
        assert_eq!(parse_date("2023-13-01"), None);
        assert_eq!(parse_date("2023-02-30"), None);
    }

    #[test]
    fn integer_cells_are_years() {
        assert_eq!(value_to_date(&Value::Int(2019)), Some(date(2019, 1, 1)));
        assert_eq!(value_to_date(&Value::Bool(true)), None);
    }

    #[test]
    fn month_names_are_english() {
        assert_eq!(month_name(date(2020, 3, 9)), "March");
    }
}
