//! Row predicates and mask combination.
//!
//! A [`Mask`] holds one tri-state entry per row: `Some(true)` keeps the row,
//! `Some(false)` drops it and `None` marks the outcome as undefined, which
//! also drops it. Predicates read absent columns as all missing.

use chrono::{Datelike, NaiveDate};
use mdlist_model::{Table, Value};
use tracing::trace;

use crate::cells::date_cells_or_missing;
use crate::error::Result;

/// Per-row tri-state selection.
pub type Mask = Vec<Option<bool>>;

/// Mask selecting every row.
pub fn all_true(height: usize) -> Mask {
    vec![Some(true); height]
}

/// Whether a mask entry keeps its row.
pub fn is_selected(entry: Option<bool>) -> bool {
    entry == Some(true)
}

/// Number of rows a mask keeps.
pub fn selected_count(mask: &[Option<bool>]) -> usize {
    mask.iter().filter(|entry| is_selected(**entry)).count()
}

/// Combine `next` into `acc` with three-valued AND.
///
/// `false` wins over undefined so that a row already rejected stays rejected.
pub fn and_into(acc: &mut Mask, next: &[Option<bool>]) {
    for (left, right) in acc.iter_mut().zip(next) {
        *left = match (*left, *right) {
            (Some(false), _) | (_, Some(false)) => Some(false),
            (Some(true), Some(true)) => Some(true),
            _ => None,
        };
    }
}

/// Rows whose `column` is at least `since_year`.
///
/// Numbers, numeric text and dates (by year) are compared. Missing and
/// non-numeric cells are undefined.
pub fn recent(table: &Table, column: &str, since_year: i64) -> Mask {
    let cutoff = since_year as f64;
    (0..table.height())
        .map(|row| year_like(&table.get(row, column)).map(|year| year >= cutoff))
        .collect()
}

fn year_like(value: &Value) -> Option<f64> {
    match value {
        Value::Int(_) | Value::Float(_) => value.as_f64(),
        Value::Date(date) => Some(f64::from(date.year())),
        Value::Text(text) => text.trim().parse::<f64>().ok().filter(|v| !v.is_nan()),
        _ => None,
    }
}

/// Rows active on `today`: started on or before it and not yet ended.
///
/// A missing start is never current; a missing end is open-ended. When
/// `flag` names a column, rows whose flag is boolean `true` are kept
/// regardless of their dates.
///
/// # Errors
///
/// Returns [`crate::TransformError::TypeMismatch`] when `start` or `end`
/// holds a non-date.
pub fn current(
    table: &Table,
    start: &str,
    end: &str,
    flag: Option<&str>,
    today: NaiveDate,
) -> Result<Mask> {
    let starts = date_cells_or_missing(table, start)?;
    let ends = date_cells_or_missing(table, end)?;
    let mask = starts
        .iter()
        .zip(&ends)
        .enumerate()
        .map(|(row, (start, end))| {
            let by_dates = match start {
                Some(start) => *start <= today && end.is_none_or(|end| end >= today),
                None => false,
            };
            let flagged = flag.is_some_and(|flag| table.get(row, flag) == Value::Bool(true));
            if flagged {
                trace!(row, "row kept by current flag");
            }
            Some(by_dates || flagged)
        })
        .collect();
    Ok(mask)
}

/// Rows whose `end` lies strictly before `today`.
///
/// A missing end is never former. Unlike [`current`], no flag column is
/// consulted.
///
/// # Errors
///
/// Returns [`crate::TransformError::TypeMismatch`] when `end` holds a non-date.
pub fn former(table: &Table, end: &str, today: NaiveDate) -> Result<Mask> {
    let ends = date_cells_or_missing(table, end)?;
    Ok(ends
        .into_iter()
        .map(|end| Some(end.is_some_and(|end| end < today)))
        .collect())
}

/// Rows whose `column` equals `value`; missing cells are false.
pub fn equals(table: &Table, column: &str, value: &Value) -> Mask {
    (0..table.height())
        .map(|row| Some(table.get(row, column).loosely_equals(value)))
        .collect()
}

/// Rows whose `column` equals `value` or is a list containing it.
pub fn contains(table: &Table, column: &str, value: &Value) -> Mask {
    (0..table.height())
        .map(|row| {
            let cell = table.get(row, column);
            let hit = match &cell {
                Value::List(items) => {
                    cell.loosely_equals(value) || items.iter().any(|item| item.loosely_equals(value))
                }
                other => other.loosely_equals(value),
            };
            Some(hit)
        })
        .collect()
}
