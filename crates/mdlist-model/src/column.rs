//! Typed, nullable table columns.
//!
//! Every column type carries its own missing representation: `None` for the
//! typed variants and [`Value::Missing`] for dynamic columns. Converters swap
//! a dynamic column for a typed one; writing a value of another type into a
//! typed column widens it back to [`Column::Dynamic`].

use chrono::NaiveDate;
use serde::Serialize;

use crate::value::Value;

/// The storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Untyped cells as loaded from the source.
    Dynamic,
    /// Nullable 64-bit integers.
    Integer,
    /// Nullable calendar dates.
    Date,
    /// Nullable strings.
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Dynamic(Vec<Value>),
    Integer(Vec<Option<i64>>),
    Date(Vec<Option<NaiveDate>>),
    Text(Vec<Option<String>>),
}

impl Column {
    /// Create a column of `len` missing cells.
    pub fn missing(column_type: ColumnType, len: usize) -> Self {
        match column_type {
            ColumnType::Dynamic => Self::Dynamic(vec![Value::Missing; len]),
            ColumnType::Integer => Self::Integer(vec![None; len]),
            ColumnType::Date => Self::Date(vec![None; len]),
            ColumnType::Text => Self::Text(vec![None; len]),
        }
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Self::Dynamic(_) => ColumnType::Dynamic,
            Self::Integer(_) => ColumnType::Integer,
            Self::Date(_) => ColumnType::Date,
            Self::Text(_) => ColumnType::Text,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Dynamic(values) => values.len(),
            Self::Integer(values) => values.len(),
            Self::Date(values) => values.len(),
            Self::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell at `idx` as a [`Value`]; out-of-range indices read as missing.
    pub fn get(&self, idx: usize) -> Value {
        match self {
            Self::Dynamic(values) => values.get(idx).cloned().unwrap_or_default(),
            Self::Integer(values) => values.get(idx).copied().flatten().into(),
            Self::Date(values) => values.get(idx).copied().flatten().into(),
            Self::Text(values) => values.get(idx).cloned().flatten().into(),
        }
    }

    pub fn is_missing(&self, idx: usize) -> bool {
        match self {
            Self::Dynamic(values) => values.get(idx).is_none_or(Value::is_missing),
            Self::Integer(values) => values.get(idx).copied().flatten().is_none(),
            Self::Date(values) => values.get(idx).copied().flatten().is_none(),
            Self::Text(values) => values.get(idx).and_then(Option::as_ref).is_none(),
        }
    }

    /// Date at `idx` for date columns, or a date cell in a dynamic column.
    pub fn date(&self, idx: usize) -> Option<NaiveDate> {
        match self {
            Self::Date(values) => values.get(idx).copied().flatten(),
            Self::Dynamic(values) => values.get(idx).and_then(Value::as_date),
            _ => None,
        }
    }

    /// Overwrite the cell at `idx`.
    ///
    /// A value that does not fit a typed column widens the column to
    /// [`Column::Dynamic`]. Indices past the end are ignored.
    pub fn set(&mut self, idx: usize, value: Value) {
        if idx >= self.len() {
            return;
        }
        let value = if value.is_missing() {
            Value::Missing
        } else {
            value
        };
        match self {
            Self::Dynamic(values) => {
                values[idx] = value;
                return;
            }
            Self::Integer(values) => match value {
                Value::Int(v) => {
                    values[idx] = Some(v);
                    return;
                }
                Value::Missing => {
                    values[idx] = None;
                    return;
                }
                _ => {}
            },
            Self::Date(values) => match value {
                Value::Date(v) => {
                    values[idx] = Some(v);
                    return;
                }
                Value::Missing => {
                    values[idx] = None;
                    return;
                }
                _ => {}
            },
            Self::Text(values) => match value {
                Value::Text(v) => {
                    values[idx] = Some(v);
                    return;
                }
                Value::Missing => {
                    values[idx] = None;
                    return;
                }
                _ => {}
            },
        }
        self.widen();
        if let Self::Dynamic(values) = self {
            values[idx] = value;
        }
    }

    /// Convert the column to [`Column::Dynamic`] in place.
    pub fn widen(&mut self) {
        if !matches!(self, Self::Dynamic(_)) {
            let values = self.iter().collect();
            *self = Self::Dynamic(values);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.len()).map(|idx| self.get(idx))
    }

    /// New column holding the cells at `indices`, in that order.
    pub fn take(&self, indices: &[usize]) -> Self {
        fn pick<T: Clone + Default>(values: &[T], indices: &[usize]) -> Vec<T> {
            indices
                .iter()
                .map(|&idx| values.get(idx).cloned().unwrap_or_default())
                .collect()
        }
        match self {
            Self::Dynamic(values) => Self::Dynamic(pick(values, indices)),
            Self::Integer(values) => Self::Integer(pick(values, indices)),
            Self::Date(values) => Self::Date(pick(values, indices)),
            Self::Text(values) => Self::Text(pick(values, indices)),
        }
    }
}

impl From<Vec<Value>> for Column {
    fn from(values: Vec<Value>) -> Self {
        Self::Dynamic(values)
    }
}

impl From<Vec<Option<i64>>> for Column {
    fn from(values: Vec<Option<i64>>) -> Self {
        Self::Integer(values)
    }
}

impl From<Vec<Option<NaiveDate>>> for Column {
    fn from(values: Vec<Option<NaiveDate>>) -> Self {
        Self::Date(values)
    }
}

impl From<Vec<Option<String>>> for Column {
    fn from(values: Vec<Option<String>>) -> Self {
        Self::Text(values)
    }
}
