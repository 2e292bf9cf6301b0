//! Pipeline step types.
//!
//! Steps are plain data: a [`Converter`] or [`Augmentor`] names its columns
//! and parameters, and `apply` dispatches to the matching function in
//! `mdlist-transform`. Keeping them as enums lets definitions be cloned,
//! compared and listed by the CLI.

use mdlist_model::{Table, Value};
use mdlist_transform::filters::{self, Mask};
use mdlist_transform::{SortOrder, augmentors, converters};
use serde::Serialize;

use crate::context::ExecutionContext;

type StepResult<T> = mdlist_transform::Result<T>;

fn owned<I, S>(columns: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    columns.into_iter().map(Into::into).collect()
}

/// A typing step applied before augmentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Converter {
    ToDate { columns: Vec<String> },
    ToInteger { columns: Vec<String> },
    ToText { columns: Vec<String> },
    YearToNewYearDay { columns: Vec<String> },
    YearToIso { column: String, month: u32, day: u32 },
}

impl Converter {
    pub fn to_date<I: IntoIterator<Item = S>, S: Into<String>>(columns: I) -> Self {
        Self::ToDate {
            columns: owned(columns),
        }
    }

    pub fn to_integer<I: IntoIterator<Item = S>, S: Into<String>>(columns: I) -> Self {
        Self::ToInteger {
            columns: owned(columns),
        }
    }

    pub fn to_text<I: IntoIterator<Item = S>, S: Into<String>>(columns: I) -> Self {
        Self::ToText {
            columns: owned(columns),
        }
    }

    pub fn year_to_new_year_day<I: IntoIterator<Item = S>, S: Into<String>>(columns: I) -> Self {
        Self::YearToNewYearDay {
            columns: owned(columns),
        }
    }

    pub fn year_to_iso(column: impl Into<String>, month: u32, day: u32) -> Self {
        Self::YearToIso {
            column: column.into(),
            month,
            day,
        }
    }

    /// Step name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ToDate { .. } => "to_date",
            Self::ToInteger { .. } => "to_integer",
            Self::ToText { .. } => "to_text",
            Self::YearToNewYearDay { .. } => "year_to_new_year_day",
            Self::YearToIso { .. } => "year_to_iso",
        }
    }

    pub fn apply(&self, table: &mut Table) -> StepResult<()> {
        match self {
            Self::ToDate { columns } => converters::to_date(table, columns),
            Self::ToInteger { columns } => converters::to_integer(table, columns),
            Self::ToText { columns } => converters::to_text(table, columns),
            Self::YearToNewYearDay { columns } => converters::year_to_new_year_day(table, columns),
            Self::YearToIso { column, month, day } => {
                converters::year_to_iso(table, column, *month, *day)?;
            }
        }
        Ok(())
    }
}

/// A step that derives or fills columns after typing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Augmentor {
    AddMonth { source: String, target: String },
    AddYear { source: String, target: String },
    FillMonth { source: String, target: String },
    FillYear { source: String, target: String },
    FillConstant { column: String, value: Value },
    AddColumns { columns: Vec<String> },
}

impl Augmentor {
    pub fn add_month(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::AddMonth {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn add_year(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::AddYear {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn fill_month(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::FillMonth {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn fill_year(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::FillYear {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn fill_constant(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::FillConstant {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn add_columns<I: IntoIterator<Item = S>, S: Into<String>>(columns: I) -> Self {
        Self::AddColumns {
            columns: owned(columns),
        }
    }

    /// Step name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddMonth { .. } => "add_month",
            Self::AddYear { .. } => "add_year",
            Self::FillMonth { .. } => "fill_month",
            Self::FillYear { .. } => "fill_year",
            Self::FillConstant { .. } => "fill_constant",
            Self::AddColumns { .. } => "add_columns",
        }
    }

    pub fn apply(&self, table: &mut Table) -> StepResult<()> {
        match self {
            Self::AddMonth { source, target } => augmentors::add_month(table, source, target),
            Self::AddYear { source, target } => augmentors::add_year(table, source, target),
            Self::FillMonth { source, target } => augmentors::fill_month(table, source, target),
            Self::FillYear { source, target } => augmentors::fill_year(table, source, target),
            Self::FillConstant { column, value } => {
                augmentors::fill_constant(table, column, value);
                Ok(())
            }
            Self::AddColumns { columns } => {
                augmentors::add_columns(table, columns);
                Ok(())
            }
        }
    }
}

/// One table-mutating step of a pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Step {
    Convert(Converter),
    Augment(Augmentor),
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Convert(converter) => converter.name(),
            Self::Augment(augmentor) => augmentor.name(),
        }
    }

    /// Mutate `table` in place. Row count and order never change.
    pub fn apply(&self, table: &mut Table) -> StepResult<()> {
        match self {
            Self::Convert(converter) => converter.apply(table),
            Self::Augment(augmentor) => augmentor.apply(table),
        }
    }

    pub fn is_converter(&self) -> bool {
        matches!(self, Self::Convert(_))
    }
}

impl From<Converter> for Step {
    fn from(converter: Converter) -> Self {
        Self::Convert(converter)
    }
}

impl From<Augmentor> for Step {
    fn from(augmentor: Augmentor) -> Self {
        Self::Augment(augmentor)
    }
}

/// A row predicate evaluated against the prepared table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    /// `column >= since_year`.
    Recent { column: String },
    /// Started and not yet ended, or flagged `true`.
    Current {
        start: String,
        end: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        flag: Option<String>,
    },
    /// Ended before today.
    Former { end: String },
    Equals { column: String, value: Value },
    Contains { column: String, value: Value },
}

impl Predicate {
    pub fn recent(column: impl Into<String>) -> Self {
        Self::Recent {
            column: column.into(),
        }
    }

    pub fn current(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::Current {
            start: start.into(),
            end: end.into(),
            flag: None,
        }
    }

    pub fn current_or_flagged(
        start: impl Into<String>,
        end: impl Into<String>,
        flag: impl Into<String>,
    ) -> Self {
        Self::Current {
            start: start.into(),
            end: end.into(),
            flag: Some(flag.into()),
        }
    }

    pub fn former(end: impl Into<String>) -> Self {
        Self::Former { end: end.into() }
    }

    pub fn equals(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn contains(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Contains {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Recent { .. } => "recent",
            Self::Current { .. } => "current",
            Self::Former { .. } => "former",
            Self::Equals { .. } => "equals",
            Self::Contains { .. } => "contains",
        }
    }

    pub fn evaluate(&self, table: &Table, ctx: &ExecutionContext) -> StepResult<Mask> {
        match self {
            Self::Recent { column } => Ok(filters::recent(table, column, ctx.since_year)),
            Self::Current { start, end, flag } => {
                filters::current(table, start, end, flag.as_deref(), ctx.today)
            }
            Self::Former { end } => filters::former(table, end, ctx.today),
            Self::Equals { column, value } => Ok(filters::equals(table, column, value)),
            Self::Contains { column, value } => Ok(filters::contains(table, column, value)),
        }
    }
}

/// Predicates combined with logical AND, in declared order.
///
/// An empty spec selects every row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterSpec {
    predicates: Vec<Predicate>,
}

impl FilterSpec {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn single(predicate: Predicate) -> Self {
        Self {
            predicates: vec![predicate],
        }
    }

    pub fn and(predicates: Vec<Predicate>) -> Self {
        Self { predicates }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl From<Predicate> for FilterSpec {
    fn from(predicate: Predicate) -> Self {
        Self::single(predicate)
    }
}

/// Sort keys and a direction shared by all of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortSpec {
    pub keys: Vec<String>,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn ascending<I: IntoIterator<Item = S>, S: Into<String>>(keys: I) -> Self {
        Self {
            keys: owned(keys),
            order: SortOrder::Ascending,
        }
    }

    pub fn descending<I: IntoIterator<Item = S>, S: Into<String>>(keys: I) -> Self {
        Self {
            keys: owned(keys),
            order: SortOrder::Descending,
        }
    }
}
