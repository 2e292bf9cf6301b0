//! Dynamically-typed cell values.
//!
//! Records arrive from YAML, JSON, CSV and Markdown front matter with whatever
//! types those formats produce. [`Value`] captures them without coercion; the
//! converters in `mdlist-transform` are responsible for typing columns.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// ISO calendar date format used for display and serialization.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single cell of a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// The explicit "no value" state. Distinct from zero, `""` and `false`.
    #[default]
    Missing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns true for [`Value::Missing`] and for a NaN float.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Float(value) => value.is_nan(),
            _ => false,
        }
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Date(_) => "date",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) if !value.is_nan() => Some(*value),
            _ => None,
        }
    }

    /// Scalar equality where integers and floats compare numerically.
    ///
    /// Lists and maps are only equal to values of the same shape; a list is
    /// never equal to a scalar.
    pub fn loosely_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => {
                cmp_int_float(*a, *b) == Ordering::Equal
            }
            (a, b) if a.is_missing() || b.is_missing() => false,
            (a, b) => a == b,
        }
    }

    /// Total order over present values.
    ///
    /// Different types order by rank (bool, number, date, text, list, map).
    /// Missing values are not ranked here; callers decide where they go.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Int(a), Self::Float(b)) => cmp_int_float(*a, *b),
            (Self::Float(a), Self::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b).unwrap_or_else(|| a.total_cmp(b)),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) => {
                for (left, right) in a.iter().zip(b) {
                    let ordering = left.total_cmp(right);
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                a.len().cmp(&b.len())
            }
            (Self::Map(a), Self::Map(b)) => a.len().cmp(&b.len()),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Int(_) | Self::Float(_) => 1,
            Self::Date(_) => 2,
            Self::Text(_) => 3,
            Self::List(_) => 4,
            Self::Map(_) => 5,
            Self::Missing => 6,
        }
    }
}

/// Exact comparison of an integer with a float. NaN sorts after every integer.
fn cmp_int_float(int: i64, float: f64) -> Ordering {
    // 2^63, the first float past i64::MAX.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if float.is_nan() || float >= LIMIT {
        return Ordering::Less;
    }
    if float < -LIMIT {
        return Ordering::Greater;
    }
    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => whole.partial_cmp(&float).unwrap_or(Ordering::Equal),
        ordering => ordering,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Date(value) => write!(f, "{}", value.format(DATE_FORMAT)),
            Self::List(values) => {
                f.write_str("[")?;
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (idx, (key, value)) in entries.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Missing => serializer.serialize_none(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) if value.is_nan() => serializer.serialize_none(),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Text(value) => serializer.serialize_str(value),
            Self::Date(value) => serializer.collect_str(&value.format(DATE_FORMAT)),
            Self::List(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::List(values)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self::Map(entries)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_counts_as_missing() {
        assert!(Value::Missing.is_missing());
        assert!(Value::Float(f64::NAN).is_missing());
        assert!(!Value::Float(0.0).is_missing());
        assert!(!Value::Text(String::new()).is_missing());
        assert!(!Value::Bool(false).is_missing());
    }

    #[test]
    fn numbers_compare_across_int_and_float() {
        assert!(Value::Int(3).loosely_equals(&Value::Float(3.0)));
        assert_eq!(Value::Int(2).total_cmp(&Value::Float(2.5)), Ordering::Less);
        assert!(!Value::Missing.loosely_equals(&Value::Missing));
    }

    #[test]
    fn large_int_float_comparisons_stay_transitive() {
        let pow = 1_i64 << 53;
        let float = Value::Float(pow as f64);
        assert_eq!(Value::Int(pow).total_cmp(&float), Ordering::Equal);
        assert_eq!(Value::Int(pow + 1).total_cmp(&float), Ordering::Greater);
        assert_eq!(float.total_cmp(&Value::Int(pow + 1)), Ordering::Less);
        assert!(!Value::Int(pow + 1).loosely_equals(&float));
        assert_eq!(Value::Int(-3).total_cmp(&Value::Float(-2.5)), Ordering::Less);
        assert_eq!(Value::Int(-2).total_cmp(&Value::Float(-2.5)), Ordering::Greater);
        assert_eq!(
            Value::Int(i64::MAX).total_cmp(&Value::Float(f64::INFINITY)),
            Ordering::Less
        );
        assert_eq!(
            Value::Int(i64::MIN).total_cmp(&Value::Float(-1e300)),
            Ordering::Greater
        );
    }

    #[test]
    fn list_is_not_equal_to_scalar() {
        let list = Value::List(vec![Value::from("ndl21")]);
        assert!(!list.loosely_equals(&Value::from("ndl21")));
    }

    #[test]
    fn mixed_types_order_by_rank() {
        assert_eq!(
            Value::Int(10_000).total_cmp(&Value::from("a")),
            Ordering::Less
        );
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(Value::Date(date).total_cmp(&Value::Int(1)), Ordering::Greater);
    }

    #[test]
    fn display_formats_dates_and_lists() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 4).unwrap();
        assert_eq!(Value::Date(date).to_string(), "2021-03-04");
        let list = Value::List(vec![Value::Int(1), Value::from("b")]);
        assert_eq!(list.to_string(), "[1, b]");
        assert_eq!(Value::Missing.to_string(), "");
    }
}
