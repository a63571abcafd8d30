//! Value type definitions for tabulon.
//!
//! This module defines the `Value` enum which represents any cell a table
//! can hold. Every cell is either a typed native value or `Null`.

use crate::types::DataKind;
use alloc::string::{String, ToString};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use rust_decimal::Decimal;

/// A single table cell.
#[derive(Clone, Debug)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// Exact decimal number
    Number(Decimal),
    /// UTF-8 text
    Text(String),
    /// Calendar date
    Date(NaiveDate),
    /// Date and time, stored naive; any configured offset lives in the
    /// column's type options
    DateTime(NaiveDateTime),
    /// Signed duration
    TimeDelta(Duration),
}

impl Value {
    /// Returns the data kind of this value, or None if it is Null.
    pub fn kind(&self) -> Option<DataKind> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(DataKind::Boolean),
            Value::Number(_) => Some(DataKind::Number),
            Value::Text(_) => Some(DataKind::Text),
            Value::Date(_) => Some(DataKind::Date),
            Value::DateTime(_) => Some(DataKind::DateTime),
            Value::TimeDelta(_) => Some(DataKind::TimeDelta),
        }
    }

    /// Returns true if this value is Null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean value if this is a Boolean, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the decimal value if this is a Number, None otherwise.
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns a reference to the text if this is a Text, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Returns the date if this is a Date, None otherwise.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the datetime if this is a DateTime, None otherwise.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the duration if this is a TimeDelta, None otherwise.
    pub fn as_timedelta(&self) -> Option<Duration> {
        match self {
            Value::TimeDelta(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns a fixed ordering rank for comparing values of different kinds.
    fn kind_order(&self) -> u8 {
        match self {
            Value::Boolean(_) => 0,
            Value::Number(_) => 1,
            Value::Text(_) => 2,
            Value::Date(_) => 3,
            Value::DateTime(_) => 4,
            Value::TimeDelta(_) => 5,
            Value::Null => 6,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::TimeDelta(a), Value::TimeDelta(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Boolean(b) => b.hash(state),
            Value::Number(d) => d.hash(state),
            Value::Text(s) => s.hash(state),
            Value::Date(d) => d.hash(state),
            Value::DateTime(d) => d.hash(state),
            Value::TimeDelta(d) => {
                d.num_seconds().hash(state);
                d.subsec_nanos().hash(state);
            }
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    /// Total order over cells. Within a kind, the natural order applies.
    /// Null orders after every non-null value, so a plain ascending sort
    /// places nulls last. Values of different kinds order by `kind_order`.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Greater,
            (_, Value::Null) => Ordering::Less,
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::TimeDelta(a), Value::TimeDelta(b)) => a.cmp(b),
            _ => self.kind_order().cmp(&other.kind_order()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Number(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(Decimal::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Value::TimeDelta(v)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Number(d) => serializer.collect_str(d),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Date(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
            Value::DateTime(d) => serializer.collect_str(&d.format("%Y-%m-%dT%H:%M:%S")),
            Value::TimeDelta(d) => serializer.collect_str(&crate::types::format_duration(*d)),
        }
    }
}
