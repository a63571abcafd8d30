//! Data type definitions for tabulon.
//!
//! A `DataType` pairs a kind discriminant with the parse configuration for
//! that kind: which strings read as null, which symbols a number may carry,
//! which formats a date is tried against. Casting a raw cell through its
//! column's `DataType` is the only way values enter a table.

mod boolean;
mod date_time;
mod number;
mod text;
mod time_delta;

pub use boolean::BooleanOptions;
pub use date_time::{DateOptions, DateTimeOptions};
pub use number::NumberOptions;
pub use text::TextOptions;
pub use time_delta::TimeDeltaOptions;

use crate::error::{Error, Result};
use crate::value::Value;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use chrono::Duration;
use core::fmt;

/// Strings which cast to null by default, compared case-insensitively.
pub const DEFAULT_NULL_VALUES: &[&str] = &["", "na", "n/a", "none", "null", ".", "-"];

/// The kind of data a column holds, without its parse configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// UTF-8 text
    Text,
    /// Exact decimal number
    Number,
    /// True/false/null
    Boolean,
    /// Calendar date
    Date,
    /// Date and time
    DateTime,
    /// Signed duration
    TimeDelta,
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataKind::Text => "Text",
            DataKind::Number => "Number",
            DataKind::Boolean => "Boolean",
            DataKind::Date => "Date",
            DataKind::DateTime => "DateTime",
            DataKind::TimeDelta => "TimeDelta",
        };
        f.write_str(name)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DataKind {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// A column data type: a kind plus its parse configuration.
#[derive(Clone, Debug)]
pub enum DataType {
    /// UTF-8 text
    Text(TextOptions),
    /// Exact decimal number
    Number(NumberOptions),
    /// True/false/null
    Boolean(BooleanOptions),
    /// Calendar date
    Date(DateOptions),
    /// Date and time
    DateTime(DateTimeOptions),
    /// Signed duration
    TimeDelta(TimeDeltaOptions),
}

impl DataType {
    /// Creates a Text type with default options.
    pub fn text() -> Self {
        DataType::Text(TextOptions::new())
    }

    /// Creates a Number type with default options.
    pub fn number() -> Self {
        DataType::Number(NumberOptions::new())
    }

    /// Creates a Boolean type with default options.
    pub fn boolean() -> Self {
        DataType::Boolean(BooleanOptions::new())
    }

    /// Creates a Date type with default options.
    pub fn date() -> Self {
        DataType::Date(DateOptions::new())
    }

    /// Creates a DateTime type with default options.
    pub fn date_time() -> Self {
        DataType::DateTime(DateTimeOptions::new())
    }

    /// Creates a TimeDelta type with default options.
    pub fn time_delta() -> Self {
        DataType::TimeDelta(TimeDeltaOptions::new())
    }

    /// Returns the kind of this type.
    pub fn kind(&self) -> DataKind {
        match self {
            DataType::Text(_) => DataKind::Text,
            DataType::Number(_) => DataKind::Number,
            DataType::Boolean(_) => DataKind::Boolean,
            DataType::Date(_) => DataKind::Date,
            DataType::DateTime(_) => DataKind::DateTime,
            DataType::TimeDelta(_) => DataKind::TimeDelta,
        }
    }

    /// Casts a raw cell to this type.
    ///
    /// Null passes through. A native value of this type's kind passes
    /// through unchanged (`Number` additionally accepts `Boolean` as 0/1,
    /// and `DateTime` accepts `Date` as midnight). Text input is trimmed,
    /// compared against the configured null strings, then parsed.
    ///
    /// Returns `Error::Cast` when the input is non-null and unparseable.
    pub fn cast(&self, raw: &Value) -> Result<Value> {
        if raw.is_null() {
            return Ok(Value::Null);
        }

        match (self, raw) {
            (DataType::Text(opts), Value::Text(s)) => opts.cast_str(s),
            (DataType::Number(opts), Value::Text(s)) => opts.cast_str(s),
            (DataType::Number(_), Value::Number(_)) => Ok(raw.clone()),
            (DataType::Number(_), Value::Boolean(b)) => {
                Ok(Value::Number(if *b { 1.into() } else { 0.into() }))
            }
            (DataType::Boolean(opts), Value::Text(s)) => opts.cast_str(s),
            (DataType::Boolean(_), Value::Boolean(_)) => Ok(raw.clone()),
            (DataType::Date(opts), Value::Text(s)) => opts.cast_str(s),
            (DataType::Date(_), Value::Date(_)) => Ok(raw.clone()),
            (DataType::DateTime(opts), Value::Text(s)) => opts.cast_str(s),
            (DataType::DateTime(_), Value::DateTime(_)) => Ok(raw.clone()),
            (DataType::DateTime(_), Value::Date(d)) => match d.and_hms_opt(0, 0, 0) {
                Some(datetime) => Ok(Value::DateTime(datetime)),
                None => Err(Error::cast(coerce_to_text(raw), self.kind())),
            },
            (DataType::TimeDelta(opts), Value::Text(s)) => opts.cast_str(s),
            (DataType::TimeDelta(_), Value::TimeDelta(_)) => Ok(raw.clone()),
            _ => Err(Error::cast(coerce_to_text(raw), self.kind())),
        }
    }

    /// Serializes a value of this type to its CSV-safe textual form.
    ///
    /// Numbers print as bare decimals with their stored precision, never in
    /// scientific notation. Dates and datetimes print as ISO 8601; a
    /// configured timezone offset is appended to datetimes. Null is the
    /// empty string.
    pub fn csv_string(&self, value: &Value) -> String {
        match (self, value) {
            (_, Value::Null) => String::new(),
            (DataType::DateTime(opts), Value::DateTime(d)) => match opts.timezone_offset() {
                Some(offset) => format!("{}{}", d.format("%Y-%m-%dT%H:%M:%S"), offset),
                None => d.format("%Y-%m-%dT%H:%M:%S").to_string(),
            },
            // Stored precision is kept: 1.50 serializes as "1.50", not "1.5".
            (_, Value::Number(d)) => d.to_string(),
            (_, v) => coerce_to_text(v),
        }
    }
}

/// Renders any value as plain text using default forms: normalized bare
/// decimals, ISO 8601 dates, `true`/`false` booleans. Used for diagnostics
/// and for the text coercion joins apply when key column types differ.
pub fn coerce_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Boolean(b) => if *b { "true" } else { "false" }.to_string(),
        Value::Number(d) => d.normalize().to_string(),
        Value::Text(s) => s.clone(),
        Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        Value::DateTime(d) => d.format("%Y-%m-%dT%H:%M:%S").to_string(),
        Value::TimeDelta(d) => format_duration(*d),
    }
}

/// Formats a duration in the compact unit form this crate also parses,
/// e.g. `1h 30m`, `-2d 12h`, `500ms`. Zero is `0s`.
pub fn format_duration(duration: Duration) -> String {
    let negative = duration < Duration::zero();
    let abs = if negative { -duration } else { duration };

    let mut total_ms = abs.num_milliseconds();
    let mut parts: Vec<String> = Vec::new();

    const MS_PER_DAY: i64 = 86_400_000;
    const MS_PER_HOUR: i64 = 3_600_000;
    const MS_PER_MINUTE: i64 = 60_000;
    const MS_PER_SECOND: i64 = 1_000;

    for (unit_ms, suffix) in [
        (MS_PER_DAY, "d"),
        (MS_PER_HOUR, "h"),
        (MS_PER_MINUTE, "m"),
        (MS_PER_SECOND, "s"),
        (1, "ms"),
    ] {
        let count = total_ms / unit_ms;
        if count > 0 {
            parts.push(format!("{}{}", count, suffix));
            total_ms -= count * unit_ms;
        }
    }

    if parts.is_empty() {
        return "0s".to_string();
    }

    let joined = parts.join(" ");
    if negative {
        format!("-{}", joined)
    } else {
        joined
    }
}

/// Returns true when `s` matches one of the configured null strings,
/// ignoring ASCII case.
pub(crate) fn is_null_string(null_values: &[String], s: &str) -> bool {
    null_values.iter().any(|n| n.eq_ignore_ascii_case(s))
}

/// Builds the default null string set.
pub(crate) fn default_null_values() -> Vec<String> {
    DEFAULT_NULL_VALUES.iter().map(|s| s.to_string()).collect()
}
