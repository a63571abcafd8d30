//! Date and DateTime type options.
//!
//! Both types take an explicit chrono format string, or fall back to a
//! fixed catalog of common patterns tried in order, ISO 8601 first.

use crate::error::{Error, Result};
use crate::types::{default_null_values, is_null_string, DataKind};
use crate::value::Value;
use alloc::string::String;
use alloc::vec::Vec;
use chrono::{FixedOffset, NaiveDate, NaiveDateTime};

/// Formats tried in order when a Date has no explicit format.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Formats tried in order when a DateTime has no explicit format.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M",
];

/// Parse configuration for the Date type.
#[derive(Clone, Debug)]
pub struct DateOptions {
    null_values: Vec<String>,
    format: Option<String>,
}

impl DateOptions {
    /// Creates date options using the parse catalog.
    pub fn new() -> Self {
        Self {
            null_values: default_null_values(),
            format: None,
        }
    }

    /// Replaces the set of strings recognized as null.
    pub fn null_values(mut self, values: Vec<String>) -> Self {
        self.null_values = values;
        self
    }

    /// Sets an explicit chrono format string, disabling the catalog.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub(crate) fn cast_str(&self, raw: &str) -> Result<Value> {
        let trimmed = raw.trim();

        if is_null_string(&self.null_values, trimmed) {
            return Ok(Value::Null);
        }

        if let Some(format) = &self.format {
            return NaiveDate::parse_from_str(trimmed, format)
                .map(Value::Date)
                .map_err(|_| Error::cast(raw, DataKind::Date));
        }

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Ok(Value::Date(date));
            }
        }

        Err(Error::cast(raw, DataKind::Date))
    }
}

impl Default for DateOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse configuration for the DateTime type.
///
/// A configured timezone offset is attached to naive parses, never used to
/// convert them. Since the offset is uniform for the column, it lives here
/// rather than in each cell; serialization re-attaches it.
#[derive(Clone, Debug)]
pub struct DateTimeOptions {
    null_values: Vec<String>,
    format: Option<String>,
    timezone: Option<FixedOffset>,
}

impl DateTimeOptions {
    /// Creates datetime options using the parse catalog.
    pub fn new() -> Self {
        Self {
            null_values: default_null_values(),
            format: None,
            timezone: None,
        }
    }

    /// Replaces the set of strings recognized as null.
    pub fn null_values(mut self, values: Vec<String>) -> Self {
        self.null_values = values;
        self
    }

    /// Sets an explicit chrono format string, disabling the catalog.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets the offset attached to parsed values.
    pub fn timezone(mut self, offset: FixedOffset) -> Self {
        self.timezone = Some(offset);
        self
    }

    /// Returns the configured offset, if any.
    pub fn timezone_offset(&self) -> Option<FixedOffset> {
        self.timezone
    }

    pub(crate) fn cast_str(&self, raw: &str) -> Result<Value> {
        let trimmed = raw.trim();

        if is_null_string(&self.null_values, trimmed) {
            return Ok(Value::Null);
        }

        if let Some(format) = &self.format {
            return NaiveDateTime::parse_from_str(trimmed, format)
                .map(Value::DateTime)
                .map_err(|_| Error::cast(raw, DataKind::DateTime));
        }

        for format in DATETIME_FORMATS {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Value::DateTime(datetime));
            }
        }

        // A bare date reads as midnight.
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
                    return Ok(Value::DateTime(datetime));
                }
            }
        }

        Err(Error::cast(raw, DataKind::DateTime))
    }
}

impl Default for DateTimeOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_catalog() {
        let opts = DateOptions::new();
        assert_eq!(opts.cast_str("2017-05-01"), Ok(Value::Date(date(2017, 5, 1))));
        assert_eq!(opts.cast_str("5/1/2017"), Ok(Value::Date(date(2017, 5, 1))));
        assert_eq!(
            opts.cast_str("May 1, 2017"),
            Ok(Value::Date(date(2017, 5, 1)))
        );
    }

    #[test]
    fn test_date_explicit_format() {
        let opts = DateOptions::new().format("%d.%m.%Y");
        assert_eq!(opts.cast_str("01.05.2017"), Ok(Value::Date(date(2017, 5, 1))));
        // The catalog is disabled once a format is set.
        assert!(opts.cast_str("2017-05-01").is_err());
    }

    #[test]
    fn test_date_null_and_failure() {
        let opts = DateOptions::new();
        assert_eq!(opts.cast_str("n/a"), Ok(Value::Null));
        assert!(opts.cast_str("not a date").is_err());
    }

    #[test]
    fn test_datetime_catalog() {
        let opts = DateTimeOptions::new();
        let expected = date(2017, 5, 1).and_hms_opt(13, 30, 0).unwrap();
        assert_eq!(
            opts.cast_str("2017-05-01T13:30:00"),
            Ok(Value::DateTime(expected))
        );
        assert_eq!(
            opts.cast_str("2017-05-01 13:30:00"),
            Ok(Value::DateTime(expected))
        );
    }

    #[test]
    fn test_datetime_from_bare_date() {
        let opts = DateTimeOptions::new();
        let expected = date(2017, 5, 1).and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(opts.cast_str("2017-05-01"), Ok(Value::DateTime(expected)));
    }

    #[test]
    fn test_datetime_timezone_is_attach_only() {
        let offset = FixedOffset::east_opt(5 * 3600).unwrap();
        let opts = DateTimeOptions::new().timezone(offset);
        let expected = date(2017, 5, 1).and_hms_opt(13, 30, 0).unwrap();

        // The parsed value is unchanged; the offset only affects serialization.
        assert_eq!(
            opts.cast_str("2017-05-01 13:30:00"),
            Ok(Value::DateTime(expected))
        );
        assert_eq!(opts.timezone_offset(), Some(offset));
    }
}
