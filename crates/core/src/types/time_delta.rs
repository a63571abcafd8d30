//! TimeDelta type options and duration parsing.
//!
//! Accepts unit strings (`"1h 30m"`, `"2 days"`, `"1.5h"`, `"-45s"`) and
//! clock strings (`"1:30"` is minutes:seconds, `"1:30:00"` is
//! hours:minutes:seconds).

use crate::error::{Error, Result};
use crate::types::{default_null_values, is_null_string, DataKind};
use crate::value::Value;
use alloc::string::String;
use alloc::vec::Vec;
use chrono::Duration;
use core::str::FromStr;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Parse configuration for the TimeDelta type.
#[derive(Clone, Debug)]
pub struct TimeDeltaOptions {
    null_values: Vec<String>,
}

impl TimeDeltaOptions {
    /// Creates timedelta options with the default null strings.
    pub fn new() -> Self {
        Self {
            null_values: default_null_values(),
        }
    }

    /// Replaces the set of strings recognized as null.
    pub fn null_values(mut self, values: Vec<String>) -> Self {
        self.null_values = values;
        self
    }

    pub(crate) fn cast_str(&self, raw: &str) -> Result<Value> {
        let trimmed = raw.trim();

        if is_null_string(&self.null_values, trimmed) {
            return Ok(Value::Null);
        }

        parse_duration(trimmed)
            .map(Value::TimeDelta)
            .ok_or_else(|| Error::cast(raw, DataKind::TimeDelta))
    }
}

impl Default for TimeDeltaOptions {
    fn default() -> Self {
        Self::new()
    }
}

fn nanos_per(unit: &str) -> Option<i64> {
    const NANOS_PER_SECOND: i64 = 1_000_000_000;

    let nanos = match unit {
        "w" | "wk" | "wks" | "week" | "weeks" => 7 * 86_400 * NANOS_PER_SECOND,
        "d" | "day" | "days" => 86_400 * NANOS_PER_SECOND,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3_600 * NANOS_PER_SECOND,
        "m" | "min" | "mins" | "minute" | "minutes" => 60 * NANOS_PER_SECOND,
        "s" | "sec" | "secs" | "second" | "seconds" => NANOS_PER_SECOND,
        "ms" | "millisecond" | "milliseconds" => 1_000_000,
        "us" | "microsecond" | "microseconds" => 1_000,
        _ => return None,
    };

    Some(nanos)
}

/// Parses a duration string, returning None when it is malformed.
fn parse_duration(input: &str) -> Option<Duration> {
    let (negative, body) = match input.strip_prefix('-') {
        Some(rest) => (true, rest.trim()),
        None => (false, input),
    };

    if body.is_empty() {
        return None;
    }

    let total = if body.contains(':') {
        parse_clock(body)?
    } else {
        parse_units(body)?
    };

    Some(if negative { -total } else { total })
}

/// `MM:SS` or `HH:MM:SS`.
fn parse_clock(body: &str) -> Option<Duration> {
    let parts: Vec<&str> = body.split(':').collect();

    let (hours, minutes, seconds) = match parts.as_slice() {
        [m, s] => (0i64, m.parse::<i64>().ok()?, s.parse::<i64>().ok()?),
        [h, m, s] => (
            h.parse::<i64>().ok()?,
            m.parse::<i64>().ok()?,
            s.parse::<i64>().ok()?,
        ),
        _ => return None,
    };

    if minutes < 0 || seconds < 0 {
        return None;
    }

    Some(Duration::seconds(hours * 3_600 + minutes * 60 + seconds))
}

/// Whitespace- or comma-separated `<number><unit>` groups, e.g. `1h 30m`,
/// `2 days`, `1.5h`.
fn parse_units(body: &str) -> Option<Duration> {
    let mut total_nanos: i64 = 0;
    let mut matched = false;

    let mut chars = body.char_indices().peekable();

    while let Some((start, ch)) = chars.peek().copied() {
        if ch.is_whitespace() || ch == ',' {
            chars.next();
            continue;
        }

        if !ch.is_ascii_digit() && ch != '.' {
            return None;
        }

        // Number segment.
        let mut end = start;
        while let Some((i, c)) = chars.peek().copied() {
            if c.is_ascii_digit() || c == '.' {
                end = i + c.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        let amount = Decimal::from_str(&body[start..end]).ok()?;

        // Optional whitespace between number and unit.
        while let Some((_, c)) = chars.peek().copied() {
            if c.is_whitespace() {
                chars.next();
            } else {
                break;
            }
        }

        // Unit segment.
        let unit_start = chars.peek().map(|(i, _)| *i)?;
        let mut unit_end = unit_start;
        while let Some((i, c)) = chars.peek().copied() {
            if c.is_ascii_alphabetic() {
                unit_end = i + c.len_utf8();
                chars.next();
            } else {
                break;
            }
        }

        if unit_end == unit_start {
            return None;
        }

        let unit: String = body[unit_start..unit_end].to_lowercase();
        let scale = Decimal::from(nanos_per(&unit)?);
        let nanos = (amount * scale).to_i64()?;

        total_nanos = total_nanos.checked_add(nanos)?;
        matched = true;
    }

    if !matched {
        return None;
    }

    Some(Duration::nanoseconds(total_nanos))
}
