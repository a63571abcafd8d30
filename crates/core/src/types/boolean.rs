//! Boolean type options.

use crate::error::{Error, Result};
use crate::types::{default_null_values, is_null_string, DataKind};
use crate::value::Value;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Strings which cast to true by default.
pub const DEFAULT_TRUE_VALUES: &[&str] = &["yes", "y", "true", "t", "1"];

/// Strings which cast to false by default.
pub const DEFAULT_FALSE_VALUES: &[&str] = &["no", "n", "false", "f", "0"];

/// Parse configuration for the Boolean type.
#[derive(Clone, Debug)]
pub struct BooleanOptions {
    null_values: Vec<String>,
    true_values: Vec<String>,
    false_values: Vec<String>,
}

impl BooleanOptions {
    /// Creates boolean options with the default true/false/null strings.
    pub fn new() -> Self {
        Self {
            null_values: default_null_values(),
            true_values: DEFAULT_TRUE_VALUES.iter().map(|s| s.to_string()).collect(),
            false_values: DEFAULT_FALSE_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replaces the set of strings recognized as null.
    pub fn null_values(mut self, values: Vec<String>) -> Self {
        self.null_values = values;
        self
    }

    /// Replaces the set of strings recognized as true.
    pub fn true_values(mut self, values: Vec<String>) -> Self {
        self.true_values = values;
        self
    }

    /// Replaces the set of strings recognized as false.
    pub fn false_values(mut self, values: Vec<String>) -> Self {
        self.false_values = values;
        self
    }

    pub(crate) fn cast_str(&self, raw: &str) -> Result<Value> {
        let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
        let trimmed = cleaned.trim();

        if is_null_string(&self.null_values, trimmed) {
            Ok(Value::Null)
        } else if contains_ignore_case(&self.true_values, trimmed) {
            Ok(Value::Boolean(true))
        } else if contains_ignore_case(&self.false_values, trimmed) {
            Ok(Value::Boolean(false))
        } else {
            Err(Error::cast(raw, DataKind::Boolean))
        }
    }
}

fn contains_ignore_case(values: &[String], s: &str) -> bool {
    values.iter().any(|v| v.eq_ignore_ascii_case(s))
}

impl Default for BooleanOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_cast_true_false() {
        let opts = BooleanOptions::new();
        assert_eq!(opts.cast_str("yes"), Ok(Value::Boolean(true)));
        assert_eq!(opts.cast_str("TRUE"), Ok(Value::Boolean(true)));
        assert_eq!(opts.cast_str("1"), Ok(Value::Boolean(true)));
        assert_eq!(opts.cast_str("no"), Ok(Value::Boolean(false)));
        assert_eq!(opts.cast_str("F"), Ok(Value::Boolean(false)));
        assert_eq!(opts.cast_str("0"), Ok(Value::Boolean(false)));
    }

    #[test]
    fn test_cast_null() {
        let opts = BooleanOptions::new();
        assert_eq!(opts.cast_str(""), Ok(Value::Null));
        assert_eq!(opts.cast_str("N/A"), Ok(Value::Null));
    }

    #[test]
    fn test_cast_failure() {
        let opts = BooleanOptions::new();
        assert!(opts.cast_str("maybe").is_err());
        assert!(opts.cast_str("2").is_err());
    }

    #[test]
    fn test_custom_values() {
        let opts = BooleanOptions::new()
            .true_values(vec!["ja".into()])
            .false_values(vec!["nein".into()]);
        assert_eq!(opts.cast_str("ja"), Ok(Value::Boolean(true)));
        assert_eq!(opts.cast_str("nein"), Ok(Value::Boolean(false)));
        assert!(opts.cast_str("yes").is_err());
    }
}
