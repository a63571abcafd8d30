//! Text type options.

use crate::error::Result;
use crate::types::{default_null_values, is_null_string};
use crate::value::Value;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Parse configuration for the Text type.
#[derive(Clone, Debug)]
pub struct TextOptions {
    null_values: Vec<String>,
    cast_nulls: bool,
}

impl TextOptions {
    /// Creates text options with the default null strings.
    pub fn new() -> Self {
        Self {
            null_values: default_null_values(),
            cast_nulls: true,
        }
    }

    /// Replaces the set of strings recognized as null.
    pub fn null_values(mut self, values: Vec<String>) -> Self {
        self.null_values = values;
        self
    }

    /// When false, null strings are kept as literal text.
    pub fn cast_nulls(mut self, cast_nulls: bool) -> Self {
        self.cast_nulls = cast_nulls;
        self
    }

    pub(crate) fn cast_str(&self, raw: &str) -> Result<Value> {
        let trimmed = raw.trim();

        if self.cast_nulls && is_null_string(&self.null_values, trimmed) {
            return Ok(Value::Null);
        }

        Ok(Value::Text(trimmed.to_string()))
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self::new()
    }
}
