//! Number type options and parsing.

use crate::error::{Error, Result};
use crate::types::{default_null_values, is_null_string, DataKind};
use crate::value::Value;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::str::FromStr;
use rust_decimal::Decimal;

/// Currency symbols stripped from numeric input by default.
const DEFAULT_CURRENCY_SYMBOLS: &[&str] = &["$", "£", "€", "¥", "¢", "₹", "₩"];

/// Parse configuration for the Number type.
///
/// Numbers are stored as exact decimals. The parser strips currency and
/// percent symbols (percent does not divide), drops grouping separators,
/// and accepts a leading or trailing sign.
#[derive(Clone, Debug)]
pub struct NumberOptions {
    null_values: Vec<String>,
    group_symbol: char,
    decimal_symbol: char,
    currency_symbols: Vec<String>,
}

impl NumberOptions {
    /// Creates number options for `1,234.56`-style input.
    pub fn new() -> Self {
        Self {
            null_values: default_null_values(),
            group_symbol: ',',
            decimal_symbol: '.',
            currency_symbols: DEFAULT_CURRENCY_SYMBOLS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Replaces the set of strings recognized as null.
    pub fn null_values(mut self, values: Vec<String>) -> Self {
        self.null_values = values;
        self
    }

    /// Sets the thousands-grouping symbol.
    pub fn group_symbol(mut self, symbol: char) -> Self {
        self.group_symbol = symbol;
        self
    }

    /// Sets the decimal separator symbol.
    pub fn decimal_symbol(mut self, symbol: char) -> Self {
        self.decimal_symbol = symbol;
        self
    }

    /// Replaces the currency symbols stripped from input.
    pub fn currency_symbols(mut self, symbols: Vec<String>) -> Self {
        self.currency_symbols = symbols;
        self
    }

    pub(crate) fn cast_str(&self, raw: &str) -> Result<Value> {
        let mut s = raw.trim();
        s = s.trim_matches('%');

        let mut negative = false;

        if let Some(rest) = s.strip_prefix('-') {
            negative = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('+') {
            s = rest;
        }

        if let Some(rest) = s.strip_suffix('-') {
            negative = true;
            s = rest;
        }

        for symbol in &self.currency_symbols {
            if let Some(rest) = s.strip_prefix(symbol.as_str()) {
                s = rest;
            }
            if let Some(rest) = s.strip_suffix(symbol.as_str()) {
                s = rest;
            }
        }

        let s = s.trim();

        if is_null_string(&self.null_values, s) {
            return Ok(Value::Null);
        }

        // Grouping symbols vanish; the decimal symbol becomes a point. Any
        // leftover punctuation (including a second decimal point) fails the
        // decimal parse below.
        let mut cleaned = String::with_capacity(s.len());

        for ch in s.chars() {
            if ch == self.group_symbol {
                continue;
            } else if ch == self.decimal_symbol {
                cleaned.push('.');
            } else {
                cleaned.push(ch);
            }
        }

        let mut parsed = Decimal::from_str(&cleaned)
            .map_err(|_| Error::cast(raw, DataKind::Number))?;

        if negative {
            parsed.set_sign_negative(true);
        }

        Ok(Value::Number(parsed))
    }
}

impl Default for NumberOptions {
    fn default() -> Self {
        Self::new()
    }
}
