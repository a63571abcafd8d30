//! Mode.

use crate::aggregations::{numbers, require_column, warn_null_calculation, Aggregation};
use crate::table::Table;
use alloc::string::String;
use hashbrown::HashMap;
use rust_decimal::Decimal;
use tabulon_core::{DataKind, DataType, Result, Value};

/// The most frequent value of a Number column. Nulls are excluded with a
/// warning; an all-null column yields null. When several values tie, the
/// smallest wins.
pub struct Mode {
    column: String,
}

impl Mode {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Aggregation for Mode {
    fn name(&self) -> &'static str {
        "Mode"
    }

    fn output_type(&self, table: &Table) -> Result<DataType> {
        Ok(table.column(&self.column)?.data_type().clone())
    }

    fn validate(&self, table: &Table) -> Result<()> {
        let column = require_column(table, &self.column, &[DataKind::Number], self.name())?;
        warn_null_calculation(&column, self.name());
        Ok(())
    }

    fn run(&self, table: &Table) -> Result<Value> {
        let column = require_column(table, &self.column, &[DataKind::Number], self.name())?;
        let values = numbers(&column);

        if values.is_empty() {
            return Ok(Value::Null);
        }

        let mut counts: HashMap<Decimal, usize> = HashMap::new();
        for value in &values {
            *counts.entry(*value).or_insert(0) += 1;
        }

        let mut best: Option<(Decimal, usize)> = None;
        for (value, count) in counts {
            best = match best {
                None => Some((value, count)),
                Some((best_value, best_count)) => {
                    if count > best_count || (count == best_count && value < best_value) {
                        Some((value, count))
                    } else {
                        Some((best_value, best_count))
                    }
                }
            };
        }

        match best {
            Some((value, _)) => Ok(Value::Number(value)),
            None => Ok(Value::Null),
        }
    }
}
