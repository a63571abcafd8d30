//! Median absolute deviation.

use crate::aggregations::{median_of_sorted, numbers, require_column, warn_null_calculation, Aggregation};
use crate::table::Table;
use alloc::string::String;
use alloc::vec::Vec;
use rust_decimal::Decimal;
use tabulon_core::{DataKind, DataType, Result, Value};

/// The median absolute deviation of a Number column: the median of each
/// value's absolute distance from the column median. Nulls are excluded
/// with a warning; an all-null column yields null.
pub struct Mad {
    column: String,
}

impl Mad {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Aggregation for Mad {
    fn name(&self) -> &'static str {
        "MAD"
    }

    fn output_type(&self, _table: &Table) -> Result<DataType> {
        Ok(DataType::number())
    }

    fn validate(&self, table: &Table) -> Result<()> {
        let column = require_column(table, &self.column, &[DataKind::Number], self.name())?;
        warn_null_calculation(&column, self.name());
        Ok(())
    }

    fn run(&self, table: &Table) -> Result<Value> {
        let column = require_column(table, &self.column, &[DataKind::Number], self.name())?;
        let mut values = numbers(&column);

        if values.is_empty() {
            return Ok(Value::Null);
        }

        values.sort();
        let center = median_of_sorted(&values);

        let mut deviations: Vec<Decimal> =
            values.iter().map(|v| (*v - center).abs()).collect();
        deviations.sort();

        Ok(Value::Number(median_of_sorted(&deviations)))
    }
}
