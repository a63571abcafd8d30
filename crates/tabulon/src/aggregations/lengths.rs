//! Text length and decimal precision maxima.

use crate::aggregations::{require_column, Aggregation};
use crate::table::Table;
use alloc::string::String;
use rust_decimal::Decimal;
use tabulon_core::{DataKind, DataType, Result, Value};

/// The length in characters of the longest value of a Text column.
/// Zero when every value is null.
pub struct MaxLength {
    column: String,
}

impl MaxLength {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Aggregation for MaxLength {
    fn name(&self) -> &'static str {
        "MaxLength"
    }

    fn output_type(&self, _table: &Table) -> Result<DataType> {
        Ok(DataType::number())
    }

    fn validate(&self, table: &Table) -> Result<()> {
        require_column(table, &self.column, &[DataKind::Text], self.name())?;
        Ok(())
    }

    fn run(&self, table: &Table) -> Result<Value> {
        let column = require_column(table, &self.column, &[DataKind::Text], self.name())?;
        let longest = column
            .values_without_nulls()
            .filter_map(Value::as_str)
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0);

        Ok(Value::Number(Decimal::from(longest as u64)))
    }
}

/// The most fractional digits found in any value of a Number column.
/// Zero when every value is null.
pub struct MaxPrecision {
    column: String,
}

impl MaxPrecision {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Aggregation for MaxPrecision {
    fn name(&self) -> &'static str {
        "MaxPrecision"
    }

    fn output_type(&self, _table: &Table) -> Result<DataType> {
        Ok(DataType::number())
    }

    fn validate(&self, table: &Table) -> Result<()> {
        require_column(table, &self.column, &[DataKind::Number], self.name())?;
        Ok(())
    }

    fn run(&self, table: &Table) -> Result<Value> {
        let column = require_column(table, &self.column, &[DataKind::Number], self.name())?;
        let precision = column
            .values_without_nulls()
            .filter_map(Value::as_number)
            .map(|d| d.normalize().scale())
            .max()
            .unwrap_or(0);

        Ok(Value::Number(Decimal::from(precision)))
    }
}
