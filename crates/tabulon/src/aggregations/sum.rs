//! Summation.

use crate::aggregations::{numbers, require_column, Aggregation};
use crate::table::Table;
use alloc::string::String;
use chrono::Duration;
use rust_decimal::Decimal;
use tabulon_core::{DataKind, DataType, Result, Value};

/// Sums a Number or TimeDelta column. Nulls are excluded; an all-null
/// column sums to zero.
pub struct Sum {
    column: String,
}

impl Sum {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Aggregation for Sum {
    fn name(&self) -> &'static str {
        "Sum"
    }

    fn output_type(&self, table: &Table) -> Result<DataType> {
        let column = table.column(&self.column)?;
        Ok(column.data_type().clone())
    }

    fn validate(&self, table: &Table) -> Result<()> {
        require_column(
            table,
            &self.column,
            &[DataKind::Number, DataKind::TimeDelta],
            self.name(),
        )?;
        Ok(())
    }

    fn run(&self, table: &Table) -> Result<Value> {
        let column = require_column(
            table,
            &self.column,
            &[DataKind::Number, DataKind::TimeDelta],
            self.name(),
        )?;

        match column.data_type().kind() {
            DataKind::TimeDelta => {
                let total = column
                    .values_without_nulls()
                    .filter_map(Value::as_timedelta)
                    .fold(Duration::zero(), |acc, d| acc + d);
                Ok(Value::TimeDelta(total))
            }
            _ => {
                let total: Decimal = numbers(&column).iter().sum();
                Ok(Value::Number(total))
            }
        }
    }
}
