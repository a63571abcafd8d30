//! Arithmetic mean.

use crate::aggregations::{numbers, require_column, warn_null_calculation, Aggregation};
use crate::table::Table;
use alloc::string::String;
use chrono::Duration;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tabulon_core::{DataKind, DataType, Result, Value};

/// The mean of a Number or TimeDelta column. Nulls are excluded with a
/// warning; an all-null column yields null.
pub struct Mean {
    column: String,
}

impl Mean {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Aggregation for Mean {
    fn name(&self) -> &'static str {
        "Mean"
    }

    fn output_type(&self, table: &Table) -> Result<DataType> {
        let column = table.column(&self.column)?;
        Ok(column.data_type().clone())
    }

    fn validate(&self, table: &Table) -> Result<()> {
        let column = require_column(
            table,
            &self.column,
            &[DataKind::Number, DataKind::TimeDelta],
            self.name(),
        )?;
        warn_null_calculation(&column, self.name());
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
                let durations: alloc::vec::Vec<Duration> = column
                    .values_without_nulls()
                    .filter_map(Value::as_timedelta)
                    .collect();

                if durations.is_empty() {
                    return Ok(Value::Null);
                }

                let total_nanos: i64 = durations
                    .iter()
                    .filter_map(|d| d.num_nanoseconds())
                    .sum();
                let count = Decimal::from(durations.len() as u64);
                let mean = (Decimal::from(total_nanos) / count)
                    .round()
                    .to_i64()
                    .unwrap_or(0);

                Ok(Value::TimeDelta(Duration::nanoseconds(mean)))
            }
            _ => {
                let values = numbers(&column);
                if values.is_empty() {
                    return Ok(Value::Null);
                }

                let total: Decimal = values.iter().sum();
                Ok(Value::Number(total / Decimal::from(values.len() as u64)))
            }
        }
    }
}
