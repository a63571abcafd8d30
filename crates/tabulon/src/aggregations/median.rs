//! Median.

use crate::aggregations::{median_of_sorted, numbers, require_column, warn_null_calculation, Aggregation};
use crate::table::Table;
use alloc::string::String;
use alloc::vec::Vec;
use chrono::Duration;
use tabulon_core::{DataKind, DataType, Result, Value};

/// The median of a Number or TimeDelta column. Nulls are excluded with a
/// warning; an all-null column yields null. An even count takes the mean
/// of the two middle values.
pub struct Median {
    column: String,
}

impl Median {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Aggregation for Median {
    fn name(&self) -> &'static str {
        "Median"
    }

    fn output_type(&self, table: &Table) -> Result<DataType> {
        Ok(table.column(&self.column)?.data_type().clone())
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
                let mut durations: Vec<Duration> = column
                    .values_without_nulls()
                    .filter_map(Value::as_timedelta)
                    .collect();

                if durations.is_empty() {
                    return Ok(Value::Null);
                }

                durations.sort();
                let n = durations.len();
                let median = if n % 2 == 1 {
                    durations[n / 2]
                } else {
                    (durations[n / 2 - 1] + durations[n / 2]) / 2
                };

                Ok(Value::TimeDelta(median))
            }
            _ => {
                let mut values = numbers(&column);
                if values.is_empty() {
                    return Ok(Value::Null);
                }

                values.sort();
                Ok(Value::Number(median_of_sorted(&values)))
            }
        }
    }
}
