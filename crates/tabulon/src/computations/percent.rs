//! Percentages of a total.

use crate::aggregations::{require_column, Aggregation, Sum};
use crate::computations::Computation;
use crate::table::Table;
use alloc::string::String;
use alloc::vec::Vec;
use rust_decimal::Decimal;
use tabulon_core::{DataKind, DataType, Result, Value};

/// Each value of a Number column as a percentage of a total. The total
/// defaults to the column sum. Null values, and every value when the
/// total is zero, yield null.
pub struct Percent {
    column: String,
    total: Option<Decimal>,
}

impl Percent {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            total: None,
        }
    }

    /// Uses an explicit denominator instead of the column sum.
    pub fn of_total(mut self, total: Decimal) -> Self {
        self.total = Some(total);
        self
    }
}

impl Computation for Percent {
    fn output_type(&self, _table: &Table) -> Result<DataType> {
        Ok(DataType::number())
    }

    fn validate(&self, table: &Table) -> Result<()> {
        require_column(table, &self.column, &[DataKind::Number], "Percent")?;
        Ok(())
    }

    fn run(&self, table: &Table) -> Result<Vec<Value>> {
        let total = match self.total {
            Some(total) => total,
            None => Sum::new(&self.column)
                .run(table)?
                .as_number()
                .unwrap_or(Decimal::ZERO),
        };

        let column = table.column(&self.column)?;
        let values = column
            .values()
            .map(|value| match value.as_number() {
                Some(d) => d
                    .checked_div(total)
                    .map(|ratio| Value::Number(ratio * Decimal::ONE_HUNDRED))
                    .unwrap_or(Value::Null),
                None => Value::Null,
            })
            .collect();

        Ok(values)
    }
}
