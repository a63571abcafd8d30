//! Dispersion statistics: variance and standard deviation, in sample and
//! population flavors.

use crate::aggregations::{numbers, require_column, warn_null_calculation, Aggregation};
use crate::table::Table;
use alloc::string::String;
use alloc::vec::Vec;
use rust_decimal::{Decimal, MathematicalOps};
use tabulon_core::{DataKind, DataType, Result, Value};

fn sum_squared_deviations(values: &[Decimal]) -> Decimal {
    let count = Decimal::from(values.len() as u64);
    let total: Decimal = values.iter().sum();
    let mean = total / count;

    values
        .iter()
        .map(|v| {
            let deviation = *v - mean;
            deviation * deviation
        })
        .sum()
}

/// Computes a variance with the given denominator adjustment: 1 for the
/// sample flavor, 0 for the population flavor. Null result when there are
/// not enough values.
fn variance_of(table: &Table, column_name: &str, name: &'static str, adjustment: u64) -> Result<Value> {
    let column = require_column(table, column_name, &[DataKind::Number], name)?;
    let values: Vec<Decimal> = numbers(&column);

    if values.is_empty() || values.len() as u64 <= adjustment {
        return Ok(Value::Null);
    }

    let denominator = Decimal::from(values.len() as u64 - adjustment);
    let result = sum_squared_deviations(&values)
        .checked_div(denominator)
        .map(Value::Number)
        .unwrap_or(Value::Null);

    Ok(result)
}

macro_rules! dispersion_aggregation {
    ($(#[$doc:meta])* $type_name:ident, $display_name:literal, $adjustment:literal, $sqrt:literal) => {
        $(#[$doc])*
        pub struct $type_name {
            column: String,
        }

        impl $type_name {
            pub fn new(column: impl Into<String>) -> Self {
                Self {
                    column: column.into(),
                }
            }
        }

        impl Aggregation for $type_name {
            fn name(&self) -> &'static str {
                $display_name
            }

            fn output_type(&self, _table: &Table) -> Result<DataType> {
                Ok(DataType::number())
            }

            fn validate(&self, table: &Table) -> Result<()> {
                let column =
                    require_column(table, &self.column, &[DataKind::Number], self.name())?;
                warn_null_calculation(&column, self.name());
                Ok(())
            }

            fn run(&self, table: &Table) -> Result<Value> {
                let variance = variance_of(table, &self.column, self.name(), $adjustment)?;

                if !$sqrt {
                    return Ok(variance);
                }

                match variance {
                    Value::Number(v) => Ok(v
                        .sqrt()
                        .map(Value::Number)
                        .unwrap_or(Value::Null)),
                    other => Ok(other),
                }
            }
        }
    };
}

dispersion_aggregation!(
    /// The sample variance of a Number column (denominator n - 1). Nulls
    /// are excluded with a warning; fewer than two values yield null.
    Variance,
    "Variance",
    1,
    false
);

dispersion_aggregation!(
    /// The population variance of a Number column (denominator n). Nulls
    /// are excluded with a warning; an all-null column yields null.
    PopulationVariance,
    "PopulationVariance",
    0,
    false
);

dispersion_aggregation!(
    /// The sample standard deviation of a Number column. Nulls are
    /// excluded with a warning; fewer than two values yield null.
    StDev,
    "StDev",
    1,
    true
);

dispersion_aggregation!(
    /// The population standard deviation of a Number column. Nulls are
    /// excluded with a warning; an all-null column yields null.
    PopulationStDev,
    "PopulationStDev",
    0,
    true
);
