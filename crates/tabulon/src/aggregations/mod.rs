//! Column aggregations.
//!
//! An `Aggregation` reduces one column (or the whole table) to a single
//! value. Aggregations validate before running: applying a numeric
//! statistic to a text column fails up front with a `DataType` error, and
//! statistics that exclude nulls say so on the warning channel.
//!
//! The quantile family (`Percentiles`, `Quartiles`, `Quintiles`,
//! `Deciles`) returns an ordered `Quantiles` sequence rather than a single
//! cell, so it lives outside this trait; see the `percentiles` module.

mod bools;
mod count;
mod lengths;
mod mad;
mod mean;
mod median;
mod min_max;
mod mode;
mod percentiles;
mod sum;
mod summary;
mod variance;

pub use bools::{All, Any, HasNulls};
pub use count::Count;
pub use lengths::{MaxLength, MaxPrecision};
pub use mad::Mad;
pub use mean::Mean;
pub use median::Median;
pub use min_max::{Max, Min};
pub use mode::Mode;
pub use percentiles::{Deciles, Iqr, Percentiles, Quantiles, Quartiles, Quintiles};
pub use sum::Sum;
pub use summary::Summary;
pub use variance::{PopulationStDev, PopulationVariance, StDev, Variance};

use crate::column::Column;
use crate::table::Table;
use alloc::vec::Vec;
use rust_decimal::Decimal;
use tabulon_core::warn::{self, Warning};
use tabulon_core::{DataKind, DataType, Error, Result, Value};

/// A column reducer producing one value per table.
pub trait Aggregation {
    /// The short name used in diagnostics and default column naming.
    fn name(&self) -> &'static str;

    /// The type of the produced value.
    fn output_type(&self, table: &Table) -> Result<DataType>;

    /// Checks that this aggregation applies to the table. Runs before any
    /// value is produced.
    fn validate(&self, _table: &Table) -> Result<()> {
        Ok(())
    }

    /// Produces the aggregate value.
    fn run(&self, table: &Table) -> Result<Value>;
}

/// Fetches a column and requires it to hold one of the given kinds.
pub(crate) fn require_column<'t>(
    table: &'t Table,
    name: &str,
    allowed: &[DataKind],
    operation: &str,
) -> Result<Column<'t>> {
    let column = table.column(name)?;
    let kind = column.data_type().kind();

    if !allowed.contains(&kind) {
        return Err(Error::data_type(
            name,
            alloc::format!("{} can not be applied to {} data", operation, kind),
        ));
    }

    Ok(column)
}

/// Reports null exclusion for a statistic over a column containing nulls.
pub(crate) fn warn_null_calculation(column: &Column<'_>, operation: &str) {
    if column.has_nulls() {
        warn::emit(Warning::NullCalculation {
            operation: alloc::string::String::from(operation),
            column: alloc::string::String::from(column.name()),
        });
    }
}

/// Collects the non-null decimals of a column.
pub(crate) fn numbers(column: &Column<'_>) -> Vec<Decimal> {
    column
        .values_without_nulls()
        .filter_map(Value::as_number)
        .collect()
}

/// Computes the median of an already sorted, non-empty decimal slice.
pub(crate) fn median_of_sorted(sorted: &[Decimal]) -> Decimal {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / Decimal::TWO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rust_decimal_macros::dec;
    use tabulon_core::DataType as CoreDataType;

    #[test]
    fn test_require_column_checks_kind() {
        let table = Table::builder()
            .column("t", CoreDataType::text())
            .row(vec![Value::from("x")])
            .build()
            .unwrap();

        assert!(require_column(&table, "t", &[DataKind::Number], "Sum").is_err());
        assert!(require_column(&table, "t", &[DataKind::Text], "MaxLength").is_ok());
        assert!(require_column(&table, "missing", &[DataKind::Text], "MaxLength").is_err());
    }

    #[test]
    fn test_median_of_sorted() {
        assert_eq!(median_of_sorted(&[dec!(1), dec!(2), dec!(3)]), dec!(2));
        assert_eq!(
            median_of_sorted(&[dec!(1), dec!(2), dec!(3), dec!(4)]),
            dec!(2.5)
        );
        assert_eq!(median_of_sorted(&[dec!(7)]), dec!(7));
    }
}
