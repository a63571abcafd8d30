//! The quantile family: percentiles, quartiles, quintiles, deciles, and
//! the interquartile range.
//!
//! Quantile estimation interpolates linearly between the two closest
//! ranks of the sorted non-null values. Except for `Iqr`, these produce an
//! ordered `Quantiles` sequence rather than a single cell, so they do not
//! implement the `Aggregation` trait and cannot appear in
//! `TableSet::aggregate` specs.

use crate::aggregations::{numbers, require_column, warn_null_calculation, Aggregation};
use crate::table::Table;
use alloc::string::String;
use alloc::vec::Vec;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tabulon_core::{DataKind, DataType, Error, Result, Value};

/// An ordered sequence of quantile boundary values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quantiles {
    values: Vec<Decimal>,
}

impl Quantiles {
    /// Returns the boundary values in order.
    #[inline]
    pub fn values(&self) -> &[Decimal] {
        &self.values
    }

    /// Returns the boundary at the given index.
    pub fn get(&self, index: usize) -> Option<Decimal> {
        self.values.get(index).copied()
    }

    /// Returns the number of boundaries.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no boundaries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Identifies which bin a value belongs to: the largest index whose
    /// boundary does not exceed the value. A value outside the boundary
    /// range is an error.
    pub fn locate(&self, value: Decimal) -> Result<usize> {
        let first = self
            .values
            .first()
            .ok_or_else(|| Error::invalid_operation("no quantiles computed"))?;
        let last = self.values[self.values.len() - 1];

        if value < *first {
            return Err(Error::invalid_operation(
                "value is less than the minimum quantile value",
            ));
        }
        if value > last {
            return Err(Error::invalid_operation(
                "value is greater than the maximum quantile value",
            ));
        }
        if value == last {
            return Ok(self.values.len() - 1);
        }

        let mut i = 0;
        while value >= self.values[i + 1] {
            i += 1;
        }

        Ok(i)
    }
}

/// Computes the 101 percentile boundaries (0 through 100) of a Number
/// column by linear interpolation.
fn percentile_values(table: &Table, column_name: &str, operation: &str) -> Result<Vec<Decimal>> {
    let column = require_column(table, column_name, &[DataKind::Number], operation)?;
    warn_null_calculation(&column, operation);

    let mut sorted = numbers(&column);
    if sorted.is_empty() {
        return Err(Error::invalid_operation(alloc::format!(
            "{} can not be computed for an empty or all-null column",
            operation
        )));
    }
    sorted.sort();

    let n = sorted.len();
    let mut boundaries = Vec::with_capacity(101);

    for p in 0..=100u32 {
        let rank = Decimal::from(p) / Decimal::ONE_HUNDRED * Decimal::from((n - 1) as u64);
        let low = rank.floor().to_usize().unwrap_or(0);
        let fraction = rank - rank.floor();

        let value = if fraction.is_zero() || low + 1 >= n {
            sorted[low]
        } else {
            sorted[low] + fraction * (sorted[low + 1] - sorted[low])
        };

        boundaries.push(value);
    }

    Ok(boundaries)
}

fn quantile_steps(table: &Table, column: &str, operation: &str, step: usize) -> Result<Quantiles> {
    let percentiles = percentile_values(table, column, operation)?;
    let values = (0..=100)
        .step_by(step)
        .map(|p| percentiles[p])
        .collect();
    Ok(Quantiles { values })
}

/// The percentiles of a Number column: 101 boundaries, 0 through 100.
pub struct Percentiles {
    column: String,
}

impl Percentiles {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    /// Computes the percentile boundaries.
    pub fn run(&self, table: &Table) -> Result<Quantiles> {
        quantile_steps(table, &self.column, "Percentiles", 1)
    }
}

/// The quartiles of a Number column: 5 boundaries, 0 through 4.
pub struct Quartiles {
    column: String,
}

impl Quartiles {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    /// Computes the quartile boundaries.
    pub fn run(&self, table: &Table) -> Result<Quantiles> {
        quantile_steps(table, &self.column, "Quartiles", 25)
    }
}

/// The quintiles of a Number column: 6 boundaries, 0 through 5.
pub struct Quintiles {
    column: String,
}

impl Quintiles {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    /// Computes the quintile boundaries.
    pub fn run(&self, table: &Table) -> Result<Quantiles> {
        quantile_steps(table, &self.column, "Quintiles", 20)
    }
}

/// The deciles of a Number column: 11 boundaries, 0 through 10.
pub struct Deciles {
    column: String,
}

impl Deciles {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    /// Computes the decile boundaries.
    pub fn run(&self, table: &Table) -> Result<Quantiles> {
        quantile_steps(table, &self.column, "Deciles", 10)
    }
}

/// The interquartile range of a Number column: the 75th percentile minus
/// the 25th. A scalar, so usable anywhere an `Aggregation` is.
pub struct Iqr {
    column: String,
}

impl Iqr {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Aggregation for Iqr {
    fn name(&self) -> &'static str {
        "IQR"
    }

    fn output_type(&self, _table: &Table) -> Result<DataType> {
        Ok(DataType::number())
    }

    fn validate(&self, table: &Table) -> Result<()> {
        require_column(table, &self.column, &[DataKind::Number], self.name())?;
        Ok(())
    }

    fn run(&self, table: &Table) -> Result<Value> {
        let percentiles = percentile_values(table, &self.column, self.name())?;
        Ok(Value::Number(percentiles[75] - percentiles[25]))
    }
}
