//! Counting.

use crate::aggregations::Aggregation;
use crate::table::Table;
use alloc::string::String;
use rust_decimal::Decimal;
use tabulon_core::{DataType, Result, Value};

/// Counts rows, non-null cells of a column, or occurrences of a specific
/// value (including null) in a column.
pub struct Count {
    column: Option<String>,
    value: Option<Value>,
}

impl Count {
    /// Counts all rows.
    pub fn rows() -> Self {
        Self {
            column: None,
            value: None,
        }
    }

    /// Counts the non-null cells of a column.
    pub fn non_null(column: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            value: None,
        }
    }

    /// Counts occurrences of a value in a column. Counting `Value::Null`
    /// counts the nulls.
    pub fn of(column: impl Into<String>, value: Value) -> Self {
        Self {
            column: Some(column.into()),
            value: Some(value),
        }
    }
}

impl Aggregation for Count {
    fn name(&self) -> &'static str {
        "Count"
    }

    fn output_type(&self, _table: &Table) -> Result<DataType> {
        Ok(DataType::number())
    }

    fn run(&self, table: &Table) -> Result<Value> {
        let count = match (&self.column, &self.value) {
            (None, _) => table.n_rows(),
            (Some(column), None) => table.column(column)?.values_without_nulls().count(),
            (Some(column), Some(value)) => table
                .column(column)?
                .values()
                .filter(|v| *v == value)
                .count(),
        };

        Ok(Value::Number(Decimal::from(count as u64)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rust_decimal_macros::dec;
    use tabulon_core::DataType as T;

    fn table() -> Table {
        Table::builder()
            .column("n", T::number())
            .row(vec![Value::from("1")])
            .row(vec![Value::from("")])
            .row(vec![Value::from("1")])
            .row(vec![Value::from("3")])
            .build()
            .unwrap()
    }

    #[test]
    fn test_count_rows() {
        let t = table();
        assert_eq!(t.aggregate(&Count::rows()).unwrap(), Value::Number(dec!(4)));
    }

    #[test]
    fn test_count_non_null() {
        let t = table();
        assert_eq!(
            t.aggregate(&Count::non_null("n")).unwrap(),
            Value::Number(dec!(3))
        );
    }

    #[test]
    fn test_count_value() {
        let t = table();
        assert_eq!(
            t.aggregate(&Count::of("n", Value::Number(dec!(1)))).unwrap(),
            Value::Number(dec!(2))
        );
    }

    #[test]
    fn test_count_nulls() {
        let t = table();
        assert_eq!(
            t.aggregate(&Count::of("n", Value::Null)).unwrap(),
            Value::Number(dec!(1))
        );
    }

    #[test]
    fn test_count_missing_column() {
        let t = table();
        assert!(t.aggregate(&Count::non_null("missing")).is_err());
    }
}
