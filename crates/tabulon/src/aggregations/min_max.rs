//! Extremes.

use crate::aggregations::{require_column, Aggregation};
use crate::table::Table;
use alloc::string::String;
use tabulon_core::{DataKind, DataType, Result, Value};

const ORDERED_KINDS: &[DataKind] = &[
    DataKind::Number,
    DataKind::Date,
    DataKind::DateTime,
    DataKind::TimeDelta,
];

/// The smallest non-null value of an orderable column. Null when every
/// value is null.
pub struct Min {
    column: String,
}

impl Min {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Aggregation for Min {
    fn name(&self) -> &'static str {
        "Min"
    }

    fn output_type(&self, table: &Table) -> Result<DataType> {
        Ok(table.column(&self.column)?.data_type().clone())
    }

    fn validate(&self, table: &Table) -> Result<()> {
        require_column(table, &self.column, ORDERED_KINDS, self.name())?;
        Ok(())
    }

    fn run(&self, table: &Table) -> Result<Value> {
        let column = require_column(table, &self.column, ORDERED_KINDS, self.name())?;
        Ok(column
            .values_without_nulls()
            .min()
            .cloned()
            .unwrap_or(Value::Null))
    }
}

/// The largest non-null value of an orderable column. Null when every
/// value is null.
pub struct Max {
    column: String,
}

impl Max {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Aggregation for Max {
    fn name(&self) -> &'static str {
        "Max"
    }

    fn output_type(&self, table: &Table) -> Result<DataType> {
        Ok(table.column(&self.column)?.data_type().clone())
    }

    fn validate(&self, table: &Table) -> Result<()> {
        require_column(table, &self.column, ORDERED_KINDS, self.name())?;
        Ok(())
    }

    fn run(&self, table: &Table) -> Result<Value> {
        let column = require_column(table, &self.column, ORDERED_KINDS, self.name())?;
        Ok(column
            .values_without_nulls()
            .max()
            .cloned()
            .unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rust_decimal_macros::dec;
    use tabulon_core::DataType as T;

    #[test]
    fn test_min_max_numbers() {
        let t = Table::builder()
            .column("n", T::number())
            .row(vec![Value::from("30")])
            .row(vec![Value::from("")])
            .row(vec![Value::from("10")])
            .row(vec![Value::from("20")])
            .build()
            .unwrap();

        assert_eq!(t.aggregate(&Min::new("n")).unwrap(), Value::Number(dec!(10)));
        assert_eq!(t.aggregate(&Max::new("n")).unwrap(), Value::Number(dec!(30)));
    }

    #[test]
    fn test_min_max_dates() {
        let t = Table::builder()
            .column("d", T::date())
            .row(vec![Value::from("2017-05-01")])
            .row(vec![Value::from("2016-01-15")])
            .build()
            .unwrap();

        let min = t.aggregate(&Min::new("d")).unwrap();
        assert_eq!(
            min,
            Value::Date(chrono::NaiveDate::from_ymd_opt(2016, 1, 15).unwrap())
        );
    }

    #[test]
    fn test_min_max_all_null() {
        let t = Table::builder()
            .column("n", T::number())
            .row(vec![Value::from("")])
            .build()
            .unwrap();

        assert_eq!(t.aggregate(&Min::new("n")).unwrap(), Value::Null);
        assert_eq!(t.aggregate(&Max::new("n")).unwrap(), Value::Null);
    }

    #[test]
    fn test_min_rejects_text() {
        let t = Table::builder()
            .column("t", T::text())
            .row(vec![Value::from("x")])
            .build()
            .unwrap();

        assert!(t.aggregate(&Min::new("t")).is_err());
    }
}
