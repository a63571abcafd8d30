//! Relative change between two columns.

use crate::aggregations::require_column;
use crate::computations::Computation;
use crate::table::Table;
use alloc::string::String;
use alloc::vec::Vec;
use rust_decimal::Decimal;
use tabulon_core::{DataKind, DataType, Result, Value};

/// Computes `(after - before) / before * 100` for each row. A null on
/// either side, or a zero `before`, yields null.
pub struct PercentChange {
    before: String,
    after: String,
}

impl PercentChange {
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
        }
    }
}

impl Computation for PercentChange {
    fn output_type(&self, _table: &Table) -> Result<DataType> {
        Ok(DataType::number())
    }

    fn validate(&self, table: &Table) -> Result<()> {
        require_column(table, &self.before, &[DataKind::Number], "PercentChange")?;
        require_column(table, &self.after, &[DataKind::Number], "PercentChange")?;
        Ok(())
    }

    fn run(&self, table: &Table) -> Result<Vec<Value>> {
        let before_index = table.schema().require(&self.before)?;
        let after_index = table.schema().require(&self.after)?;

        let values = table
            .rows()
            .iter()
            .map(|row| {
                let before = row.get(before_index).and_then(Value::as_number);
                let after = row.get(after_index).and_then(Value::as_number);

                match (before, after) {
                    (Some(b), Some(a)) => (a - b)
                        .checked_div(b)
                        .map(|ratio| Value::Number(ratio * Decimal::ONE_HUNDRED))
                        .unwrap_or(Value::Null),
                    _ => Value::Null,
                }
            })
            .collect();

        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rust_decimal_macros::dec;
    use tabulon_core::DataType as T;

    #[test]
    fn test_percent_change() {
        let t = Table::builder()
            .column("before", T::number())
            .column("after", T::number())
            .row(vec![Value::from("50"), Value::from("75")])
            .row(vec![Value::from("0"), Value::from("10")])
            .row(vec![Value::from(""), Value::from("10")])
            .build()
            .unwrap();

        let computed = t
            .compute(&[("change", &PercentChange::new("before", "after"))], false)
            .unwrap();

        assert_eq!(
            computed.rows()[0].get_by_name("change"),
            Some(&Value::Number(dec!(50)))
        );
        // Zero and null denominators yield null.
        assert_eq!(computed.rows()[1].get_by_name("change"), Some(&Value::Null));
        assert_eq!(computed.rows()[2].get_by_name("change"), Some(&Value::Null));
    }

    #[test]
    fn test_percent_change_rejects_text() {
        let t = Table::builder()
            .column("a", T::text())
            .column("b", T::text())
            .row(vec![Value::from("x"), Value::from("y")])
            .build()
            .unwrap();

        assert!(t
            .compute(&[("x", &PercentChange::new("a", "b"))], false)
            .is_err());
    }
}
