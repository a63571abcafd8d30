//! Differences between two columns.

use crate::computations::Computation;
use crate::table::Table;
use alloc::string::String;
use alloc::vec::Vec;
use tabulon_core::{DataKind, DataType, Error, Result, Value};

/// Computes `after - before` for each row.
///
/// Both columns must share one of the difference-closed kinds: two Number
/// columns yield Number; Date, DateTime, and TimeDelta columns yield
/// TimeDelta. A null on either side yields null.
pub struct Change {
    before: String,
    after: String,
}

impl Change {
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
        }
    }

    fn kinds(&self, table: &Table) -> Result<(DataKind, DataKind)> {
        let before = table.column(&self.before)?.data_type().kind();
        let after = table.column(&self.after)?.data_type().kind();
        Ok((before, after))
    }
}

const DIFFERENCE_KINDS: &[DataKind] = &[
    DataKind::Number,
    DataKind::Date,
    DataKind::DateTime,
    DataKind::TimeDelta,
];

impl Computation for Change {
    fn output_type(&self, table: &Table) -> Result<DataType> {
        let (before, _) = self.kinds(table)?;
        Ok(match before {
            DataKind::Number => DataType::number(),
            _ => DataType::time_delta(),
        })
    }

    fn validate(&self, table: &Table) -> Result<()> {
        let (before, after) = self.kinds(table)?;

        if !DIFFERENCE_KINDS.contains(&before) {
            return Err(Error::data_type(
                self.before.clone(),
                alloc::format!("Change can not be applied to {} data", before),
            ));
        }
        if before != after {
            return Err(Error::data_type(
                self.after.clone(),
                alloc::format!(
                    "Change requires matching column types; found {} and {}",
                    before, after
                ),
            ));
        }

        Ok(())
    }

    fn run(&self, table: &Table) -> Result<Vec<Value>> {
        let before_index = table.schema().require(&self.before)?;
        let after_index = table.schema().require(&self.after)?;

        let values = table
            .rows()
            .iter()
            .map(|row| {
                let before = row.get(before_index).unwrap_or(&Value::Null);
                let after = row.get(after_index).unwrap_or(&Value::Null);
                difference(before, after)
            })
            .collect();

        Ok(values)
    }
}

fn difference(before: &Value, after: &Value) -> Value {
    match (before, after) {
        (Value::Number(b), Value::Number(a)) => Value::Number(*a - *b),
        (Value::Date(b), Value::Date(a)) => Value::TimeDelta(a.signed_duration_since(*b)),
        (Value::DateTime(b), Value::DateTime(a)) => {
            Value::TimeDelta(a.signed_duration_since(*b))
        }
        (Value::TimeDelta(b), Value::TimeDelta(a)) => Value::TimeDelta(*a - *b),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use chrono::Duration;
    use rust_decimal_macros::dec;
    use tabulon_core::DataType as T;

    #[test]
    fn test_change_numbers() {
        let t = Table::builder()
            .column("before", T::number())
            .column("after", T::number())
            .row(vec![Value::from("1990"), Value::from("2017")])
            .row(vec![Value::from("2"), Value::from("")])
            .build()
            .unwrap();

        let computed = t
            .compute(&[("years", &Change::new("before", "after"))], false)
            .unwrap();

        assert_eq!(
            computed.rows()[0].get_by_name("years"),
            Some(&Value::Number(dec!(27)))
        );
        // Null on either side yields null.
        assert_eq!(computed.rows()[1].get_by_name("years"), Some(&Value::Null));
    }

    #[test]
    fn test_change_dates_yields_timedelta() {
        let t = Table::builder()
            .column("start", T::date())
            .column("end", T::date())
            .row(vec![Value::from("2017-05-01"), Value::from("2017-05-03")])
            .build()
            .unwrap();

        let computed = t
            .compute(&[("elapsed", &Change::new("start", "end"))], false)
            .unwrap();

        assert_eq!(
            computed.rows()[0].get_by_name("elapsed"),
            Some(&Value::TimeDelta(Duration::days(2)))
        );
        assert_eq!(
            computed.column("elapsed").unwrap().data_type().kind(),
            DataKind::TimeDelta
        );
    }

    #[test]
    fn test_change_rejects_mixed_kinds() {
        let t = Table::builder()
            .column("n", T::number())
            .column("d", T::date())
            .row(vec![Value::from("1"), Value::from("2017-05-01")])
            .build()
            .unwrap();

        assert!(t
            .compute(&[("x", &Change::new("n", "d"))], false)
            .is_err());
    }

    #[test]
    fn test_change_rejects_text() {
        let t = Table::builder()
            .column("a", T::text())
            .column("b", T::text())
            .row(vec![Value::from("x"), Value::from("y")])
            .build()
            .unwrap();

        assert!(t
            .compute(&[("x", &Change::new("a", "b"))], false)
            .is_err());
    }
}
