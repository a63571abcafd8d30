//! Percentile ranks.

use crate::aggregations::{require_column, Percentiles};
use crate::computations::Computation;
use crate::table::Table;
use alloc::string::String;
use alloc::vec::Vec;
use rust_decimal::Decimal;
use tabulon_core::{DataKind, DataType, Result, Value};

/// The percentile each value of a Number column falls in, 0 through 100,
/// using the same estimation as the `Percentiles` aggregation. Null
/// values yield null.
pub struct PercentileRank {
    column: String,
}

impl PercentileRank {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Computation for PercentileRank {
    fn output_type(&self, _table: &Table) -> Result<DataType> {
        Ok(DataType::number())
    }

    fn validate(&self, table: &Table) -> Result<()> {
        require_column(table, &self.column, &[DataKind::Number], "PercentileRank")?;
        Ok(())
    }

    fn run(&self, table: &Table) -> Result<Vec<Value>> {
        let quantiles = Percentiles::new(&self.column).run(table)?;
        let column = table.column(&self.column)?;

        let mut values = Vec::with_capacity(table.n_rows());
        for value in column.values() {
            match value.as_number() {
                Some(d) => {
                    let rank = quantiles.locate(d)?;
                    values.push(Value::Number(Decimal::from(rank as u64)));
                }
                None => values.push(Value::Null),
            }
        }

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
    fn test_percentile_rank() {
        let rows = (1..=4i64).map(|i| vec![Value::from(i)]).collect();
        let t = Table::builder()
            .column("n", T::number())
            .rows(rows)
            .build()
            .unwrap();

        let computed = t
            .compute(&[("rank", &PercentileRank::new("n"))], false)
            .unwrap();
        let ranks: Vec<Value> = computed.column("rank").unwrap().values().cloned().collect();

        // Boundaries for 1..4 interpolate at thirds; each value lands at
        // the percentile whose boundary first reaches it.
        assert_eq!(ranks[0], Value::Number(dec!(0)));
        assert_eq!(ranks[3], Value::Number(dec!(100)));
        assert!(ranks[1] > ranks[0] && ranks[1] < ranks[2]);
    }

    #[test]
    fn test_percentile_rank_nulls() {
        let t = Table::builder()
            .column("n", T::number())
            .row(vec![Value::from("1")])
            .row(vec![Value::from("")])
            .row(vec![Value::from("2")])
            .build()
            .unwrap();

        let computed = t
            .compute(&[("rank", &PercentileRank::new("n"))], false)
            .unwrap();
        assert_eq!(computed.rows()[1].get_by_name("rank"), Some(&Value::Null));
    }
}
