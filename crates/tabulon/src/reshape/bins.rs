//! Histograms.

use crate::aggregations::require_column;
use crate::schema::Schema;
use crate::table::Table;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use rust_decimal::Decimal;
use tabulon_core::{DataKind, DataType, Error, Result, Value};

impl Table {
    /// Splits a Number column into `count` equal intervals and counts the
    /// rows in each, returning a two-column table of interval label and
    /// `Count`.
    ///
    /// Intervals are half-open, `[lo-hi)`, except the last, which is
    /// closed. Bounds not supplied are derived from the column: the floor
    /// of the minimum and the ceiling of the maximum. Rows outside the
    /// bounds are counted under an `outside` row and nulls under a null
    /// row, each present only when non-empty.
    pub fn bins(
        &self,
        column: &str,
        count: usize,
        start: Option<Decimal>,
        end: Option<Decimal>,
    ) -> Result<Table> {
        if count == 0 {
            return Err(Error::invalid_operation("bins requires at least one bin"));
        }

        let source = require_column(self, column, &[DataKind::Number], "bins")?;
        let values: Vec<Option<Decimal>> =
            source.values().map(Value::as_number).collect();

        let (start, end) = resolve_bounds(&values, start, end)?;

        // Breakpoints are exact decimals, so interval membership can be
        // tested by comparison instead of division.
        let size = (end - start) / Decimal::from(count as u64);
        let mut breaks = Vec::with_capacity(count + 1);
        for i in 0..=count {
            breaks.push(start + size * Decimal::from(i as u64));
        }

        let mut interval_counts = alloc::vec![0u64; count];
        let mut outside = 0u64;
        let mut nulls = 0u64;

        for value in &values {
            match value {
                None => nulls += 1,
                Some(v) => {
                    if *v < start || *v > end {
                        outside += 1;
                        continue;
                    }
                    let mut i = 0;
                    while i + 1 < count && *v >= breaks[i + 1] {
                        i += 1;
                    }
                    interval_counts[i] += 1;
                }
            }
        }

        let schema = Schema::of(Vec::from([
            (String::from(column), DataType::text()),
            (String::from("Count"), DataType::number()),
        ]))?;

        let mut cell_rows: Vec<Vec<Value>> = Vec::with_capacity(count + 2);
        for (i, &bin_count) in interval_counts.iter().enumerate() {
            let label = interval_label(breaks[i], breaks[i + 1], i + 1 == count);
            cell_rows.push(Vec::from([
                Value::Text(label),
                Value::Number(Decimal::from(bin_count)),
            ]));
        }
        if outside > 0 {
            cell_rows.push(Vec::from([
                Value::Text(String::from("outside")),
                Value::Number(Decimal::from(outside)),
            ]));
        }
        if nulls > 0 {
            cell_rows.push(Vec::from([
                Value::Null,
                Value::Number(Decimal::from(nulls)),
            ]));
        }

        Ok(Table::assemble(schema, cell_rows, None))
    }
}

fn resolve_bounds(
    values: &[Option<Decimal>],
    start: Option<Decimal>,
    end: Option<Decimal>,
) -> Result<(Decimal, Decimal)> {
    let (start, end) = if let (Some(start), Some(end)) = (start, end) {
        (start, end)
    } else {
        let non_null: Vec<Decimal> = values.iter().flatten().copied().collect();
        let min = non_null.iter().min().copied();
        let max = non_null.iter().max().copied();

        match (min, max) {
            (Some(min), Some(max)) => (
                start.unwrap_or_else(|| min.floor()),
                end.unwrap_or_else(|| max.ceil()),
            ),
            _ => {
                return Err(Error::invalid_operation(
                    "bins can not derive bounds from an empty or all-null column",
                ))
            }
        }
    };

    if end <= start {
        // A flat column still gets one meaningful interval.
        return Ok((start, start + Decimal::ONE));
    }

    Ok((start, end))
}

fn interval_label(low: Decimal, high: Decimal, last: bool) -> String {
    let close = if last { "]" } else { ")" };
    format!("[{}-{}{}", low.normalize(), high.normalize(), close)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rust_decimal_macros::dec;
    use tabulon_core::DataType as T;

    fn number_table(values: &[&str]) -> Table {
        let rows = values.iter().map(|v| vec![Value::from(*v)]).collect();
        Table::builder()
            .column("age", T::number())
            .rows(rows)
            .build()
            .unwrap()
    }

    fn counts(table: &Table) -> Vec<Value> {
        table.column("Count").unwrap().values().cloned().collect()
    }

    #[test]
    fn test_bins_explicit_bounds() {
        let t = number_table(&["5", "15", "25", "25", "95"]);
        let binned = t
            .bins("age", 10, Some(dec!(0)), Some(dec!(100)))
            .unwrap();

        assert_eq!(binned.n_rows(), 10);
        assert_eq!(
            binned.rows()[0].get_by_name("age"),
            Some(&Value::from("[0-10)"))
        );
        assert_eq!(
            binned.rows()[9].get_by_name("age"),
            Some(&Value::from("[90-100]"))
        );

        let expected: Vec<Value> = [1, 1, 2, 0, 0, 0, 0, 0, 0, 1]
            .iter()
            .map(|&n| Value::Number(Decimal::from(n as u64)))
            .collect();
        assert_eq!(counts(&binned), expected);
    }

    #[test]
    fn test_bins_totals_match_row_count() {
        let t = number_table(&["1", "2", "3", "", "120", "-5"]);
        let binned = t.bins("age", 4, Some(dec!(0)), Some(dec!(100))).unwrap();

        let total: Decimal = counts(&binned).iter().filter_map(Value::as_number).sum();
        assert_eq!(total, Decimal::from(t.n_rows() as u64));
    }

    #[test]
    fn test_bins_outside_and_null_rows() {
        let t = number_table(&["50", "", "120"]);
        let binned = t.bins("age", 2, Some(dec!(0)), Some(dec!(100))).unwrap();

        assert_eq!(binned.n_rows(), 4);
        assert_eq!(
            binned.rows()[2].get_by_name("age"),
            Some(&Value::from("outside"))
        );
        assert_eq!(binned.rows()[3].get_by_name("age"), Some(&Value::Null));
    }

    #[test]
    fn test_bins_inferred_bounds() {
        let t = number_table(&["0.5", "9.6"]);
        let binned = t.bins("age", 10, None, None).unwrap();

        // floor(0.5) = 0, ceil(9.6) = 10.
        assert_eq!(
            binned.rows()[0].get_by_name("age"),
            Some(&Value::from("[0-1)"))
        );
        assert_eq!(
            binned.rows()[9].get_by_name("age"),
            Some(&Value::from("[9-10]"))
        );
    }

    #[test]
    fn test_bins_closed_last_interval() {
        let t = number_table(&["100"]);
        let binned = t.bins("age", 10, Some(dec!(0)), Some(dec!(100))).unwrap();

        // The maximum lands in the closed last interval, not outside.
        assert_eq!(
            counts(&binned)[9],
            Value::Number(dec!(1))
        );
    }

    #[test]
    fn test_bins_rejects_text() {
        let t = Table::builder()
            .column("t", T::text())
            .row(vec![Value::from("x")])
            .build()
            .unwrap();
        assert!(t.bins("t", 10, None, None).is_err());
    }
}
