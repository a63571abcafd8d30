//! Pivoting.

use crate::aggregations::{Aggregation, Count};
use crate::computations::Computation;
use crate::key::Key;
use crate::table::Table;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use rust_decimal::Decimal;
use tabulon_core::{DataKind, Error, Result, Value};

/// Options for `Table::pivot`.
///
/// The default pivots with a row count and no column axis.
pub struct PivotOptions {
    columns: Option<String>,
    aggregation: Option<Box<dyn Aggregation>>,
    computation: Option<(String, Box<dyn Computation>)>,
    default_value: Option<Value>,
    key_name: Option<String>,
}

impl PivotOptions {
    pub fn new() -> Self {
        Self {
            columns: None,
            aggregation: None,
            computation: None,
            default_value: None,
            key_name: None,
        }
    }

    /// Pivots the distinct values of the named column into output
    /// columns.
    pub fn columns(mut self, name: impl Into<String>) -> Self {
        self.columns = Some(name.into());
        self
    }

    /// Aggregates each group with the given aggregation instead of a row
    /// count.
    pub fn aggregation(mut self, aggregation: impl Aggregation + 'static) -> Self {
        self.aggregation = Some(Box::new(aggregation));
        self
    }

    /// Applies a row-wise computation to the aggregated table, replacing
    /// the aggregation column with the named output.
    pub fn computation(
        mut self,
        name: impl Into<String>,
        computation: impl Computation + 'static,
    ) -> Self {
        self.computation = Some((name.into(), Box::new(computation)));
        self
    }

    /// Fills absent cells with this value instead of the aggregation's
    /// zero identity.
    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Names the key column produced by a function key.
    pub fn key_name(mut self, name: impl Into<String>) -> Self {
        self.key_name = Some(name.into());
        self
    }
}

impl Default for PivotOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    /// Groups by the key (or keys), aggregates each group, and, when a
    /// column axis is set, spreads its distinct values into one output
    /// column per value. Absent cells take the aggregation's zero
    /// identity for numeric outputs and null otherwise.
    pub fn pivot(&self, key: impl Into<Key>, options: &PivotOptions) -> Result<Table> {
        let key = key.into();

        // Successive groupings, one per key column.
        let (key_names, mut groups) = match &key {
            Key::Columns(names) => {
                if options.key_name.is_some() {
                    return Err(Error::invalid_operation(
                        "key_name is not valid for a multi-column pivot key",
                    ));
                }
                let first = names.first().ok_or_else(|| {
                    Error::invalid_operation("pivot requires at least one key column")
                })?;

                let mut groups = self.group_by(Key::Column(first.clone()), None, None)?;
                for name in &names[1..] {
                    groups = groups.group_by(Key::Column(name.clone()), None, None)?;
                }
                (names.clone(), groups)
            }
            Key::Column(name) => {
                let key_name = options.key_name.clone().unwrap_or_else(|| name.clone());
                let groups = self.group_by(key.clone(), Some(&key_name), None)?;
                (Vec::from([key_name]), groups)
            }
            Key::Function(_) => {
                let key_name = options
                    .key_name
                    .clone()
                    .unwrap_or_else(|| String::from("group"));
                let groups = self.group_by(key.clone(), Some(&key_name), None)?;
                (Vec::from([key_name]), groups)
            }
        };

        let default_aggregation;
        let aggregation: &dyn Aggregation = match &options.aggregation {
            Some(aggregation) => aggregation.as_ref(),
            None => {
                default_aggregation = Count::rows();
                &default_aggregation
            }
        };
        let aggregation_name = aggregation.name();

        match &options.columns {
            Some(pivot_column) => {
                groups = groups.group_by(Key::Column(pivot_column.clone()), None, None)?;
                let aggregated = groups.aggregate(&[(aggregation_name, aggregation)])?;

                let (aggregated, value_column) =
                    apply_computation(aggregated, aggregation_name, options)?;

                let default = match &options.default_value {
                    Some(value) => Some(value.clone()),
                    None => {
                        let kind = aggregated.column(&value_column)?.data_type().kind();
                        if kind == DataKind::Number {
                            Some(Value::Number(Decimal::ZERO))
                        } else {
                            None
                        }
                    }
                };

                let key_refs: Vec<&str> = key_names.iter().map(|n| n.as_str()).collect();
                aggregated.denormalize(&key_refs, pivot_column, &value_column, default)
            }
            None => {
                let aggregated = groups.aggregate(&[(aggregation_name, aggregation)])?;
                let (aggregated, _) = apply_computation(aggregated, aggregation_name, options)?;
                Ok(aggregated)
            }
        }
    }
}

/// Runs the optional pivot computation against the aggregated table,
/// dropping the aggregation column it replaces. Returns the table and
/// the name of the value column.
fn apply_computation(
    aggregated: Table,
    aggregation_name: &str,
    options: &PivotOptions,
) -> Result<(Table, String)> {
    match &options.computation {
        Some((name, computation)) => {
            let computed = aggregated.compute(&[(name.as_str(), computation.as_ref())], false)?;
            let trimmed = computed.exclude(&[aggregation_name])?;
            Ok((trimmed, name.clone()))
        }
        None => Ok((aggregated, String::from(aggregation_name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregations::Sum;
    use crate::computations::Percent;
    use alloc::vec;
    use rust_decimal_macros::dec;
    use tabulon_core::DataType as T;

    fn table() -> Table {
        Table::builder()
            .column("race", T::text())
            .column("gender", T::text())
            .column("age", T::number())
            .row(vec![Value::from("white"), Value::from("male"), Value::from("20")])
            .row(vec![Value::from("white"), Value::from("female"), Value::from("30")])
            .row(vec![Value::from("black"), Value::from("male"), Value::from("40")])
            .row(vec![Value::from("white"), Value::from("male"), Value::from("25")])
            .build()
            .unwrap()
    }

    #[test]
    fn test_pivot_single_key_counts() {
        let pivoted = table().pivot("race", &PivotOptions::new()).unwrap();

        assert_eq!(pivoted.column_names(), &["race", "Count"]);
        assert_eq!(
            pivoted.rows()[0].values(),
            &[Value::from("white"), Value::Number(dec!(3))]
        );
        assert_eq!(
            pivoted.rows()[1].values(),
            &[Value::from("black"), Value::Number(dec!(1))]
        );
    }

    #[test]
    fn test_pivot_matches_group_by_aggregate() {
        let pivoted = table().pivot("race", &PivotOptions::new()).unwrap();
        let grouped = table()
            .group_by("race", None, None)
            .unwrap()
            .aggregate(&[("Count", &Count::rows())])
            .unwrap();

        assert_eq!(pivoted.column_names(), grouped.column_names());
        for (a, b) in pivoted.rows().iter().zip(grouped.rows().iter()) {
            assert_eq!(a.values(), b.values());
        }
    }

    #[test]
    fn test_pivot_rows_and_columns_with_sum() {
        let pivoted = table()
            .pivot(
                "race",
                &PivotOptions::new()
                    .columns("gender")
                    .aggregation(Sum::new("age")),
            )
            .unwrap();

        assert_eq!(pivoted.column_names(), &["race", "male", "female"]);
        assert_eq!(
            pivoted.rows()[0].values(),
            &[
                Value::from("white"),
                Value::Number(dec!(45)),
                Value::Number(dec!(30))
            ]
        );
        // Empty cells take the aggregation's zero identity.
        assert_eq!(
            pivoted.rows()[1].values(),
            &[
                Value::from("black"),
                Value::Number(dec!(40)),
                Value::Number(dec!(0))
            ]
        );
    }

    #[test]
    fn test_pivot_with_computation() {
        let pivoted = table()
            .pivot(
                "race",
                &PivotOptions::new().computation("percent", Percent::new("Count")),
            )
            .unwrap();

        assert_eq!(pivoted.column_names(), &["race", "percent"]);
        assert_eq!(
            pivoted.rows()[0].get_by_name("percent"),
            Some(&Value::Number(dec!(75)))
        );
    }

    #[test]
    fn test_pivot_multi_key() {
        let pivoted = table()
            .pivot(vec!["race", "gender"], &PivotOptions::new())
            .unwrap();

        assert_eq!(pivoted.column_names(), &["race", "gender", "Count"]);
        // white/male, white/female, black/male.
        assert_eq!(pivoted.n_rows(), 3);
    }

    #[test]
    fn test_pivot_function_key() {
        let pivoted = table()
            .pivot(
                Key::function(|row| {
                    row.get_by_name("gender").cloned().unwrap_or(Value::Null)
                }),
                &PivotOptions::new().key_name("gender"),
            )
            .unwrap();

        assert_eq!(pivoted.column_names(), &["gender", "Count"]);
        assert_eq!(pivoted.n_rows(), 2);
    }
}
