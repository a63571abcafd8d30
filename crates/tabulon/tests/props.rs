//! Property tests for the table invariants: immutability, schema width,
//! ordering, join sizes, and reshaping round trips.

use proptest::collection::vec;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tabulon::aggregations::Count;
use tabulon::{DataType, Join, Table, Value};

/// Builds a one-column Number table from optional integers.
fn number_table(values: &[Option<i64>]) -> Table {
    let rows = values
        .iter()
        .map(|v| {
            vec![match v {
                Some(n) => Value::from(*n),
                None => Value::Null,
            }]
        })
        .collect();

    Table::builder()
        .column("n", DataType::number())
        .rows(rows)
        .build()
        .unwrap()
}

fn cell_matrix(table: &Table) -> Vec<Vec<Value>> {
    table.rows().iter().map(|r| r.values().to_vec()).collect()
}

proptest! {
    #[test]
    fn transformations_leave_the_source_untouched(
        values in vec(proptest::option::of(-1000i64..1000), 0..50),
    ) {
        let table = number_table(&values);
        let before = cell_matrix(&table);

        let _ = table.order_by("n", false).unwrap();
        let _ = table.filter(|row| row.get(0).map(|v| !v.is_null()).unwrap_or(false));
        let _ = table.distinct(None).unwrap();
        let _ = table.limit(3);

        prop_assert_eq!(cell_matrix(&table), before);
    }

    #[test]
    fn every_row_matches_schema_width(
        values in vec(proptest::option::of(-1000i64..1000), 1..50),
    ) {
        let table = number_table(&values);
        let sorted = table.order_by("n", true).unwrap();
        let distinct = table.distinct(None).unwrap();

        for derived in [&table, &sorted, &distinct] {
            for row in derived.rows() {
                prop_assert_eq!(row.len(), derived.n_columns());
            }
        }
    }

    #[test]
    fn order_by_is_stable_and_idempotent(
        values in vec(proptest::option::of(-100i64..100), 0..60),
        reverse in any::<bool>(),
    ) {
        let table = number_table(&values);
        let once = table.order_by("n", reverse).unwrap();
        let twice = once.order_by("n", reverse).unwrap();

        prop_assert_eq!(cell_matrix(&once), cell_matrix(&twice));
    }

    #[test]
    fn nulls_sort_last_in_both_directions(
        values in vec(proptest::option::of(-100i64..100), 0..60),
        reverse in any::<bool>(),
    ) {
        let table = number_table(&values);
        let sorted = table.order_by("n", reverse).unwrap();

        let mut seen_null = false;
        for row in sorted.rows() {
            let is_null = row.get(0).map(Value::is_null).unwrap_or(true);
            if seen_null {
                prop_assert!(is_null, "a value followed a null after sorting");
            }
            seen_null = seen_null || is_null;
        }
    }

    #[test]
    fn left_outer_join_keeps_every_left_row(
        left_keys in vec(0i64..20, 0..30),
        right_keys in vec(0i64..20, 0..30),
    ) {
        let left = number_table(&left_keys.iter().copied().map(Some).collect::<Vec<_>>());
        let right = number_table(&right_keys.iter().copied().map(Some).collect::<Vec<_>>());

        let outer = left.join(&right, Join::on("n")).unwrap();
        prop_assert!(outer.n_rows() >= left.n_rows());

        // The inner join size is the sum over matching keys of the
        // product of per-side multiplicities.
        let inner = left.join(&right, Join::on("n").inner()).unwrap();
        let expected: usize = left_keys
            .iter()
            .map(|k| right_keys.iter().filter(|r| r == &k).count())
            .sum();
        prop_assert_eq!(inner.n_rows(), expected);
    }

    #[test]
    fn bins_counts_sum_to_row_count(
        values in vec(proptest::option::of(-50i64..150), 1..60),
    ) {
        let table = number_table(&values);
        let binned = table
            .bins(
                "n",
                10,
                Some(Decimal::from(0)),
                Some(Decimal::from(100)),
            )
            .unwrap();

        let total: Decimal = binned
            .column("Count")
            .unwrap()
            .values()
            .filter_map(Value::as_number)
            .sum();
        prop_assert_eq!(total, Decimal::from(table.n_rows() as u64));
    }

    #[test]
    fn group_by_members_share_the_source_schema(
        values in vec(0i64..5, 1..40),
    ) {
        let table = number_table(&values.iter().copied().map(Some).collect::<Vec<_>>());
        let groups = table.group_by("n", None, None).unwrap();

        for (_, member) in groups.iter_tables() {
            prop_assert!(member.schema().matches(table.schema()));
        }

        // Grouping partitions the rows.
        let merged = groups.merge().unwrap();
        prop_assert_eq!(merged.n_rows(), table.n_rows());
    }

    #[test]
    fn normalize_denormalize_round_trips(
        rows in vec((0i64..1000, 0i64..1000), 1..20),
    ) {
        let table = Table::builder()
            .column("k", DataType::text())
            .column("x", DataType::number())
            .column("y", DataType::number())
            .rows(
                rows.iter()
                    .enumerate()
                    .map(|(i, (x, y))| {
                        vec![
                            Value::from(format!("row{}", i)),
                            Value::from(*x),
                            Value::from(*y),
                        ]
                    })
                    .collect(),
            )
            .build()
            .unwrap();

        let round_tripped = table
            .normalize(&["k"], &["x", "y"], "property", "value")
            .unwrap()
            .denormalize(&["k"], "property", "value", None)
            .unwrap();

        prop_assert_eq!(round_tripped.column_names(), table.column_names());
        prop_assert_eq!(cell_matrix(&round_tripped), cell_matrix(&table));
    }

    #[test]
    fn pivot_matches_group_by_count(
        values in vec(0i64..5, 1..40),
    ) {
        let table = number_table(&values.iter().copied().map(Some).collect::<Vec<_>>());

        let pivoted = table
            .pivot("n", &tabulon::PivotOptions::new())
            .unwrap();
        let grouped = table
            .group_by("n", None, None)
            .unwrap()
            .aggregate(&[("Count", &Count::rows())])
            .unwrap();

        prop_assert_eq!(cell_matrix(&pivoted), cell_matrix(&grouped));
    }
}
