//! Row filtering: `filter` and `find`.

use crate::table::Table;
use alloc::sync::Arc;
use alloc::vec::Vec;
use tabulon_core::Row;

impl Table {
    /// Returns a table keeping only the rows the predicate accepts, in
    /// their original order. Kept rows are shared with this table.
    pub fn filter(&self, predicate: impl Fn(&Row) -> bool) -> Table {
        let mut kept_rows: Vec<Arc<Row>> = Vec::new();
        let mut kept_indices: Vec<usize> = Vec::new();

        for (i, row) in self.rows().iter().enumerate() {
            if predicate(row) {
                kept_rows.push(Arc::clone(row));
                kept_indices.push(i);
            }
        }

        let row_names = self.subset_row_names(&kept_indices);
        self.fork(kept_rows, row_names)
    }

    /// Returns the first row the predicate accepts, if any.
    pub fn find(&self, predicate: impl Fn(&Row) -> bool) -> Option<&Arc<Row>> {
        self.rows().iter().find(|row| predicate(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rust_decimal_macros::dec;
    use tabulon_core::{DataType, Value};

    fn table() -> Table {
        Table::builder()
            .column("n", DataType::number())
            .row(vec![Value::from("1")])
            .row(vec![Value::from("")])
            .row(vec![Value::from("3")])
            .build()
            .unwrap()
    }

    #[test]
    fn test_filter() {
        let t = table();
        let filtered = t.filter(|row| !row.get(0).map(Value::is_null).unwrap_or(true));

        assert_eq!(filtered.n_rows(), 2);
        assert_eq!(filtered.rows()[1].get(0), Some(&Value::Number(dec!(3))));
        // Rows are shared, not copied.
        assert!(Arc::ptr_eq(&filtered.rows()[0], &t.rows()[0]));
    }

    #[test]
    fn test_filter_preserves_source() {
        let t = table();
        let _ = t.filter(|_| false);
        assert_eq!(t.n_rows(), 3);
    }

    #[test]
    fn test_find() {
        let t = table();
        let found = t.find(|row| row.get(0) == Some(&Value::Number(dec!(3))));
        assert!(found.is_some());

        let missing = t.find(|row| row.get(0) == Some(&Value::Number(dec!(9))));
        assert!(missing.is_none());
    }
}
