//! Column views.
//!
//! A `Column` borrows its parent table and exposes one cell position
//! across all rows. Cells may be null.

use crate::table::Table;
use alloc::vec::Vec;
use tabulon_core::{DataType, Value};

/// Returned for the impossible case of a row narrower than its schema.
static NULL: Value = Value::Null;

/// A typed, immutable view over one column of a table.
#[derive(Clone, Copy)]
pub struct Column<'t> {
    table: &'t Table,
    index: usize,
}

impl<'t> Column<'t> {
    pub(crate) fn new(table: &'t Table, index: usize) -> Self {
        Self { table, index }
    }

    /// Returns the column name.
    pub fn name(&self) -> &'t str {
        &self.table.schema().names()[self.index]
    }

    /// Returns the column type.
    pub fn data_type(&self) -> &'t DataType {
        &self.table.schema().types()[self.index]
    }

    /// Returns the column position in the table.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the number of cells (one per table row).
    pub fn len(&self) -> usize {
        self.table.n_rows()
    }

    /// Returns true if the parent table has no rows.
    pub fn is_empty(&self) -> bool {
        self.table.n_rows() == 0
    }

    /// Returns the cell at the given row position.
    pub fn get(&self, row: usize) -> Option<&'t Value> {
        self.table.rows().get(row)?.get(self.index)
    }

    /// Returns the cell for the given row name, when the table has row
    /// names.
    pub fn get_by_row_name(&self, name: &Value) -> Option<&'t Value> {
        self.table.row_by_name(name)?.get(self.index)
    }

    /// Iterates over the cells in row order.
    pub fn values(&self) -> impl Iterator<Item = &'t Value> + '_ {
        let index = self.index;
        self.table
            .rows()
            .iter()
            .map(move |row| row.get(index).unwrap_or(&NULL))
    }

    /// Iterates over the non-null cells in row order.
    pub fn values_without_nulls(&self) -> impl Iterator<Item = &'t Value> + '_ {
        self.values().filter(|v| !v.is_null())
    }

    /// Returns all cells, sorted. Nulls sort last.
    pub fn values_sorted(&self) -> Vec<Value> {
        let mut values: Vec<Value> = self.values().cloned().collect();
        values.sort();
        values
    }

    /// Returns the non-null cells, sorted.
    pub fn values_without_nulls_sorted(&self) -> Vec<Value> {
        let mut values: Vec<Value> = self.values_without_nulls().cloned().collect();
        values.sort();
        values
    }

    /// Returns true if any cell is null.
    pub fn has_nulls(&self) -> bool {
        self.values().any(|v| v.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RowNames;
    use alloc::vec;
    use rust_decimal_macros::dec;

    fn table() -> Table {
        Table::builder()
            .column("letter", DataType::text())
            .column("number", DataType::number())
            .row(vec![Value::from("a"), Value::from("3")])
            .row(vec![Value::from("b"), Value::from("")])
            .row(vec![Value::from("c"), Value::from("1")])
            .row_names(RowNames::Column("letter".into()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_column_access() {
        let t = table();
        let col = t.column("number").unwrap();

        assert_eq!(col.name(), "number");
        assert_eq!(col.len(), 3);
        assert_eq!(col.get(0), Some(&Value::Number(dec!(3))));
        assert_eq!(col.get(1), Some(&Value::Null));
        assert_eq!(col.get(9), None);
    }

    #[test]
    fn test_column_by_row_name() {
        let t = table();
        let col = t.column("number").unwrap();
        assert_eq!(
            col.get_by_row_name(&Value::from("c")),
            Some(&Value::Number(dec!(1)))
        );
    }

    #[test]
    fn test_values_without_nulls() {
        let t = table();
        let col = t.column("number").unwrap();
        assert_eq!(col.values().count(), 3);
        assert_eq!(col.values_without_nulls().count(), 2);
        assert!(col.has_nulls());
    }

    #[test]
    fn test_values_sorted_places_nulls_last() {
        let t = table();
        let col = t.column("number").unwrap();
        let sorted = col.values_sorted();

        assert_eq!(sorted[0], Value::Number(dec!(1)));
        assert_eq!(sorted[1], Value::Number(dec!(3)));
        assert!(sorted[2].is_null());
    }

    #[test]
    fn test_missing_column_is_error() {
        let t = table();
        assert!(t.column("nope").is_err());
    }
}
