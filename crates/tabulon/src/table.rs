//! The `Table` type: an immutable dataset of named, typed columns over
//! ordered rows.
//!
//! Tables are constructed once and never change. Every operation
//! (`select`, `filter`, `order_by`, `join`, ...) returns a new `Table`.
//! Derived tables share row objects with their ancestors whenever no cell
//! changes; operations that produce new cells build replacement rows.

use crate::column::Column;
use crate::schema::Schema;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp::Ordering;
use tabulon_core::warn::{self, Warning};
use tabulon_core::{DataType, Error, KeyIndex, Result, Row, TypeTester, Value};

/// How row names are produced at construction.
pub enum RowNames {
    /// Explicit names, one per row.
    Values(Vec<Value>),
    /// Names copied from the named column.
    Column(String),
    /// Names computed from each row.
    Function(alloc::boxed::Box<dyn Fn(&Row) -> Value>),
}

/// An immutable table of typed columns over ordered rows.
#[derive(Clone, Debug)]
pub struct Table {
    schema: Schema,
    rows: Vec<Arc<Row>>,
    row_names: Option<Arc<KeyIndex<Value>>>,
}

impl Table {
    /// Starts building a table column by column.
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// Creates a table from raw rows.
    ///
    /// Missing column names are letter-named and duplicates suffixed, with
    /// warnings. Every cell is cast through its column's type; a failed
    /// cast aborts construction naming the row and column. Rows shorter
    /// than the schema pad with nulls, longer rows truncate, each with a
    /// warning.
    pub fn new(
        rows: Vec<Vec<Value>>,
        column_names: Vec<Option<String>>,
        column_types: Vec<DataType>,
        row_names: Option<RowNames>,
    ) -> Result<Self> {
        let schema = Schema::build(column_names, column_types)?;
        Self::from_schema(schema, rows, row_names)
    }

    /// Creates a table by inferring column types from the raw rows.
    pub fn infer(
        rows: Vec<Vec<Value>>,
        column_names: Vec<Option<String>>,
        tester: &TypeTester,
        row_names: Option<RowNames>,
    ) -> Result<Self> {
        let names = crate::schema::resolve_names(column_names);
        let types = tester.run(&rows, &names);
        let schema = Schema::build(names.into_iter().map(Some).collect(), types)?;
        Self::from_schema(schema, rows, row_names)
    }

    /// Casts raw rows through an already built schema.
    pub(crate) fn from_schema(
        schema: Schema,
        raw_rows: Vec<Vec<Value>>,
        row_names: Option<RowNames>,
    ) -> Result<Self> {
        let name_index = Arc::clone(schema.name_index());
        let mut rows: Vec<Arc<Row>> = Vec::with_capacity(raw_rows.len());

        for (i, raw) in raw_rows.into_iter().enumerate() {
            rows.push(cast_raw_row(&schema, &name_index, raw, i)?);
        }

        let row_names = match row_names {
            Some(spec) => Some(build_row_names(spec, &schema, &rows)?),
            None => None,
        };

        Ok(Self {
            schema,
            rows,
            row_names,
        })
    }

    /// Builds a table from already cast cells, skipping re-validation.
    /// Used by operations whose outputs are known to respect the schema.
    pub(crate) fn assemble(
        schema: Schema,
        cell_rows: Vec<Vec<Value>>,
        row_names: Option<Arc<KeyIndex<Value>>>,
    ) -> Self {
        let name_index = Arc::clone(schema.name_index());
        let rows = cell_rows
            .into_iter()
            .map(|cells| Arc::new(Row::new(Arc::clone(&name_index), cells)))
            .collect();

        Self {
            schema,
            rows,
            row_names,
        }
    }

    /// Creates a derived table sharing this table's schema and the given
    /// row objects. No cell is re-cast.
    pub(crate) fn fork(
        &self,
        rows: Vec<Arc<Row>>,
        row_names: Option<Arc<KeyIndex<Value>>>,
    ) -> Self {
        Self {
            schema: self.schema.clone(),
            rows,
            row_names,
        }
    }

    /// Returns the schema.
    #[inline]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the column names in order.
    #[inline]
    pub fn column_names(&self) -> &[String] {
        self.schema.names()
    }

    /// Returns the column types in order.
    #[inline]
    pub fn column_types(&self) -> &[DataType] {
        self.schema.types()
    }

    /// Returns the number of rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns.
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.schema.len()
    }

    /// Returns the rows in order.
    #[inline]
    pub fn rows(&self) -> &[Arc<Row>] {
        &self.rows
    }

    /// Returns the row at the given position.
    pub fn row(&self, index: usize) -> Option<&Arc<Row>> {
        self.rows.get(index)
    }

    /// Returns the row stored under the given row name.
    pub fn row_by_name(&self, name: &Value) -> Option<&Arc<Row>> {
        let index = self.row_names.as_ref()?.position(name)?;
        self.rows.get(index)
    }

    /// Returns the row names in order, if this table has them.
    pub fn row_names(&self) -> Option<&[Value]> {
        self.row_names.as_ref().map(|n| n.keys())
    }

    /// Returns the shared row-name index, if any.
    pub(crate) fn row_name_index(&self) -> Option<&Arc<KeyIndex<Value>>> {
        self.row_names.as_ref()
    }

    /// Returns a copy of this table with row names computed per `spec`.
    pub fn with_row_names(self, spec: RowNames) -> Result<Table> {
        let row_names = Some(build_row_names(spec, &self.schema, &self.rows)?);
        Ok(Table { row_names, ..self })
    }

    /// Returns a copy of this table without row names.
    pub fn without_row_names(self) -> Table {
        Table {
            row_names: None,
            ..self
        }
    }

    /// Builds the row-name index for a row subset, given the kept source
    /// positions in output order. None when this table has no row names.
    pub(crate) fn subset_row_names(&self, kept: &[usize]) -> Option<Arc<KeyIndex<Value>>> {
        let names = self.row_names.as_ref()?;
        let subset: Vec<Value> = kept
            .iter()
            .filter_map(|&i| names.keys().get(i).cloned())
            .collect();

        // A subset of unique keys stays unique.
        KeyIndex::new(subset).ok().map(Arc::new)
    }

    /// Returns a view over the named column.
    pub fn column(&self, name: &str) -> Result<Column<'_>> {
        let index = self.schema.require(name)?;
        Ok(Column::new(self, index))
    }

    /// Returns a view over the column at the given position.
    pub fn column_at(&self, index: usize) -> Option<Column<'_>> {
        if index < self.schema.len() {
            Some(Column::new(self, index))
        } else {
            None
        }
    }

    /// Iterates over all column views in order.
    pub fn columns(&self) -> impl Iterator<Item = Column<'_>> {
        (0..self.schema.len()).map(move |i| Column::new(self, i))
    }
}

/// Pads or truncates a raw row to the schema width (with a warning),
/// casts every cell through its column type, and wraps the result.
pub(crate) fn cast_raw_row(
    schema: &Schema,
    name_index: &Arc<KeyIndex<String>>,
    mut raw: Vec<Value>,
    row_index: usize,
) -> Result<Arc<Row>> {
    let width = schema.len();

    match raw.len().cmp(&width) {
        Ordering::Less => {
            warn::emit(Warning::RowLength {
                row: row_index,
                expected: width,
                actual: raw.len(),
            });
            raw.resize(width, Value::Null);
        }
        Ordering::Greater => {
            warn::emit(Warning::RowLength {
                row: row_index,
                expected: width,
                actual: raw.len(),
            });
            raw.truncate(width);
        }
        Ordering::Equal => {}
    }

    let mut cells = Vec::with_capacity(width);
    for (j, cell) in raw.iter().enumerate() {
        let cast = schema.types()[j]
            .cast(cell)
            .map_err(|e| e.at(row_index, schema.names()[j].clone()))?;
        cells.push(cast);
    }

    Ok(Arc::new(Row::new(Arc::clone(name_index), cells)))
}

fn build_row_names(
    spec: RowNames,
    schema: &Schema,
    rows: &[Arc<Row>],
) -> Result<Arc<KeyIndex<Value>>> {
    let values: Vec<Value> = match spec {
        RowNames::Values(values) => {
            if values.len() != rows.len() {
                return Err(Error::invalid_row_names(alloc::format!(
                    "{} row names for {} rows",
                    values.len(),
                    rows.len()
                )));
            }
            values
        }
        RowNames::Column(name) => {
            let index = schema.require(&name)?;
            rows.iter()
                .map(|row| row.get(index).cloned().unwrap_or(Value::Null))
                .collect()
        }
        RowNames::Function(f) => rows.iter().map(|row| f(row)).collect(),
    };

    // Numbers are reserved for positional access.
    if values.iter().any(|v| matches!(v, Value::Number(_))) {
        return Err(Error::invalid_row_names("row names may not be numbers"));
    }

    KeyIndex::new(values)
        .map(Arc::new)
        .map_err(|_| Error::invalid_row_names("row names must be unique"))
}

/// Builder for creating tables column by column.
///
/// ```rust
/// use tabulon::{DataType, Table, Value};
///
/// let table = Table::builder()
///     .column("letter", DataType::text())
///     .column("number", DataType::number())
///     .row(vec![Value::from("a"), Value::from("1")])
///     .row(vec![Value::from("b"), Value::from("2")])
///     .build()
///     .unwrap();
///
/// assert_eq!(table.n_rows(), 2);
/// ```
pub struct TableBuilder {
    columns: Vec<(Option<String>, DataType)>,
    rows: Vec<Vec<Value>>,
    row_names: Option<RowNames>,
}

impl TableBuilder {
    fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            row_names: None,
        }
    }

    /// Adds a named, typed column.
    pub fn column(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.columns.push((Some(name.into()), data_type));
        self
    }

    /// Adds a column that will receive an automatic letter name.
    pub fn unnamed_column(mut self, data_type: DataType) -> Self {
        self.columns.push((None, data_type));
        self
    }

    /// Appends one raw row.
    pub fn row(mut self, cells: Vec<Value>) -> Self {
        self.rows.push(cells);
        self
    }

    /// Appends many raw rows.
    pub fn rows(mut self, rows: Vec<Vec<Value>>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Sets the row-name specification.
    pub fn row_names(mut self, names: RowNames) -> Self {
        self.row_names = Some(names);
        self
    }

    /// Builds the table, casting every cell.
    pub fn build(self) -> Result<Table> {
        let (names, types) = self.columns.into_iter().unzip();
        Table::new(self.rows, names, types, self.row_names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use alloc::vec;
    use rust_decimal_macros::dec;

    fn letters_and_numbers() -> Table {
        Table::builder()
            .column("letter", DataType::text())
            .column("number", DataType::number())
            .row(vec![Value::from("a"), Value::from("1")])
            .row(vec![Value::from("b"), Value::from("2")])
            .row(vec![Value::from("c"), Value::from("")])
            .build()
            .unwrap()
    }

    #[test]
    fn test_construction_casts_cells() {
        let table = letters_and_numbers();

        assert_eq!(table.n_rows(), 3);
        assert_eq!(table.n_columns(), 2);
        assert_eq!(
            table.rows()[0].get(1),
            Some(&Value::Number(dec!(1)))
        );
        // Null strings cast to null.
        assert_eq!(table.rows()[2].get(1), Some(&Value::Null));
    }

    #[test]
    fn test_construction_cast_failure_names_cell() {
        let result = Table::builder()
            .column("n", DataType::number())
            .row(vec![Value::from("1")])
            .row(vec![Value::from("pony")])
            .build();

        match result {
            Err(Error::Cast { location, .. }) => {
                assert_eq!(location, Some((1, String::from("n"))));
            }
            other => panic!("expected cast error, got {:?}", other),
        }
    }

    #[test]
    fn test_short_rows_pad_long_rows_truncate() {
        let table = Table::builder()
            .column("a", DataType::text())
            .column("b", DataType::text())
            .row(vec![Value::from("x")])
            .row(vec![Value::from("y"), Value::from("z"), Value::from("!")])
            .build()
            .unwrap();

        assert_eq!(table.rows()[0].get(1), Some(&Value::Null));
        assert_eq!(table.rows()[1].len(), 2);
    }

    #[test]
    fn test_row_width_equals_schema_width() {
        let table = letters_and_numbers();
        for row in table.rows() {
            assert_eq!(row.len(), table.n_columns());
        }
    }

    #[test]
    fn test_row_names_from_column() {
        let table = Table::builder()
            .column("letter", DataType::text())
            .column("number", DataType::number())
            .row(vec![Value::from("a"), Value::from("1")])
            .row(vec![Value::from("b"), Value::from("2")])
            .row_names(RowNames::Column("letter".into()))
            .build()
            .unwrap();

        let row = table.row_by_name(&Value::from("b")).unwrap();
        assert_eq!(row.get(1), Some(&Value::Number(dec!(2))));
    }

    #[test]
    fn test_row_names_from_function() {
        let table = Table::builder()
            .column("letter", DataType::text())
            .row(vec![Value::from("a")])
            .row(vec![Value::from("b")])
            .row_names(RowNames::Function(Box::new(|row: &Row| {
                match row.get(0) {
                    Some(Value::Text(s)) => Value::Text(alloc::format!("key_{}", s)),
                    _ => Value::Null,
                }
            })))
            .build()
            .unwrap();

        assert!(table.row_by_name(&Value::from("key_a")).is_some());
    }

    #[test]
    fn test_numeric_row_names_rejected() {
        let result = Table::builder()
            .column("x", DataType::text())
            .row(vec![Value::from("a")])
            .row_names(RowNames::Values(vec![Value::Number(dec!(1))]))
            .build();

        assert!(matches!(result, Err(Error::InvalidRowNames { .. })));
    }

    #[test]
    fn test_duplicate_row_names_rejected() {
        let result = Table::builder()
            .column("x", DataType::text())
            .row(vec![Value::from("a")])
            .row(vec![Value::from("b")])
            .row_names(RowNames::Values(vec![
                Value::from("same"),
                Value::from("same"),
            ]))
            .build();

        assert!(matches!(result, Err(Error::InvalidRowNames { .. })));
    }

    #[test]
    fn test_rows_share_name_index() {
        let table = letters_and_numbers();
        assert!(Arc::ptr_eq(
            table.rows()[0].names(),
            table.rows()[2].names()
        ));
    }

    #[test]
    fn test_infer() {
        let table = Table::infer(
            vec![
                vec![Value::from("a"), Value::from("1")],
                vec![Value::from("b"), Value::from("2.5")],
            ],
            vec![Some("letter".into()), Some("number".into())],
            &TypeTester::new(),
            None,
        )
        .unwrap();

        assert_eq!(
            table.column("number").unwrap().data_type().kind(),
            tabulon_core::DataKind::Number
        );
    }
}
