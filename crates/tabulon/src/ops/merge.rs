//! Table concatenation: vertical `merge` and horizontal `fuse`.

use crate::schema::Schema;
use crate::table::{RowNames, Table};
use alloc::string::String;
use alloc::vec::Vec;
use tabulon_core::{DataType, Error, Result, Value};

impl Table {
    /// Vertically concatenates tables.
    ///
    /// Columns unify by name, in first-appearance order; a table lacking a
    /// unified column contributes nulls there. A column name appearing in
    /// several inputs must have the same kind everywhere; the first
    /// table's parse configuration is kept. `column_names`, when given,
    /// restricts and reorders the output columns. `row_names`, when
    /// given, names the concatenated rows.
    pub fn merge(
        tables: &[&Table],
        row_names: Option<Vec<Value>>,
        column_names: Option<&[&str]>,
    ) -> Result<Table> {
        if tables.is_empty() {
            return Err(Error::invalid_operation("merge requires at least one table"));
        }

        // Unify columns by name.
        let mut unified: Vec<(String, DataType)> = Vec::new();

        for table in tables {
            for (name, data_type) in table
                .column_names()
                .iter()
                .zip(table.column_types().iter())
            {
                match unified.iter().find(|(n, _)| n == name) {
                    Some((_, existing)) => {
                        if existing.kind() != data_type.kind() {
                            return Err(Error::data_type(
                                name.clone(),
                                alloc::format!(
                                    "merge requires matching types; found {} and {}",
                                    existing.kind(),
                                    data_type.kind()
                                ),
                            ));
                        }
                    }
                    None => unified.push((name.clone(), data_type.clone())),
                }
            }
        }

        let selected: Vec<(String, DataType)> = match column_names {
            Some(names) => {
                let mut selected = Vec::with_capacity(names.len());
                for name in names {
                    let found = unified
                        .iter()
                        .find(|(n, _)| n == name)
                        .ok_or_else(|| Error::column_not_found(*name))?;
                    selected.push(found.clone());
                }
                selected
            }
            None => unified,
        };

        let schema = Schema::of(selected)?;

        let mut cell_rows: Vec<Vec<Value>> = Vec::new();
        for table in tables {
            let source_indices: Vec<Option<usize>> = schema
                .names()
                .iter()
                .map(|name| table.schema().index_of(name))
                .collect();

            for row in table.rows() {
                cell_rows.push(
                    source_indices
                        .iter()
                        .map(|source| match source {
                            Some(i) => row.get(*i).cloned().unwrap_or(Value::Null),
                            None => Value::Null,
                        })
                        .collect(),
                );
            }
        }

        let table = Table::assemble(schema, cell_rows, None);

        match row_names {
            Some(names) => table.with_row_names(RowNames::Values(names)),
            None => Ok(table),
        }
    }

    /// Horizontally concatenates two equal-height tables. Right column
    /// names colliding with left ones are disambiguated with a warning.
    /// The left table's row names are kept.
    pub fn fuse(&self, right: &Table) -> Result<Table> {
        if self.n_rows() != right.n_rows() {
            return Err(Error::invalid_operation(alloc::format!(
                "fuse requires equal row counts; found {} and {}",
                self.n_rows(),
                right.n_rows()
            )));
        }

        let names: Vec<Option<String>> = self
            .column_names()
            .iter()
            .chain(right.column_names().iter())
            .cloned()
            .map(Some)
            .collect();
        let types: Vec<DataType> = self
            .column_types()
            .iter()
            .chain(right.column_types().iter())
            .cloned()
            .collect();

        let schema = Schema::build(names, types)?;

        let cell_rows: Vec<Vec<Value>> = self
            .rows()
            .iter()
            .zip(right.rows().iter())
            .map(|(l, r)| {
                l.values()
                    .iter()
                    .chain(r.values().iter())
                    .cloned()
                    .collect()
            })
            .collect();

        Ok(Table::assemble(
            schema,
            cell_rows,
            self.row_name_index().cloned(),
        ))
    }
}
