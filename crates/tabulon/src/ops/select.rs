//! Column projection: `select` and `exclude`.

use crate::schema::Schema;
use crate::table::Table;
use alloc::string::String;
use alloc::vec::Vec;
use tabulon_core::{Result, Value};

impl Table {
    /// Returns a table containing only the listed columns, in the listed
    /// order. Naming a missing column is an error.
    pub fn select(&self, names: &[&str]) -> Result<Table> {
        let mut indices = Vec::with_capacity(names.len());
        let mut columns = Vec::with_capacity(names.len());

        for name in names {
            let index = self.schema().require(name)?;
            indices.push(index);
            columns.push((
                String::from(*name),
                self.schema().types()[index].clone(),
            ));
        }

        let schema = Schema::of(columns)?;

        let cell_rows: Vec<Vec<Value>> = self
            .rows()
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Ok(Table::assemble(
            schema,
            cell_rows,
            self.row_name_index().cloned(),
        ))
    }

    /// Returns a table containing every column except the listed ones.
    pub fn exclude(&self, names: &[&str]) -> Result<Table> {
        // Naming a missing column is an error here too.
        for name in names {
            self.schema().require(name)?;
        }

        let kept: Vec<&str> = self
            .column_names()
            .iter()
            .filter(|n| !names.contains(&n.as_str()))
            .map(|n| n.as_str())
            .collect();

        self.select(&kept)
    }
}
