//! Axis renaming and slugging.

use crate::schema::Schema;
use crate::table::Table;
use alloc::string::String;
use alloc::vec::Vec;
use tabulon_core::naming::{deduplicate, slugify};
use tabulon_core::types::coerce_to_text;
use tabulon_core::{Error, Result, Value};

impl Table {
    /// Returns a table with columns renamed per the `(old, new)` mapping.
    /// Unmapped columns keep their names. Naming a missing column is an
    /// error; collisions among the new names are disambiguated with a
    /// warning, as at construction.
    pub fn rename_columns(&self, mapping: &[(&str, &str)]) -> Result<Table> {
        for (old, _) in mapping {
            self.schema().require(old)?;
        }

        let new_names: Vec<String> = self
            .column_names()
            .iter()
            .map(|name| {
                match mapping.iter().find(|(old, _)| old == name) {
                    Some((_, new)) => String::from(*new),
                    None => name.clone(),
                }
            })
            .collect();

        self.rebuild_with_names(new_names)
    }

    /// Returns a table with every column name slugified. Slug collisions
    /// get numeric suffixes.
    pub fn slug_columns(&self) -> Result<Table> {
        let new_names: Vec<String> = self
            .column_names()
            .iter()
            .map(|name| slugify(name))
            .collect();

        self.rebuild_with_names(new_names)
    }

    /// Returns a table with the given row names replacing the current
    /// ones. The list must be one unique, non-numeric name per row.
    pub fn rename_rows(&self, names: Vec<Value>) -> Result<Table> {
        self.clone()
            .with_row_names(crate::table::RowNames::Values(names))
    }

    /// Returns a table with every row name slugified (row names must be
    /// text). Slug collisions get numeric suffixes.
    pub fn slug_rows(&self) -> Result<Table> {
        let current = self
            .row_names()
            .ok_or_else(|| Error::invalid_row_names("table has no row names to slug"))?;

        let mut slugged: Vec<Value> = Vec::with_capacity(current.len());
        let mut taken: Vec<String> = Vec::with_capacity(current.len());

        for name in current {
            let text = match name {
                Value::Text(s) => slugify(s),
                other => slugify(&coerce_to_text(other)),
            };
            let (unique, _) = deduplicate(&text, &taken);
            taken.push(unique.clone());
            slugged.push(Value::Text(unique));
        }

        self.rename_rows(slugged)
    }

    /// Rebuilds this table under new column names, sharing cell data.
    fn rebuild_with_names(&self, names: Vec<String>) -> Result<Table> {
        let schema = Schema::build(
            names.into_iter().map(Some).collect(),
            self.column_types().to_vec(),
        )?;

        let cell_rows: Vec<Vec<Value>> = self
            .rows()
            .iter()
            .map(|row| row.values().to_vec())
            .collect();

        Ok(Table::assemble(
            schema,
            cell_rows,
            self.row_name_index().cloned(),
        ))
    }
}
