//! Gap filling.

use crate::table::{cast_raw_row, Table};
use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use hashbrown::HashSet;
use tabulon_core::{Result, Value};

/// How `homogenize` builds a row for a missing key.
pub enum DefaultRow {
    /// The non-key cell values, in column order with the key columns
    /// skipped.
    Values(Vec<Value>),
    /// A function from the missing key to a full raw row.
    Function(Box<dyn Fn(&[Value]) -> Vec<Value>>),
}

impl Table {
    /// Appends rows so that every expected key appears at least once
    /// under the given key columns. Existing rows are kept untouched;
    /// appended rows are built from `default_row` and cast like any
    /// constructed row.
    pub fn homogenize(
        &self,
        key: &[&str],
        expected: &[Vec<Value>],
        default_row: &DefaultRow,
    ) -> Result<Table> {
        let mut key_indices = Vec::with_capacity(key.len());
        for name in key {
            key_indices.push(self.schema().require(name)?);
        }

        // Compare expected keys against cast cell values, so raw
        // expectations behave like raw constructor input.
        let mut cast_expected: Vec<Vec<Value>> = Vec::with_capacity(expected.len());
        for compound in expected {
            let mut cast_compound = Vec::with_capacity(compound.len());
            for (value, &index) in compound.iter().zip(key_indices.iter()) {
                cast_compound.push(self.column_types()[index].cast(value)?);
            }
            cast_expected.push(cast_compound);
        }

        let present: HashSet<Vec<Value>> = self
            .rows()
            .iter()
            .map(|row| {
                key_indices
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        let mut rows = self.rows().to_vec();
        let name_index = Arc::clone(self.schema().name_index());
        let mut appended = HashSet::new();

        for compound in cast_expected {
            if present.contains(&compound) || !appended.insert(compound.clone()) {
                continue;
            }

            let raw = match default_row {
                DefaultRow::Function(f) => f(&compound),
                DefaultRow::Values(defaults) => {
                    let mut raw: Vec<Value> = Vec::with_capacity(self.n_columns());
                    let mut remaining = defaults.iter();
                    for i in 0..self.n_columns() {
                        match key_indices.iter().position(|&k| k == i) {
                            Some(key_position) => raw.push(compound[key_position].clone()),
                            None => {
                                raw.push(remaining.next().cloned().unwrap_or(Value::Null))
                            }
                        }
                    }
                    raw
                }
            };

            let row_index = rows.len();
            rows.push(cast_raw_row(self.schema(), &name_index, raw, row_index)?);
        }

        // Appended rows have no names, so none survive.
        Ok(self.fork(rows, None))
    }
}
