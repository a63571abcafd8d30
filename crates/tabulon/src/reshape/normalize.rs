//! Wide-to-long conversion.

use crate::schema::Schema;
use crate::table::Table;
use alloc::string::String;
use alloc::vec::Vec;
use tabulon_core::types::coerce_to_text;
use tabulon_core::{DataType, Result, Value};

impl Table {
    /// Converts columns to rows: for each input row and each property
    /// column, emits one output row of the key cells, the property name,
    /// and the property value.
    ///
    /// The value column keeps the properties' type when they all share
    /// one; otherwise it is Text and values serialize to their textual
    /// forms.
    pub fn normalize(
        &self,
        key: &[&str],
        properties: &[&str],
        property_column: &str,
        value_column: &str,
    ) -> Result<Table> {
        let mut key_indices = Vec::with_capacity(key.len());
        for name in key {
            key_indices.push(self.schema().require(name)?);
        }

        let mut property_indices = Vec::with_capacity(properties.len());
        for name in properties {
            property_indices.push(self.schema().require(name)?);
        }

        // The value column is typed by consensus, Text otherwise.
        let first_kind = property_indices
            .first()
            .map(|&i| self.column_types()[i].kind());
        let uniform = property_indices
            .iter()
            .all(|&i| Some(self.column_types()[i].kind()) == first_kind);

        let value_type: DataType = if uniform {
            match property_indices.first() {
                Some(&i) => self.column_types()[i].clone(),
                None => DataType::text(),
            }
        } else {
            DataType::text()
        };
        let textual = value_type.kind() == tabulon_core::DataKind::Text && !uniform;

        let mut columns: Vec<(String, DataType)> = Vec::with_capacity(key.len() + 2);
        for (&index, name) in key_indices.iter().zip(key.iter()) {
            columns.push((String::from(*name), self.column_types()[index].clone()));
        }
        columns.push((String::from(property_column), DataType::text()));
        columns.push((String::from(value_column), value_type));

        let schema = Schema::of(columns)?;

        let mut cell_rows: Vec<Vec<Value>> = Vec::with_capacity(self.n_rows() * properties.len());

        for row in self.rows() {
            for (&index, name) in property_indices.iter().zip(properties.iter()) {
                let mut cells: Vec<Value> = key_indices
                    .iter()
                    .map(|&k| row.get(k).cloned().unwrap_or(Value::Null))
                    .collect();
                cells.push(Value::Text(String::from(*name)));

                let value = row.get(index).cloned().unwrap_or(Value::Null);
                cells.push(if textual && !value.is_null() {
                    Value::Text(coerce_to_text(&value))
                } else {
                    value
                });

                cell_rows.push(cells);
            }
        }

        Ok(Table::assemble(schema, cell_rows, None))
    }
}
