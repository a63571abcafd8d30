//! Long-to-wide conversion.

use crate::table::Table;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use tabulon_core::types::coerce_to_text;
use tabulon_core::{Result, TypeTester, Value};

impl Table {
    /// Converts rows to columns: one output row per distinct key, one
    /// output column per distinct value of `property_column`, filled from
    /// `value_column`.
    ///
    /// Absent cells take `default_value` (null when not given). When the
    /// same `(key, property)` pair occurs twice, the last row wins. The
    /// new columns' types are inferred from their values; key columns
    /// keep their types.
    pub fn denormalize(
        &self,
        key: &[&str],
        property_column: &str,
        value_column: &str,
        default_value: Option<Value>,
    ) -> Result<Table> {
        let mut key_indices = Vec::with_capacity(key.len());
        for name in key {
            key_indices.push(self.schema().require(name)?);
        }
        let property_index = self.schema().require(property_column)?;
        let value_index = self.schema().require(value_column)?;

        // Ordered distinct keys, each mapping property name -> value.
        let mut key_order: Vec<Vec<Value>> = Vec::new();
        let mut groups: HashMap<Vec<Value>, HashMap<String, Value>> = HashMap::new();
        let mut field_names: Vec<String> = Vec::new();

        for row in self.rows() {
            let row_key: Vec<Value> = key_indices
                .iter()
                .map(|&i| row.get(i).cloned().unwrap_or(Value::Null))
                .collect();

            if !groups.contains_key(&row_key) {
                key_order.push(row_key.clone());
            }

            let field = match row.get(property_index) {
                Some(v) => coerce_to_text(v),
                None => String::new(),
            };
            if !field_names.iter().any(|f| f == &field) {
                field_names.push(field.clone());
            }

            let value = row.get(value_index).cloned().unwrap_or(Value::Null);
            groups.entry(row_key).or_default().insert(field, value);
        }

        let default = default_value.unwrap_or(Value::Null);

        let mut names: Vec<Option<String>> =
            key.iter().map(|name| Some(String::from(*name))).collect();
        names.extend(field_names.iter().cloned().map(Some));

        let mut cell_rows: Vec<Vec<Value>> = Vec::with_capacity(key_order.len());
        for row_key in &key_order {
            let fields = groups.get(row_key);
            let mut cells = row_key.clone();
            for field in &field_names {
                let value = fields
                    .and_then(|f| f.get(field))
                    .cloned()
                    .unwrap_or_else(|| default.clone());
                cells.push(value);
            }
            cell_rows.push(cells);
        }

        // Key columns keep their types; new columns infer from their
        // values.
        let mut tester = TypeTester::new();
        for (&index, name) in key_indices.iter().zip(key.iter()) {
            tester = tester.force(*name, self.column_types()[index].clone());
        }

        Table::infer(cell_rows, names, &tester, None)
    }
}
