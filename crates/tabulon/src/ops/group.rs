//! Grouping rows into a `TableSet`.

use crate::key::Key;
use crate::table::Table;
use crate::tableset::TableSet;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use hashbrown::HashMap;
use tabulon_core::{DataType, Result, Value};

impl Table {
    /// Groups rows by a key, returning one member table per distinct key
    /// value in first-seen order.
    ///
    /// The key is a single column or a function; `key_name` names the key
    /// column produced by a later `TableSet::aggregate` (defaulting to the
    /// column name, or `"group"` for functions). `key_type`, when given,
    /// casts the key values; for a function key it otherwise defaults to
    /// the kind of the first non-null result.
    pub fn group_by(
        &self,
        key: impl Into<Key>,
        key_name: Option<&str>,
        key_type: Option<DataType>,
    ) -> Result<TableSet> {
        let key = key.into();

        let name = match key_name {
            Some(name) => String::from(name),
            None => match &key {
                Key::Column(column) => column.clone(),
                _ => String::from("group"),
            },
        };

        let mut key_values = key.resolve_single(self)?;

        let data_type = match key_type {
            Some(data_type) => {
                for value in key_values.iter_mut() {
                    *value = data_type.cast(value)?;
                }
                data_type
            }
            None => match &key {
                Key::Column(column) => self.column(column)?.data_type().clone(),
                _ => infer_key_type(&key_values),
            },
        };

        // Bucket rows by key, preserving first-seen key order.
        let mut order: Vec<Value> = Vec::new();
        let mut buckets: HashMap<Value, Vec<usize>> = HashMap::new();

        for (i, value) in key_values.iter().enumerate() {
            if !buckets.contains_key(value) {
                order.push(value.clone());
            }
            buckets.entry(value.clone()).or_default().push(i);
        }

        let mut keys = Vec::with_capacity(order.len());
        let mut members = Vec::with_capacity(order.len());

        for key_value in order {
            let indices = buckets.remove(&key_value).unwrap_or_default();
            let rows = indices
                .iter()
                .map(|&i| Arc::clone(&self.rows()[i]))
                .collect();
            let row_names = self.subset_row_names(&indices);

            keys.push(key_value);
            members.push(self.fork(rows, row_names));
        }

        TableSet::new(keys, members, name, data_type)
    }
}

/// Defaults a function key's type to the kind of its first non-null
/// result, or Text when every result is null.
fn infer_key_type(values: &[Value]) -> DataType {
    for value in values {
        match value.kind() {
            Some(tabulon_core::DataKind::Number) => return DataType::number(),
            Some(tabulon_core::DataKind::Boolean) => return DataType::boolean(),
            Some(tabulon_core::DataKind::Date) => return DataType::date(),
            Some(tabulon_core::DataKind::DateTime) => return DataType::date_time(),
            Some(tabulon_core::DataKind::TimeDelta) => return DataType::time_delta(),
            Some(tabulon_core::DataKind::Text) => return DataType::text(),
            None => continue,
        }
    }

    DataType::text()
}
