//! Row deduplication.

use crate::key::Key;
use crate::table::Table;
use alloc::sync::Arc;
use alloc::vec::Vec;
use hashbrown::HashSet;
use tabulon_core::{Result, Value};

impl Table {
    /// Returns a table keeping the first row for each distinct key value.
    /// Without a key, whole-row contents decide identity.
    pub fn distinct(&self, key: Option<Key>) -> Result<Table> {
        let key_values: Vec<Vec<Value>> = match key {
            Some(key) => key.resolve(self)?,
            None => self
                .rows()
                .iter()
                .map(|row| row.values().to_vec())
                .collect(),
        };

        let mut seen: HashSet<&[Value]> = HashSet::new();
        let mut kept_rows = Vec::new();
        let mut kept_indices = Vec::new();

        for (i, compound) in key_values.iter().enumerate() {
            if seen.insert(compound.as_slice()) {
                kept_rows.push(Arc::clone(&self.rows()[i]));
                kept_indices.push(i);
            }
        }

        let row_names = self.subset_row_names(&kept_indices);
        Ok(self.fork(kept_rows, row_names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use tabulon_core::DataType;

    fn table() -> Table {
        Table::builder()
            .column("group", DataType::text())
            .column("n", DataType::number())
            .row(vec![Value::from("a"), Value::from("1")])
            .row(vec![Value::from("a"), Value::from("2")])
            .row(vec![Value::from("b"), Value::from("1")])
            .row(vec![Value::from("a"), Value::from("1")])
            .build()
            .unwrap()
    }

    #[test]
    fn test_distinct_whole_row() {
        let t = table().distinct(None).unwrap();
        assert_eq!(t.n_rows(), 3);
    }

    #[test]
    fn test_distinct_by_column_keeps_first() {
        let t = table().distinct(Some("group".into())).unwrap();
        assert_eq!(t.n_rows(), 2);
        // The first "a" row wins.
        assert_eq!(t.rows()[0].get(1), Some(&Value::from(1i64)));
    }

    #[test]
    fn test_distinct_by_compound_key() {
        let t = table().distinct(Some(vec!["group", "n"].into())).unwrap();
        assert_eq!(t.n_rows(), 3);
    }
}
