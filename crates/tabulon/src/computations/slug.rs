//! Slug columns.

use crate::aggregations::require_column;
use crate::computations::Computation;
use crate::table::Table;
use alloc::string::String;
use alloc::vec::Vec;
use tabulon_core::naming::{deduplicate, slugify};
use tabulon_core::{DataKind, DataType, Error, Result, Value};

/// Slugifies one Text column, or several (space-joined before slugging).
/// With `ensure_unique`, duplicate slugs get numeric suffixes in row
/// order. Null cells are an error: a slug must identify its row.
pub struct Slug {
    columns: Vec<String>,
    ensure_unique: bool,
}

impl Slug {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            columns: Vec::from([column.into()]),
            ensure_unique: false,
        }
    }

    /// Slugs the space-joined values of several columns.
    pub fn of_columns(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| String::from(*c)).collect(),
            ensure_unique: false,
        }
    }

    /// Appends numeric suffixes to duplicate slugs.
    pub fn ensure_unique(mut self) -> Self {
        self.ensure_unique = true;
        self
    }
}

impl Computation for Slug {
    fn output_type(&self, _table: &Table) -> Result<DataType> {
        Ok(DataType::text())
    }

    fn validate(&self, table: &Table) -> Result<()> {
        for column in &self.columns {
            require_column(table, column, &[DataKind::Text], "Slug")?;
        }
        Ok(())
    }

    fn run(&self, table: &Table) -> Result<Vec<Value>> {
        let mut indices = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            indices.push(table.schema().require(column)?);
        }

        let mut slugs: Vec<String> = Vec::with_capacity(table.n_rows());

        for (i, row) in table.rows().iter().enumerate() {
            let mut parts: Vec<&str> = Vec::with_capacity(indices.len());
            for (&index, column) in indices.iter().zip(self.columns.iter()) {
                match row.get(index).and_then(Value::as_str) {
                    Some(text) => parts.push(text),
                    None => {
                        return Err(Error::data_type(
                            column.clone(),
                            alloc::format!("Slug column contains a null in row {}", i),
                        ))
                    }
                }
            }
            slugs.push(slugify(&parts.join(" ")));
        }

        if self.ensure_unique {
            let mut taken: Vec<String> = Vec::with_capacity(slugs.len());
            for slug in slugs.iter_mut() {
                let (unique, _) = deduplicate(slug, &taken);
                taken.push(unique.clone());
                *slug = unique;
            }
        }

        Ok(slugs.into_iter().map(Value::Text).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use tabulon_core::DataType as T;

    fn table() -> Table {
        Table::builder()
            .column("first", T::text())
            .column("last", T::text())
            .row(vec![Value::from("Ada"), Value::from("Lovelace")])
            .row(vec![Value::from("Grace"), Value::from("Hopper")])
            .row(vec![Value::from("Ada"), Value::from("Lovelace")])
            .build()
            .unwrap()
    }

    #[test]
    fn test_slug_single_column() {
        let computed = table()
            .compute(&[("slug", &Slug::new("last"))], false)
            .unwrap();
        assert_eq!(
            computed.rows()[0].get_by_name("slug"),
            Some(&Value::from("lovelace"))
        );
    }

    #[test]
    fn test_slug_multiple_columns() {
        let computed = table()
            .compute(&[("slug", &Slug::of_columns(&["first", "last"]))], false)
            .unwrap();
        assert_eq!(
            computed.rows()[0].get_by_name("slug"),
            Some(&Value::from("ada_lovelace"))
        );
    }

    #[test]
    fn test_slug_ensure_unique() {
        let computed = table()
            .compute(
                &[("slug", &Slug::of_columns(&["first", "last"]).ensure_unique())],
                false,
            )
            .unwrap();

        assert_eq!(
            computed.rows()[2].get_by_name("slug"),
            Some(&Value::from("ada_lovelace_2"))
        );
    }

    #[test]
    fn test_slug_null_is_an_error() {
        let t = Table::builder()
            .column("name", T::text())
            .row(vec![Value::from("")])
            .build()
            .unwrap();

        assert!(t.compute(&[("slug", &Slug::new("name"))], false).is_err());
    }
}
