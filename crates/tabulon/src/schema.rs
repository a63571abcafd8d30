//! Table schema: an ordered, uniquely named, typed column list.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use tabulon_core::naming::{deduplicate, letter_name};
use tabulon_core::warn::{self, Warning};
use tabulon_core::{DataType, Error, KeyIndex, Result};

/// The column structure of a table. Names are unique and non-empty; every
/// column carries a `DataType`. The name index is shared (via `Arc`) with
/// every row of the owning table.
#[derive(Clone, Debug)]
pub struct Schema {
    names: Arc<KeyIndex<String>>,
    types: Vec<DataType>,
}

impl Schema {
    /// Builds a schema from optional names and types.
    ///
    /// A missing name gets a letter name (`a`, `b`, ... `aa`); a duplicate
    /// gets a `_2`/`_3` suffix. Both are reported on the warning channel.
    /// A name/type count mismatch or an empty column list is an error.
    pub fn build(names: Vec<Option<String>>, types: Vec<DataType>) -> Result<Self> {
        if types.is_empty() {
            return Err(Error::invalid_schema("a table must have at least one column"));
        }

        if names.len() != types.len() {
            return Err(Error::invalid_schema(alloc::format!(
                "{} column names for {} column types",
                names.len(),
                types.len()
            )));
        }

        let names = Arc::new(KeyIndex::new(resolve_names(names))?);

        Ok(Self { names, types })
    }

    /// Builds a schema where every column is named.
    pub fn of(columns: Vec<(String, DataType)>) -> Result<Self> {
        let (names, types) = columns
            .into_iter()
            .map(|(n, t)| (Some(n), t))
            .unzip();
        Self::build(names, types)
    }

    /// Returns the shared column-name index.
    #[inline]
    pub fn name_index(&self) -> &Arc<KeyIndex<String>> {
        &self.names
    }

    /// Returns the column names in order.
    #[inline]
    pub fn names(&self) -> &[String] {
        self.names.keys()
    }

    /// Returns the column types in order.
    #[inline]
    pub fn types(&self) -> &[DataType] {
        &self.types
    }

    /// Returns the number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if the schema has no columns. A built schema never is.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns the position of a column by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.position(&String::from(name))
    }

    /// Returns the position of a column by name, or an error naming it.
    pub fn require(&self, name: &str) -> Result<usize> {
        self.index_of(name)
            .ok_or_else(|| Error::column_not_found(name))
    }

    /// Returns the type of the column at the given position.
    pub fn data_type(&self, index: usize) -> Option<&DataType> {
        self.types.get(index)
    }

    /// Returns true when the other schema has the same column names and
    /// kinds in the same order. Parse configuration is not compared.
    pub fn matches(&self, other: &Schema) -> bool {
        self.names() == other.names()
            && self.types.len() == other.types.len()
            && self
                .types
                .iter()
                .zip(other.types.iter())
                .all(|(a, b)| a.kind() == b.kind())
    }
}

/// Fills in missing column names with letter names and disambiguates
/// duplicates with numeric suffixes, warning for each adjustment.
pub(crate) fn resolve_names(names: Vec<Option<String>>) -> Vec<String> {
    let mut final_names: Vec<String> = Vec::with_capacity(names.len());

    for (i, name) in names.into_iter().enumerate() {
        let base = match name {
            Some(n) if !n.trim().is_empty() => n,
            _ => {
                let assigned = letter_name(i);
                warn::emit(Warning::UnnamedColumn {
                    assigned: assigned.clone(),
                });
                assigned
            }
        };

        let (unique, changed) = deduplicate(&base, &final_names);
        if changed {
            warn::emit(Warning::DuplicateColumn {
                name: base,
                renamed: unique.clone(),
            });
        }
        final_names.push(unique);
    }

    final_names
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use tabulon_core::DataKind;

    #[test]
    fn test_build_named() {
        let schema = Schema::of(vec![
            ("letter".to_string(), DataType::text()),
            ("number".to_string(), DataType::number()),
        ])
        .unwrap();

        assert_eq!(schema.names(), &["letter", "number"]);
        assert_eq!(schema.index_of("number"), Some(1));
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn test_build_auto_names() {
        let schema = Schema::build(
            vec![None, None, Some("x".to_string())],
            vec![DataType::text(), DataType::text(), DataType::text()],
        )
        .unwrap();

        assert_eq!(schema.names(), &["a", "b", "x"]);
    }

    #[test]
    fn test_build_deduplicates() {
        let schema = Schema::build(
            vec![
                Some("x".to_string()),
                Some("x".to_string()),
                Some("x".to_string()),
            ],
            vec![DataType::text(), DataType::text(), DataType::text()],
        )
        .unwrap();

        assert_eq!(schema.names(), &["x", "x_2", "x_3"]);
    }

    #[test]
    fn test_build_rejects_empty() {
        assert!(Schema::build(vec![], vec![]).is_err());
    }

    #[test]
    fn test_build_rejects_mismatch() {
        let result = Schema::build(vec![Some("a".to_string())], vec![
            DataType::text(),
            DataType::number(),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_matches_compares_kinds_not_config() {
        let a = Schema::of(vec![("n".to_string(), DataType::number())]).unwrap();
        let b = Schema::of(vec![(
            "n".to_string(),
            DataType::Number(tabulon_core::types::NumberOptions::new().decimal_symbol(',')),
        )])
        .unwrap();
        let c = Schema::of(vec![("n".to_string(), DataType::text())]).unwrap();

        assert!(a.matches(&b));
        assert!(!a.matches(&c));
        assert_eq!(a.types()[0].kind(), DataKind::Number);
    }
}
