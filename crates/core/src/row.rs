//! Row structure for tabulon.
//!
//! A `Row` is an immutable sequence of typed cells sharing one column-name
//! index with every other row of its table. Rows are shared by reference
//! across derived tables; a transformation that changes a cell builds a
//! replacement row instead of mutating.

use crate::sequence::KeyIndex;
use crate::value::Value;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// A single table row.
#[derive(Clone, Debug)]
pub struct Row {
    /// Column-name index, shared across the owning table's rows.
    names: Arc<KeyIndex<String>>,
    /// Cell values, indexed by column position.
    values: Vec<Value>,
}

impl Row {
    /// Creates a row over a shared column-name index.
    pub fn new(names: Arc<KeyIndex<String>>, values: Vec<Value>) -> Self {
        Self { names, values }
    }

    /// Returns the shared column-name index.
    #[inline]
    pub fn names(&self) -> &Arc<KeyIndex<String>> {
        &self.names
    }

    /// Returns the cell values in column order.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Gets a cell by column position.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Gets a cell by column name.
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        let index = self.names.position(&String::from(name))?;
        self.values.get(index)
    }

    /// Returns the number of cells in this row.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this row has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes the row, returning its cells.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for Row {}
