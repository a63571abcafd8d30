//! Row key specifications.
//!
//! Operations that key on rows (`order_by`, `distinct`, `group_by`,
//! `join`, `pivot`) accept a `Key`: one column name, several column names,
//! or an arbitrary row function. The named forms take a pre-indexed path;
//! the function form is the fully general one.

use crate::table::Table;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use tabulon_core::{Error, Result, Row, Value};

/// A key over rows: a column, a column list, or a row function.
#[derive(Clone)]
pub enum Key {
    /// A single column, by name.
    Column(String),
    /// Several columns, by name, composing a compound key.
    Columns(Vec<String>),
    /// A function computing the key from each row.
    Function(Arc<dyn Fn(&Row) -> Value + Send + Sync>),
}

impl Key {
    /// Creates a function key.
    pub fn function(f: impl Fn(&Row) -> Value + Send + Sync + 'static) -> Self {
        Key::Function(Arc::new(f))
    }

    /// Returns the column names this key references, when it is a named
    /// key.
    pub fn column_names(&self) -> Option<Vec<&str>> {
        match self {
            Key::Column(name) => Some(Vec::from([name.as_str()])),
            Key::Columns(names) => Some(names.iter().map(|n| n.as_str()).collect()),
            Key::Function(_) => None,
        }
    }

    /// Computes the compound key value for every row, in row order.
    ///
    /// Single-column and function keys produce one-element compounds so
    /// callers can treat every key uniformly.
    pub fn resolve(&self, table: &Table) -> Result<Vec<Vec<Value>>> {
        match self {
            Key::Column(name) => {
                let index = table.schema().require(name)?;
                Ok(table
                    .rows()
                    .iter()
                    .map(|row| Vec::from([row.get(index).cloned().unwrap_or(Value::Null)]))
                    .collect())
            }
            Key::Columns(names) => {
                let mut indices = Vec::with_capacity(names.len());
                for name in names {
                    indices.push(table.schema().require(name)?);
                }
                Ok(table
                    .rows()
                    .iter()
                    .map(|row| {
                        indices
                            .iter()
                            .map(|&i| row.get(i).cloned().unwrap_or(Value::Null))
                            .collect()
                    })
                    .collect())
            }
            Key::Function(f) => Ok(table
                .rows()
                .iter()
                .map(|row| Vec::from([f(row)]))
                .collect()),
        }
    }

    /// Computes a single key value for every row. Compound keys are not
    /// single values and are rejected.
    pub fn resolve_single(&self, table: &Table) -> Result<Vec<Value>> {
        match self {
            Key::Column(name) => {
                let index = table.schema().require(name)?;
                Ok(table
                    .rows()
                    .iter()
                    .map(|row| row.get(index).cloned().unwrap_or(Value::Null))
                    .collect())
            }
            Key::Columns(_) => Err(Error::invalid_operation(
                "a compound key is not valid here; use a single column or a function",
            )),
            Key::Function(f) => Ok(table.rows().iter().map(|row| f(row)).collect()),
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Column(name) => f.debug_tuple("Column").field(name).finish(),
            Key::Columns(names) => f.debug_tuple("Columns").field(names).finish(),
            Key::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Column(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Column(name)
    }
}

impl From<Vec<String>> for Key {
    fn from(names: Vec<String>) -> Self {
        Key::Columns(names)
    }
}

impl From<Vec<&str>> for Key {
    fn from(names: Vec<&str>) -> Self {
        Key::Columns(names.into_iter().map(|n| n.to_string()).collect())
    }
}

impl From<&[&str]> for Key {
    fn from(names: &[&str]) -> Self {
        Key::Columns(names.iter().map(|n| n.to_string()).collect())
    }
}
