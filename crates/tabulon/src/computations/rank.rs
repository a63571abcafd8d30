//! Competition ranking.

use crate::computations::Computation;
use crate::table::Table;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp::Ordering;
use hashbrown::HashMap;
use rust_decimal::Decimal;
use tabulon_core::{DataType, Result, Value};

/// Ranks each row by a column's value using 1-based competition ranking:
/// tied values share a rank and the following rank skips accordingly.
/// Nulls sort last and receive ranks like any other value.
pub struct Rank {
    column: String,
    reverse: bool,
    comparer: Option<Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>>,
}

impl Rank {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            reverse: false,
            comparer: None,
        }
    }

    /// Ranks from largest to smallest instead.
    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Orders values with a custom comparison instead of the natural one.
    pub fn with_comparer(
        mut self,
        comparer: impl Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.comparer = Some(Arc::new(comparer));
        self
    }
}

impl Computation for Rank {
    fn output_type(&self, _table: &Table) -> Result<DataType> {
        Ok(DataType::number())
    }

    fn run(&self, table: &Table) -> Result<Vec<Value>> {
        let column = table.column(&self.column)?;

        let mut sorted: Vec<Value> = column.values().cloned().collect();
        match &self.comparer {
            Some(comparer) => sorted.sort_by(|a, b| {
                let ordering = comparer(a, b);
                if self.reverse {
                    ordering.reverse()
                } else {
                    ordering
                }
            }),
            // Nulls rank last in either direction.
            None => sorted.sort_by(|a, b| match (a.is_null(), b.is_null()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => {
                    if self.reverse {
                        b.cmp(a)
                    } else {
                        a.cmp(b)
                    }
                }
            }),
        }

        // Competition ranks: the rank of a value is one plus the number of
        // values ordered before its first occurrence.
        let mut ranks: HashMap<&Value, usize> = HashMap::with_capacity(sorted.len());
        for (i, value) in sorted.iter().enumerate() {
            ranks.entry(value).or_insert(i + 1);
        }

        let values = column
            .values()
            .map(|value| {
                let rank = ranks.get(value).copied().unwrap_or(0);
                Value::Number(Decimal::from(rank as u64))
            })
            .collect();

        Ok(values)
    }
}
