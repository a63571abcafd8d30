//! Row ordering.

use crate::key::Key;
use crate::table::Table;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp::Ordering;
use tabulon_core::{Result, Value};

impl Table {
    /// Returns a table sorted by the given key. The sort is stable: equal
    /// keys keep their original relative order. Nulls sort last whether or
    /// not `reverse` is set.
    pub fn order_by(&self, key: impl Into<Key>, reverse: bool) -> Result<Table> {
        let key_values = key.into().resolve(self)?;

        let mut order: Vec<usize> = (0..self.n_rows()).collect();
        order.sort_by(|&a, &b| compare_compound(&key_values[a], &key_values[b], reverse));

        let rows = order
            .iter()
            .map(|&i| Arc::clone(&self.rows()[i]))
            .collect();
        let row_names = self.subset_row_names(&order);

        Ok(self.fork(rows, row_names))
    }
}

/// Compares compound keys component-wise. Null components order after
/// non-null ones regardless of direction; non-null components compare
/// naturally, reversed on request.
fn compare_compound(a: &[Value], b: &[Value], reverse: bool) -> Ordering {
    for (left, right) in a.iter().zip(b.iter()) {
        let ordering = match (left.is_null(), right.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let natural = left.cmp(right);
                if reverse {
                    natural.reverse()
                } else {
                    natural
                }
            }
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}
