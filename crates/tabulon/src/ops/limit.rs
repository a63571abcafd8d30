//! Row slicing: `limit` and `slice`.

use crate::table::Table;
use alloc::sync::Arc;
use alloc::vec::Vec;
use tabulon_core::{Error, Result};

impl Table {
    /// Returns a table with at most the first `n` rows.
    pub fn limit(&self, n: usize) -> Table {
        let kept: Vec<usize> = (0..self.n_rows().min(n)).collect();
        self.take_rows(&kept)
    }

    /// Returns a table with the rows selected by slice semantics:
    /// positions `start`, `start + step`, ... up to (not including)
    /// `stop`, which defaults to the row count. A step of zero is an
    /// error.
    pub fn slice(&self, start: usize, stop: Option<usize>, step: usize) -> Result<Table> {
        if step == 0 {
            return Err(Error::invalid_operation("slice step may not be zero"));
        }

        let stop = stop.unwrap_or(self.n_rows()).min(self.n_rows());
        let kept: Vec<usize> = (start..stop).step_by(step).collect();

        Ok(self.take_rows(&kept))
    }

    fn take_rows(&self, kept: &[usize]) -> Table {
        let rows = kept
            .iter()
            .map(|&i| Arc::clone(&self.rows()[i]))
            .collect();
        let row_names = self.subset_row_names(kept);
        self.fork(rows, row_names)
    }
}
