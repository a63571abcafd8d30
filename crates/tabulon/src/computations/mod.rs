//! Row-wise computations.
//!
//! A `Computation` derives a whole new column from an existing table.
//! Like aggregations, computations validate before running; `run` returns
//! one value per row, produced against the original table only.

mod change;
mod formula;
mod percent;
mod percent_change;
mod percentile_rank;
mod rank;
mod slug;

pub use change::Change;
pub use formula::Formula;
pub use percent::Percent;
pub use percent_change::PercentChange;
pub use percentile_rank::PercentileRank;
pub use rank::Rank;
pub use slug::Slug;

use crate::table::Table;
use alloc::vec::Vec;
use tabulon_core::{DataType, Result, Value};

/// A column producer: one output value per table row.
pub trait Computation {
    /// The type of the produced column.
    fn output_type(&self, table: &Table) -> Result<DataType>;

    /// Checks that this computation applies to the table. Runs before any
    /// value is produced.
    fn validate(&self, _table: &Table) -> Result<()> {
        Ok(())
    }

    /// Produces the new column, in row order.
    fn run(&self, table: &Table) -> Result<Vec<Value>>;
}
