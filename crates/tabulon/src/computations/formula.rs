//! Arbitrary row formulas.

use crate::computations::Computation;
use crate::table::Table;
use alloc::sync::Arc;
use alloc::vec::Vec;
use tabulon_core::{DataType, Result, Row, Value};

/// Applies a function to each row, casting the result to the declared
/// type unless casting is disabled.
pub struct Formula {
    data_type: DataType,
    func: Arc<dyn Fn(&Row) -> Value + Send + Sync>,
    cast: bool,
}

impl Formula {
    pub fn new(
        data_type: DataType,
        func: impl Fn(&Row) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            data_type,
            func: Arc::new(func),
            cast: true,
        }
    }

    /// Disables casting of the function's results. The caller warrants
    /// that every result already has the declared type.
    pub fn without_cast(mut self) -> Self {
        self.cast = false;
        self
    }
}

impl Computation for Formula {
    fn output_type(&self, _table: &Table) -> Result<DataType> {
        Ok(self.data_type.clone())
    }

    fn run(&self, table: &Table) -> Result<Vec<Value>> {
        let mut values = Vec::with_capacity(table.n_rows());

        for (i, row) in table.rows().iter().enumerate() {
            let raw = (self.func)(row);
            let value = if self.cast {
                self.data_type.cast(&raw).map_err(|e| e.at(i, "formula"))?
            } else {
                raw
            };
            values.push(value);
        }

        Ok(values)
    }
}
