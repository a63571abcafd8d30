//! Caller-defined column summaries.

use crate::aggregations::Aggregation;
use crate::column::Column;
use crate::table::Table;
use alloc::string::String;
use alloc::sync::Arc;
use tabulon_core::{DataType, Result, Value};

/// Applies an arbitrary function to a column.
///
/// The declared data type describes the function's return value; the
/// null policy is whatever the function implements.
pub struct Summary {
    column: String,
    data_type: DataType,
    func: Arc<dyn for<'t> Fn(Column<'t>) -> Result<Value> + Send + Sync>,
}

impl Summary {
    pub fn new(
        column: impl Into<String>,
        data_type: DataType,
        func: impl for<'t> Fn(Column<'t>) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            column: column.into(),
            data_type,
            func: Arc::new(func),
        }
    }
}

impl Aggregation for Summary {
    fn name(&self) -> &'static str {
        "Summary"
    }

    fn output_type(&self, _table: &Table) -> Result<DataType> {
        Ok(self.data_type.clone())
    }

    fn run(&self, table: &Table) -> Result<Value> {
        let column = table.column(&self.column)?;
        (self.func)(column)
    }
}
