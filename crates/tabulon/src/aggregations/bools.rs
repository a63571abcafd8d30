//! Boolean-valued aggregations.

use crate::aggregations::Aggregation;
use crate::table::Table;
use alloc::string::String;
use alloc::sync::Arc;
use tabulon_core::{DataType, Result, Value};

/// Whether a column contains any null cells.
pub struct HasNulls {
    column: String,
}

impl HasNulls {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Aggregation for HasNulls {
    fn name(&self) -> &'static str {
        "HasNulls"
    }

    fn output_type(&self, _table: &Table) -> Result<DataType> {
        Ok(DataType::boolean())
    }

    fn run(&self, table: &Table) -> Result<Value> {
        Ok(Value::Boolean(table.column(&self.column)?.has_nulls()))
    }
}

/// Whether any cell of a column passes the test. The test sees nulls.
pub struct Any {
    column: String,
    test: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl Any {
    pub fn new(
        column: impl Into<String>,
        test: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            column: column.into(),
            test: Arc::new(test),
        }
    }
}

impl Aggregation for Any {
    fn name(&self) -> &'static str {
        "Any"
    }

    fn output_type(&self, _table: &Table) -> Result<DataType> {
        Ok(DataType::boolean())
    }

    fn run(&self, table: &Table) -> Result<Value> {
        let column = table.column(&self.column)?;
        let result = column.values().any(|v| (self.test)(v));
        Ok(Value::Boolean(result))
    }
}

/// Whether every cell of a column passes the test. The test sees nulls.
pub struct All {
    column: String,
    test: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl All {
    pub fn new(
        column: impl Into<String>,
        test: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            column: column.into(),
            test: Arc::new(test),
        }
    }
}

impl Aggregation for All {
    fn name(&self) -> &'static str {
        "All"
    }

    fn output_type(&self, _table: &Table) -> Result<DataType> {
        Ok(DataType::boolean())
    }

    fn run(&self, table: &Table) -> Result<Value> {
        let column = table.column(&self.column)?;
        let result = column.values().all(|v| (self.test)(v));
        Ok(Value::Boolean(result))
    }
}
