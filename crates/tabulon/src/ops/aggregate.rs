//! Whole-table aggregation.

use crate::aggregations::Aggregation;
use crate::table::Table;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use tabulon_core::{KeyIndex, MappedSequence, Result, Value};

impl Table {
    /// Applies one aggregation to this table, returning its value.
    /// Validation runs first, so a type mismatch fails before any value
    /// is produced.
    pub fn aggregate(&self, aggregation: &dyn Aggregation) -> Result<Value> {
        aggregation.validate(self)?;
        aggregation.run(self)
    }

    /// Applies several named aggregations, returning a sequence keyed by
    /// the given names. All validations run before any aggregation does.
    pub fn aggregate_all(
        &self,
        specs: &[(&str, &dyn Aggregation)],
    ) -> Result<MappedSequence<String, Value>> {
        for (_, aggregation) in specs {
            aggregation.validate(self)?;
        }

        let mut values = Vec::with_capacity(specs.len());
        for (_, aggregation) in specs {
            values.push(aggregation.run(self)?);
        }

        let keys = KeyIndex::new(specs.iter().map(|(name, _)| String::from(*name)).collect())?;
        MappedSequence::with_keys(values, Arc::new(keys))
    }
}
