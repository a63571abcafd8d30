//! Column type inference.
//!
//! `TypeTester` infers each column's `DataType` from a sample of raw
//! cells by trying a prioritized list of candidate types and keeping the
//! first one that casts every sampled cell. Text always succeeds, so it
//! sits last in the default priority as the universal fallback.

use crate::types::DataType;
use crate::value::Value;
use crate::warn::{self, Warning};
use alloc::string::String;
use alloc::vec::Vec;

/// Infers column types from sampled raw cells.
pub struct TypeTester {
    types: Vec<DataType>,
    force: Vec<(String, DataType)>,
    limit: Option<usize>,
}

impl TypeTester {
    /// Creates a tester with the default priority: Boolean, Number,
    /// TimeDelta, Date, DateTime, Text.
    pub fn new() -> Self {
        Self {
            types: Vec::from([
                DataType::boolean(),
                DataType::number(),
                DataType::time_delta(),
                DataType::date(),
                DataType::date_time(),
                DataType::text(),
            ]),
            force: Vec::new(),
            limit: None,
        }
    }

    /// Replaces the candidate types, tried in the given order.
    pub fn types(mut self, types: Vec<DataType>) -> Self {
        self.types = types;
        self
    }

    /// Forces a column to a given type, bypassing inference for it.
    pub fn force(mut self, column: impl Into<String>, data_type: DataType) -> Self {
        self.force.push((column.into(), data_type));
        self
    }

    /// Limits inference to the first `limit` rows.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Infers a type for each named column from the given raw rows.
    ///
    /// Forced columns take their forced type; a forced name that matches no
    /// column is reported on the warning channel and ignored.
    pub fn run(&self, rows: &[Vec<Value>], column_names: &[String]) -> Vec<DataType> {
        for (name, _) in &self.force {
            if !column_names.iter().any(|c| c == name) {
                warn::emit(Warning::UnknownForcedColumn { name: name.clone() });
            }
        }

        let sample = match self.limit {
            Some(limit) if limit < rows.len() => &rows[..limit],
            _ => rows,
        };

        column_names
            .iter()
            .enumerate()
            .map(|(index, name)| self.infer_column(index, name, sample))
            .collect()
    }

    fn infer_column(&self, index: usize, name: &str, sample: &[Vec<Value>]) -> DataType {
        if let Some((_, forced)) = self.force.iter().find(|(n, _)| n == name) {
            return forced.clone();
        }

        for candidate in &self.types {
            let all_cast = sample.iter().all(|row| {
                match row.get(index) {
                    Some(cell) => candidate.cast(cell).is_ok(),
                    // Short rows pad with nulls, which any type accepts.
                    None => true,
                }
            });

            if all_cast {
                return candidate.clone();
            }
        }

        DataType::text()
    }
}

impl Default for TypeTester {
    fn default() -> Self {
        Self::new()
    }
}
