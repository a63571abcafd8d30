//! Keyed collections of tables.
//!
//! A `TableSet` is an ordered mapping from grouping value to member, where
//! every member is either a `Table` or, after nested grouping, another
//! `TableSet`. All leaf tables share one schema. Table operations that
//! return tables are available here as explicit proxy methods applying to
//! every member; `aggregate` collapses the set back into a single table
//! with one row per leaf group.

use crate::aggregations::Aggregation;
use crate::computations::Computation;
use crate::key::Key;
use crate::ops::Join;
use crate::reshape::{DefaultRow, PivotOptions};
use crate::table::Table;
use alloc::string::String;
use alloc::vec::Vec;
use rust_decimal::Decimal;
use tabulon_core::{DataType, Error, MappedSequence, Result, Row, Value};

/// A member of a `TableSet`: a table, or a nested set.
#[derive(Clone, Debug)]
pub enum Member {
    Table(Table),
    Set(TableSet),
}

/// An ordered, keyed collection of tables sharing a schema.
#[derive(Clone, Debug)]
pub struct TableSet {
    keys: Vec<Value>,
    members: Vec<Member>,
    key_name: String,
    key_type: DataType,
}

impl TableSet {
    /// Creates a set from parallel keys and tables. All tables must share
    /// a schema (names and kinds).
    pub fn new(
        keys: Vec<Value>,
        tables: Vec<Table>,
        key_name: impl Into<String>,
        key_type: DataType,
    ) -> Result<Self> {
        let members = tables.into_iter().map(Member::Table).collect();
        Self::from_members(keys, members, key_name.into(), key_type)
    }

    pub(crate) fn from_members(
        keys: Vec<Value>,
        members: Vec<Member>,
        key_name: String,
        key_type: DataType,
    ) -> Result<Self> {
        if keys.len() != members.len() {
            return Err(Error::invalid_operation(alloc::format!(
                "{} keys for {} member tables",
                keys.len(),
                members.len()
            )));
        }

        let set = Self {
            keys,
            members,
            key_name,
            key_type,
        };

        if let Some(first) = set.first_leaf() {
            let schema = first.schema().clone();
            for leaf in set.leaves() {
                if !schema.matches(leaf.schema()) {
                    return Err(Error::invalid_schema(
                        "all tables in a TableSet must share a schema",
                    ));
                }
            }
        }

        Ok(set)
    }

    /// Returns the number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the set has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the grouping keys in insertion order.
    #[inline]
    pub fn keys(&self) -> &[Value] {
        &self.keys
    }

    /// Returns the name of the grouping key column.
    #[inline]
    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    /// Returns the type of the grouping key.
    #[inline]
    pub fn key_type(&self) -> &DataType {
        &self.key_type
    }

    /// Returns the member stored under the given key.
    pub fn get(&self, key: &Value) -> Option<&Member> {
        let index = self.keys.iter().position(|k| k == key)?;
        self.members.get(index)
    }

    /// Returns the member table stored under the given key.
    pub fn get_table(&self, key: &Value) -> Option<&Table> {
        match self.get(key)? {
            Member::Table(table) => Some(table),
            Member::Set(_) => None,
        }
    }

    /// Iterates over `(key, member)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Member)> {
        self.keys.iter().zip(self.members.iter())
    }

    /// Iterates over `(key, table)` pairs for direct table members.
    pub fn iter_tables(&self) -> impl Iterator<Item = (&Value, &Table)> {
        self.iter().filter_map(|(key, member)| match member {
            Member::Table(table) => Some((key, table)),
            Member::Set(_) => None,
        })
    }

    /// Returns the column names shared by every leaf table.
    pub fn column_names(&self) -> Option<&[String]> {
        self.first_leaf().map(|t| t.column_names())
    }

    /// Returns the column types shared by every leaf table.
    pub fn column_types(&self) -> Option<&[DataType]> {
        self.first_leaf().map(|t| t.column_types())
    }

    fn first_leaf(&self) -> Option<&Table> {
        self.members.first().and_then(|member| match member {
            Member::Table(table) => Some(table),
            Member::Set(set) => set.first_leaf(),
        })
    }

    fn leaves(&self) -> Vec<&Table> {
        let mut leaves = Vec::new();
        collect_leaves(self, &mut leaves);
        leaves
    }

    /// Applies a table-to-table operation to every member, keeping keys.
    /// This is the single dispatch point behind the proxy methods.
    fn proxy(&self, op: &dyn Fn(&Table) -> Result<Table>) -> Result<TableSet> {
        let mut members = Vec::with_capacity(self.members.len());

        for member in &self.members {
            members.push(match member {
                Member::Table(table) => Member::Table(op(table)?),
                Member::Set(set) => Member::Set(set.proxy(op)?),
            });
        }

        Self::from_members(
            self.keys.clone(),
            members,
            self.key_name.clone(),
            self.key_type.clone(),
        )
    }

    /// Applies `select` to every member.
    pub fn select(&self, names: &[&str]) -> Result<TableSet> {
        self.proxy(&|table| table.select(names))
    }

    /// Applies `exclude` to every member.
    pub fn exclude(&self, names: &[&str]) -> Result<TableSet> {
        self.proxy(&|table| table.exclude(names))
    }

    /// Applies `filter` to every member.
    pub fn filter(&self, predicate: impl Fn(&Row) -> bool) -> Result<TableSet> {
        self.proxy(&|table| Ok(table.filter(&predicate)))
    }

    /// Applies `order_by` to every member.
    pub fn order_by(&self, key: Key, reverse: bool) -> Result<TableSet> {
        self.proxy(&|table| table.order_by(key.clone(), reverse))
    }

    /// Applies `limit` to every member.
    pub fn limit(&self, n: usize) -> Result<TableSet> {
        self.proxy(&|table| Ok(table.limit(n)))
    }

    /// Applies `slice` to every member.
    pub fn slice(&self, start: usize, stop: Option<usize>, step: usize) -> Result<TableSet> {
        self.proxy(&|table| table.slice(start, stop, step))
    }

    /// Applies `distinct` to every member.
    pub fn distinct(&self, key: Option<Key>) -> Result<TableSet> {
        self.proxy(&|table| table.distinct(key.clone()))
    }

    /// Applies `rename_columns` to every member.
    pub fn rename_columns(&self, mapping: &[(&str, &str)]) -> Result<TableSet> {
        self.proxy(&|table| table.rename_columns(mapping))
    }

    /// Applies `slug_columns` to every member.
    pub fn slug_columns(&self) -> Result<TableSet> {
        self.proxy(&|table| table.slug_columns())
    }

    /// Applies `compute` to every member.
    pub fn compute(
        &self,
        specs: &[(&str, &dyn Computation)],
        replace: bool,
    ) -> Result<TableSet> {
        self.proxy(&|table| table.compute(specs, replace))
    }

    /// Applies `join` to every member.
    pub fn join(&self, right: &Table, spec: Join) -> Result<TableSet> {
        self.proxy(&|table| table.join(right, spec.clone()))
    }

    /// Applies `pivot` to every member.
    pub fn pivot(&self, key: Key, options: &PivotOptions) -> Result<TableSet> {
        self.proxy(&|table| table.pivot(key.clone(), options))
    }

    /// Applies `normalize` to every member.
    pub fn normalize(
        &self,
        key: &[&str],
        properties: &[&str],
        property_column: &str,
        value_column: &str,
    ) -> Result<TableSet> {
        self.proxy(&|table| table.normalize(key, properties, property_column, value_column))
    }

    /// Applies `denormalize` to every member.
    pub fn denormalize(
        &self,
        key: &[&str],
        property_column: &str,
        value_column: &str,
        default_value: Option<Value>,
    ) -> Result<TableSet> {
        self.proxy(&|table| {
            table.denormalize(key, property_column, value_column, default_value.clone())
        })
    }

    /// Applies `homogenize` to every member.
    pub fn homogenize(
        &self,
        key: &[&str],
        expected: &[Vec<Value>],
        default_row: &DefaultRow,
    ) -> Result<TableSet> {
        self.proxy(&|table| table.homogenize(key, expected, default_row))
    }

    /// Applies `bins` to every member.
    pub fn bins(
        &self,
        column: &str,
        count: usize,
        start: Option<Decimal>,
        end: Option<Decimal>,
    ) -> Result<TableSet> {
        self.proxy(&|table| table.bins(column, count, start, end))
    }

    /// Subdivides every member table, producing a set of sets.
    pub fn group_by(
        &self,
        key: Key,
        key_name: Option<&str>,
        key_type: Option<DataType>,
    ) -> Result<TableSet> {
        let mut members = Vec::with_capacity(self.members.len());

        for member in &self.members {
            members.push(match member {
                Member::Table(table) => {
                    Member::Set(table.group_by(key.clone(), key_name, key_type.clone())?)
                }
                Member::Set(set) => {
                    Member::Set(set.group_by(key.clone(), key_name, key_type.clone())?)
                }
            });
        }

        Self::from_members(
            self.keys.clone(),
            members,
            self.key_name.clone(),
            self.key_type.clone(),
        )
    }

    /// Collapses the set into a table with one row per leaf group: the
    /// grouping key column(s) first, then one column per aggregation.
    pub fn aggregate(&self, specs: &[(&str, &dyn Aggregation)]) -> Result<Table> {
        let first_leaf = self.first_leaf().ok_or_else(|| {
            Error::unsupported_aggregation("can not aggregate an empty TableSet")
        })?;

        // Key columns, outermost grouping first.
        let mut key_columns: Vec<(String, DataType)> = Vec::new();
        let mut set: &TableSet = self;
        loop {
            key_columns.push((set.key_name.clone(), set.key_type.clone()));
            match set.members.first() {
                Some(Member::Set(inner)) => set = inner,
                _ => break,
            }
        }

        let mut names: Vec<Option<String>> =
            key_columns.iter().map(|(n, _)| Some(n.clone())).collect();
        let mut types: Vec<DataType> = key_columns.into_iter().map(|(_, t)| t).collect();

        for (name, aggregation) in specs {
            names.push(Some(String::from(*name)));
            types.push(aggregation.output_type(first_leaf)?);
        }

        let mut rows: Vec<Vec<Value>> = Vec::new();
        self.collect_aggregate_rows(&Vec::new(), specs, &mut rows)?;

        Table::new(rows, names, types, None)
    }

    fn collect_aggregate_rows(
        &self,
        prefix: &[Value],
        specs: &[(&str, &dyn Aggregation)],
        out: &mut Vec<Vec<Value>>,
    ) -> Result<()> {
        for (key, member) in self.iter() {
            let mut next_prefix = prefix.to_vec();
            next_prefix.push(key.clone());

            match member {
                Member::Table(table) => {
                    let aggregated = table.aggregate_all(specs)?;
                    let mut row = next_prefix;
                    row.extend(aggregated.values().iter().cloned());
                    out.push(row);
                }
                Member::Set(set) => {
                    set.collect_aggregate_rows(&next_prefix, specs, out)?;
                }
            }
        }

        Ok(())
    }

    /// Aggregates each member and keeps only those whose aggregated
    /// values satisfy the predicate. The schema is unchanged.
    pub fn having(
        &self,
        specs: &[(&str, &dyn Aggregation)],
        predicate: impl Fn(&MappedSequence<String, Value>) -> bool,
    ) -> Result<TableSet> {
        self.having_inner(specs, &predicate)
    }

    fn having_inner(
        &self,
        specs: &[(&str, &dyn Aggregation)],
        predicate: &dyn Fn(&MappedSequence<String, Value>) -> bool,
    ) -> Result<TableSet> {
        let mut keys = Vec::new();
        let mut members = Vec::new();

        for (key, member) in self.iter() {
            match member {
                Member::Table(table) => {
                    let aggregated = table.aggregate_all(specs)?;
                    if predicate(&aggregated) {
                        keys.push(key.clone());
                        members.push(Member::Table(table.clone()));
                    }
                }
                Member::Set(set) => {
                    keys.push(key.clone());
                    members.push(Member::Set(set.having_inner(specs, predicate)?));
                }
            }
        }

        Self::from_members(keys, members, self.key_name.clone(), self.key_type.clone())
    }

    /// Vertically concatenates every leaf table: the reverse of
    /// `group_by`.
    pub fn merge(&self) -> Result<Table> {
        let leaves = self.leaves();
        if leaves.is_empty() {
            return Err(Error::invalid_operation("can not merge an empty TableSet"));
        }

        Table::merge(&leaves, None, None)
    }
}

fn collect_leaves<'s>(set: &'s TableSet, out: &mut Vec<&'s Table>) {
    for member in &set.members {
        match member {
            Member::Table(table) => out.push(table),
            Member::Set(inner) => collect_leaves(inner, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregations::{Count, Median, Sum};
    use alloc::vec;
    use rust_decimal_macros::dec;
    use tabulon_core::DataType as T;

    fn table() -> Table {
        Table::builder()
            .column("state", T::text())
            .column("gender", T::text())
            .column("age", T::number())
            .row(vec![Value::from("NY"), Value::from("f"), Value::from("20")])
            .row(vec![Value::from("NY"), Value::from("m"), Value::from("30")])
            .row(vec![Value::from("CA"), Value::from("f"), Value::from("40")])
            .row(vec![Value::from("CA"), Value::from("f"), Value::from("60")])
            .build()
            .unwrap()
    }

    fn groups() -> TableSet {
        table().group_by("state", None, None).unwrap()
    }

    #[test]
    fn test_aggregate() {
        let result = groups()
            .aggregate(&[
                ("count", &Count::rows()),
                ("median_age", &Median::new("age")),
            ])
            .unwrap();

        assert_eq!(result.column_names(), &["state", "count", "median_age"]);
        assert_eq!(result.n_rows(), 2);
        assert_eq!(
            result.rows()[0].values(),
            &[
                Value::from("NY"),
                Value::Number(dec!(2)),
                Value::Number(dec!(25))
            ]
        );
        assert_eq!(
            result.rows()[1].values(),
            &[
                Value::from("CA"),
                Value::Number(dec!(2)),
                Value::Number(dec!(50))
            ]
        );
    }

    #[test]
    fn test_nested_group_by_aggregate() {
        let nested = groups().group_by(Key::from("gender"), None, None).unwrap();
        let result = nested.aggregate(&[("total", &Sum::new("age"))]).unwrap();

        assert_eq!(result.column_names(), &["state", "gender", "total"]);
        // NY/f, NY/m, CA/f.
        assert_eq!(result.n_rows(), 3);
        assert_eq!(
            result.rows()[2].values(),
            &[
                Value::from("CA"),
                Value::from("f"),
                Value::Number(dec!(100))
            ]
        );
    }

    #[test]
    fn test_proxy_select() {
        let selected = groups().select(&["age"]).unwrap();
        assert_eq!(selected.len(), 2);
        assert_eq!(
            selected.column_names().map(|n| n.len()),
            Some(1)
        );
        // Keys survive proxying.
        assert_eq!(selected.keys(), groups().keys());
    }

    #[test]
    fn test_proxy_filter() {
        let filtered = groups()
            .filter(|row| {
                row.get_by_name("age")
                    .and_then(Value::as_number)
                    .map(|age| age >= dec!(30))
                    .unwrap_or(false)
            })
            .unwrap();

        assert_eq!(filtered.get_table(&Value::from("NY")).unwrap().n_rows(), 1);
        assert_eq!(filtered.get_table(&Value::from("CA")).unwrap().n_rows(), 2);
    }

    #[test]
    fn test_having() {
        let kept = groups()
            .having(&[("total", &Sum::new("age"))], |aggregated| {
                aggregated
                    .get_by_key(&String::from("total"))
                    .and_then(|v| v.as_number())
                    .map(|total| total > dec!(60))
                    .unwrap_or(false)
            })
            .unwrap();

        assert_eq!(kept.len(), 1);
        assert_eq!(kept.keys(), &[Value::from("CA")]);
    }

    #[test]
    fn test_merge_reverses_group_by() {
        let merged = groups().merge().unwrap();
        assert_eq!(merged.n_rows(), table().n_rows());
        assert_eq!(merged.column_names(), table().column_names());
    }

    #[test]
    fn test_empty_tableset_aggregate_is_unsupported() {
        let empty = TableSet::new(Vec::new(), Vec::new(), "group", T::text()).unwrap();
        assert!(matches!(
            empty.aggregate(&[("count", &Count::rows())]),
            Err(Error::UnsupportedAggregation { .. })
        ));
    }

    #[test]
    fn test_mismatched_schemas_rejected() {
        let a = Table::builder()
            .column("x", T::text())
            .row(vec![Value::from("1")])
            .build()
            .unwrap();
        let b = Table::builder()
            .column("y", T::number())
            .row(vec![Value::from("1")])
            .build()
            .unwrap();

        let result = TableSet::new(
            vec![Value::from("a"), Value::from("b")],
            vec![a, b],
            "group",
            T::text(),
        );
        assert!(result.is_err());
    }
}
