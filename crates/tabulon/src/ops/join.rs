//! Equi-joins.
//!
//! Joins build a hash index over the right table's keys and probe it with
//! each left row, so cost is linear in the two row counts. Null keys never
//! match. The right key columns are omitted from the output; other
//! right-column name collisions get a `2` (`3`, ...) suffix.

use crate::key::Key;
use crate::schema::Schema;
use crate::table::Table;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use tabulon_core::types::coerce_to_text;
use tabulon_core::{DataKind, DataType, Error, Result, Value};

/// A join specification: keys plus behavior flags.
///
/// The default join is a left outer equi-join on the same-named key in
/// both tables.
#[derive(Clone, Debug)]
pub struct Join {
    keys: Option<(Key, Key)>,
    inner: bool,
    full_outer: bool,
    require_match: bool,
    columns: Option<Vec<String>>,
}

impl Join {
    /// Joins on the same key in both tables.
    pub fn on(key: impl Into<Key>) -> Self {
        let key = key.into();
        Self {
            keys: Some((key.clone(), key)),
            inner: false,
            full_outer: false,
            require_match: false,
            columns: None,
        }
    }

    /// Joins on different keys for the left and right tables.
    pub fn on_keys(left: impl Into<Key>, right: impl Into<Key>) -> Self {
        Self {
            keys: Some((left.into(), right.into())),
            inner: false,
            full_outer: false,
            require_match: false,
            columns: None,
        }
    }

    /// Joins row N of the left table with row N of the right table.
    pub fn sequential() -> Self {
        Self {
            keys: None,
            inner: false,
            full_outer: false,
            require_match: false,
            columns: None,
        }
    }

    /// Keeps only left rows with at least one match.
    pub fn inner(mut self) -> Self {
        self.inner = true;
        self
    }

    /// Also keeps right rows with no left match.
    pub fn full_outer(mut self) -> Self {
        self.full_outer = true;
        self
    }

    /// Fails with a `Join` error when any left row has no match.
    pub fn require_match(mut self) -> Self {
        self.require_match = true;
        self
    }

    /// Restricts which right columns appear in the output.
    pub fn columns(mut self, names: &[&str]) -> Self {
        self.columns = Some(names.iter().map(|n| String::from(*n)).collect());
        self
    }
}

impl Table {
    /// Joins this table with `right` per the given specification.
    pub fn join(&self, right: &Table, spec: Join) -> Result<Table> {
        match &spec.keys {
            None => self.join_sequential(right, &spec),
            Some((left_key, right_key)) => self.join_keyed(right, left_key, right_key, &spec),
        }
    }

    fn join_keyed(
        &self,
        right: &Table,
        left_key: &Key,
        right_key: &Key,
        spec: &Join,
    ) -> Result<Table> {
        let mut left_compounds = left_key.resolve(self)?;
        let mut right_compounds = right_key.resolve(right)?;

        let left_kinds = key_component_kinds(left_key, self);
        let right_kinds = key_component_kinds(right_key, right);

        if left_kinds.len() != right_kinds.len() {
            return Err(Error::invalid_operation(
                "join keys must have the same number of columns",
            ));
        }

        // Keys of different kinds compare as text; identical kinds compare
        // natively.
        for (component, (l, r)) in left_kinds.iter().zip(right_kinds.iter()).enumerate() {
            if let (Some(lk), Some(rk)) = (l, r) {
                if lk != rk {
                    coerce_component(&mut left_compounds, component);
                    coerce_component(&mut right_compounds, component);
                }
            }
        }

        // The right key columns are omitted from the output unless an
        // explicit column list asks for them.
        let right_key_indices: Vec<usize> = match right_key.column_names() {
            Some(names) => {
                let mut indices = Vec::with_capacity(names.len());
                for name in names {
                    indices.push(right.schema().require(name)?);
                }
                indices
            }
            None => Vec::new(),
        };

        let (schema, kept_right) =
            join_schema(self, right, &right_key_indices, spec.columns.as_deref())?;

        // Build phase.
        let mut right_hash: HashMap<&[Value], Vec<usize>> = HashMap::new();
        for (i, compound) in right_compounds.iter().enumerate() {
            if compound.iter().any(Value::is_null) {
                continue;
            }
            right_hash.entry(compound.as_slice()).or_default().push(i);
        }

        // Probe phase.
        let mut cell_rows: Vec<Vec<Value>> = Vec::with_capacity(self.n_rows());
        let mut right_matched = alloc::vec![false; right.n_rows()];

        for (i, compound) in left_compounds.iter().enumerate() {
            let matches = if compound.iter().any(Value::is_null) {
                None
            } else {
                right_hash.get(compound.as_slice())
            };

            match matches {
                Some(indices) => {
                    for &right_index in indices {
                        right_matched[right_index] = true;
                        cell_rows.push(combine(
                            self.rows()[i].values(),
                            Some(right.rows()[right_index].values()),
                            &kept_right,
                        ));
                    }
                }
                None => {
                    if spec.require_match {
                        return Err(Error::join(i, render_compound(compound)));
                    }
                    if !spec.inner || spec.full_outer {
                        cell_rows.push(combine(self.rows()[i].values(), None, &kept_right));
                    }
                }
            }
        }

        if spec.full_outer {
            let left_width = self.n_columns();
            for (i, matched) in right_matched.iter().enumerate() {
                if !matched {
                    let mut cells = alloc::vec![Value::Null; left_width];
                    let right_row = right.rows()[i].values();
                    cells.extend(kept_right.iter().map(|&k| right_row[k].clone()));
                    cell_rows.push(cells);
                }
            }
        }

        Ok(Table::assemble(schema, cell_rows, None))
    }

    fn join_sequential(&self, right: &Table, spec: &Join) -> Result<Table> {
        let (schema, kept_right) = join_schema(self, right, &[], spec.columns.as_deref())?;

        let row_count = if spec.full_outer {
            self.n_rows().max(right.n_rows())
        } else if spec.inner {
            self.n_rows().min(right.n_rows())
        } else {
            self.n_rows()
        };

        let left_width = self.n_columns();
        let mut cell_rows = Vec::with_capacity(row_count);

        for i in 0..row_count {
            let mut cells: Vec<Value> = match self.rows().get(i) {
                Some(row) => row.values().to_vec(),
                None => alloc::vec![Value::Null; left_width],
            };
            match right.rows().get(i) {
                Some(row) => {
                    let values = row.values();
                    cells.extend(kept_right.iter().map(|&k| values[k].clone()));
                }
                None => cells.extend(kept_right.iter().map(|_| Value::Null)),
            }
            cell_rows.push(cells);
        }

        Ok(Table::assemble(schema, cell_rows, None))
    }
}

/// Returns the per-component kinds of a key, or `None` components for
/// function keys (which compare natively).
fn key_component_kinds(key: &Key, table: &Table) -> Vec<Option<DataKind>> {
    match key.column_names() {
        Some(names) => names
            .iter()
            .map(|name| {
                table
                    .schema()
                    .index_of(name)
                    .map(|i| table.column_types()[i].kind())
            })
            .collect(),
        None => Vec::from([None]),
    }
}

fn coerce_component(compounds: &mut [Vec<Value>], component: usize) {
    for compound in compounds.iter_mut() {
        let value = &compound[component];
        if !value.is_null() && !matches!(value, Value::Text(_)) {
            compound[component] = Value::Text(coerce_to_text(value));
        }
    }
}

/// Builds the join output schema and the list of right-column positions
/// that appear in it.
fn join_schema(
    left: &Table,
    right: &Table,
    right_key_indices: &[usize],
    columns: Option<&[String]>,
) -> Result<(Schema, Vec<usize>)> {
    let mut names: Vec<String> = left.column_names().to_vec();
    let mut types: Vec<DataType> = left.column_types().to_vec();
    let mut kept_right: Vec<usize> = Vec::new();

    for (i, (name, data_type)) in right
        .column_names()
        .iter()
        .zip(right.column_types().iter())
        .enumerate()
    {
        if columns.is_none() && right_key_indices.contains(&i) {
            continue;
        }
        if let Some(allowed) = columns {
            if !allowed.iter().any(|a| a == name) {
                continue;
            }
        }

        names.push(collision_name(name, &names));
        types.push(data_type.clone());
        kept_right.push(i);
    }

    let schema = Schema::of(names.into_iter().zip(types).collect())?;
    Ok((schema, kept_right))
}

/// Disambiguates a colliding right-column name by suffixing `2`, `3`, ...
fn collision_name(name: &str, taken: &[String]) -> String {
    if !taken.iter().any(|t| t == name) {
        return String::from(name);
    }

    let mut suffix = 2usize;
    loop {
        let candidate = alloc::format!("{}{}", name, suffix);
        if !taken.iter().any(|t| *t == candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

fn combine(left: &[Value], right: Option<&[Value]>, kept_right: &[usize]) -> Vec<Value> {
    let mut cells = left.to_vec();
    match right {
        Some(values) => cells.extend(kept_right.iter().map(|&k| values[k].clone())),
        None => cells.extend(kept_right.iter().map(|_| Value::Null)),
    }
    cells
}

fn render_compound(compound: &[Value]) -> String {
    let parts: Vec<String> = compound.iter().map(coerce_to_text).collect();
    parts.join(", ")
}
