//! Derived columns.

use crate::computations::Computation;
use crate::schema::Schema;
use crate::table::Table;
use alloc::string::String;
use alloc::vec::Vec;
use tabulon_core::{DataType, Error, Result, Value};

impl Table {
    /// Returns a table extended with one computed column per spec.
    ///
    /// Every computation is validated, then run against this table, so no
    /// computation sees another's output. With `replace`, an output name
    /// matching an existing column replaces that column in place;
    /// otherwise a name collision is an error.
    pub fn compute(&self, specs: &[(&str, &dyn Computation)], replace: bool) -> Result<Table> {
        for (_, computation) in specs {
            computation.validate(self)?;
        }

        let mut names: Vec<String> = self.column_names().to_vec();
        let mut types: Vec<DataType> = self.column_types().to_vec();
        // Column position each spec writes to.
        let mut targets: Vec<usize> = Vec::with_capacity(specs.len());

        for (name, computation) in specs {
            let output_type = computation.output_type(self)?;

            match self.schema().index_of(name) {
                Some(existing) => {
                    if !replace {
                        return Err(Error::invalid_schema(alloc::format!(
                            "a column named \"{}\" already exists",
                            name
                        )));
                    }
                    types[existing] = output_type;
                    targets.push(existing);
                }
                None => {
                    names.push(String::from(*name));
                    types.push(output_type);
                    targets.push(names.len() - 1);
                }
            }
        }

        let mut columns: Vec<Vec<Value>> = Vec::with_capacity(specs.len());
        for (_, computation) in specs {
            let column = computation.run(self)?;
            if column.len() != self.n_rows() {
                return Err(Error::invalid_operation(alloc::format!(
                    "computation produced {} values for {} rows",
                    column.len(),
                    self.n_rows()
                )));
            }
            columns.push(column);
        }

        let width = names.len();
        let schema = Schema::build(names.into_iter().map(Some).collect(), types)?;

        let cell_rows: Vec<Vec<Value>> = self
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut cells = row.values().to_vec();
                cells.resize(width, Value::Null);
                for (spec_index, &target) in targets.iter().enumerate() {
                    cells[target] = columns[spec_index][i].clone();
                }
                cells
            })
            .collect();

        Ok(Table::assemble(
            schema,
            cell_rows,
            self.row_name_index().cloned(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::computations::{Change, Formula};
    use alloc::vec;
    use rust_decimal_macros::dec;
    use tabulon_core::DataType as T;

    fn table() -> Table {
        Table::builder()
            .column("before", T::number())
            .column("after", T::number())
            .row(vec![Value::from("1"), Value::from("5")])
            .row(vec![Value::from("2"), Value::from("10")])
            .build()
            .unwrap()
    }

    #[test]
    fn test_compute_appends_in_order() {
        let t = table();
        let change = Change::new("before", "after");
        let doubled = Formula::new(T::number(), |row| {
            match row.get_by_name("before").and_then(Value::as_number) {
                Some(d) => Value::Number(d * dec!(2)),
                None => Value::Null,
            }
        });

        let computed = t
            .compute(&[("change", &change), ("doubled", &doubled)], false)
            .unwrap();

        assert_eq!(
            computed.column_names(),
            &["before", "after", "change", "doubled"]
        );
        assert_eq!(
            computed.rows()[1].get_by_name("change"),
            Some(&Value::Number(dec!(8)))
        );
        assert_eq!(
            computed.rows()[1].get_by_name("doubled"),
            Some(&Value::Number(dec!(4)))
        );
        // The source table is unchanged.
        assert_eq!(t.n_columns(), 2);
    }

    #[test]
    fn test_compute_sees_original_table_only() {
        let t = table();
        // Both computations reference "before"; the second must not see
        // the first's output even though it replaces "before".
        let shift = Formula::new(T::number(), |row| {
            match row.get_by_name("before").and_then(Value::as_number) {
                Some(d) => Value::Number(d + dec!(100)),
                None => Value::Null,
            }
        });
        let copy = Formula::new(T::number(), |row| {
            row.get_by_name("before").cloned().unwrap_or(Value::Null)
        });

        let computed = t
            .compute(&[("before", &shift), ("copy", &copy)], true)
            .unwrap();

        assert_eq!(
            computed.rows()[0].get_by_name("before"),
            Some(&Value::Number(dec!(101)))
        );
        // copy saw the original value.
        assert_eq!(
            computed.rows()[0].get_by_name("copy"),
            Some(&Value::Number(dec!(1)))
        );
    }

    #[test]
    fn test_compute_name_collision_without_replace() {
        let t = table();
        let copy = Formula::new(T::number(), |row| {
            row.get_by_name("before").cloned().unwrap_or(Value::Null)
        });

        assert!(t.compute(&[("before", &copy)], false).is_err());
    }
}
