//! The warning channel.
//!
//! Non-fatal conditions (duplicate column names, padded rows, statistics
//! over columns with nulls) are reported here rather than failing the
//! operation. Every warning flows through [`emit`], which renders a
//! one-line diagnostic on the `log` facade; callers suppress or upgrade
//! warnings by installing their own logger.

use alloc::string::String;
use core::fmt;

/// A non-fatal diagnostic raised by a table operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// A calculation excluded null values from a column.
    NullCalculation {
        operation: String,
        column: String,
    },
    /// A duplicate column name was disambiguated.
    DuplicateColumn {
        name: String,
        renamed: String,
    },
    /// A column had no name and one was assigned.
    UnnamedColumn {
        assigned: String,
    },
    /// A row was padded with nulls or truncated to the schema width.
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// A forced type referred to a column that does not exist.
    UnknownForcedColumn {
        name: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NullCalculation { operation, column } => {
                write!(
                    f,
                    "Column \"{}\" contains nulls. These will be excluded from the {} calculation.",
                    column, operation
                )
            }
            Warning::DuplicateColumn { name, renamed } => {
                write!(
                    f,
                    "Column name \"{}\" already exists. Column will be renamed to \"{}\".",
                    name, renamed
                )
            }
            Warning::UnnamedColumn { assigned } => {
                write!(f, "Column name not specified. \"{}\" will be used.", assigned)
            }
            Warning::RowLength { row, expected, actual } => {
                if actual < expected {
                    write!(
                        f,
                        "Row {} has {} values; padding to {} with nulls.",
                        row, actual, expected
                    )
                } else {
                    write!(
                        f,
                        "Row {} has {} values; truncating to {}.",
                        row, actual, expected
                    )
                }
            }
            Warning::UnknownForcedColumn { name } => {
                write!(f, "Forced type for unknown column \"{}\" was ignored.", name)
            }
        }
    }
}

/// Reports a warning as a one-line diagnostic.
pub fn emit(warning: Warning) {
    log::warn!("{}", warning);
}
