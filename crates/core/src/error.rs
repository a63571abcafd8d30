//! Error types for tabulon.

use crate::types::DataKind;
use alloc::string::String;
use core::fmt;

/// Result type alias for tabulon operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for tabulon operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A raw value could not be parsed as the target data type. When the
    /// failure happened inside table construction or a computation, the
    /// offending row and column are attached.
    Cast {
        value: String,
        kind: DataKind,
        location: Option<(usize, String)>,
    },
    /// An operation was applied to a column of an incompatible type.
    DataType {
        column: String,
        message: String,
    },
    /// Column not found.
    ColumnNotFound {
        name: String,
    },
    /// A left row had no match while a match was required.
    Join {
        row: usize,
        key: String,
    },
    /// An aggregation was requested in a context that cannot hold its result.
    UnsupportedAggregation {
        message: String,
    },
    /// Invalid schema definition.
    InvalidSchema {
        message: String,
    },
    /// Row names were malformed (duplicate, numeric, or wrong length).
    InvalidRowNames {
        message: String,
    },
    /// A reader-side field exceeded the configured size limit.
    /// Carries the limit and the line on which the field started.
    FieldSizeLimit {
        limit: usize,
        line: usize,
    },
    /// Invalid operation.
    InvalidOperation {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Cast {
                value,
                kind,
                location,
            } => {
                write!(f, "Can not parse value \"{}\" as {}", value, kind)?;
                if let Some((row, column)) = location {
                    write!(f, " (row {}, column \"{}\")", row, column)?;
                }
                Ok(())
            }
            Error::DataType { column, message } => {
                write!(f, "Column \"{}\": {}", column, message)
            }
            Error::ColumnNotFound { name } => {
                write!(f, "Column not found: {}", name)
            }
            Error::Join { row, key } => {
                write!(f, "Row {} (key {}) has no match in the right table", row, key)
            }
            Error::UnsupportedAggregation { message } => {
                write!(f, "Unsupported aggregation: {}", message)
            }
            Error::InvalidSchema { message } => {
                write!(f, "Invalid schema: {}", message)
            }
            Error::InvalidRowNames { message } => {
                write!(f, "Invalid row names: {}", message)
            }
            Error::FieldSizeLimit { limit, line } => {
                write!(
                    f,
                    "Field on line {} exceeds the maximum length of {} characters",
                    line, limit
                )
            }
            Error::InvalidOperation { message } => {
                write!(f, "Invalid operation: {}", message)
            }
        }
    }
}

impl Error {
    /// Creates a cast error for an input that failed to parse.
    pub fn cast(value: impl Into<String>, kind: DataKind) -> Self {
        Error::Cast {
            value: value.into(),
            kind,
            location: None,
        }
    }

    /// Attaches a row index and column name to a cast error. Other errors
    /// pass through unchanged.
    pub fn at(self, row: usize, column: impl Into<String>) -> Self {
        match self {
            Error::Cast { value, kind, .. } => Error::Cast {
                value,
                kind,
                location: Some((row, column.into())),
            },
            other => other,
        }
    }

    /// Creates a data type error for a column.
    pub fn data_type(column: impl Into<String>, message: impl Into<String>) -> Self {
        Error::DataType {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Creates a column not found error.
    pub fn column_not_found(name: impl Into<String>) -> Self {
        Error::ColumnNotFound { name: name.into() }
    }

    /// Creates a join error for an unmatched left row.
    pub fn join(row: usize, key: impl Into<String>) -> Self {
        Error::Join {
            row,
            key: key.into(),
        }
    }

    /// Creates an unsupported aggregation error.
    pub fn unsupported_aggregation(message: impl Into<String>) -> Self {
        Error::UnsupportedAggregation {
            message: message.into(),
        }
    }

    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Error::InvalidSchema {
            message: message.into(),
        }
    }

    /// Creates an invalid row names error.
    pub fn invalid_row_names(message: impl Into<String>) -> Self {
        Error::InvalidRowNames {
            message: message.into(),
        }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Error::InvalidOperation {
            message: message.into(),
        }
    }
}
