//! tabulon-core - The typed data model for the tabulon table engine.
//!
//! This crate provides the foundational types:
//!
//! - `DataKind` / `DataType`: the six column types (Text, Number, Boolean,
//!   Date, DateTime, TimeDelta) with per-type parse configuration
//! - `Value`: a typed cell, either a native value or `Null`
//! - `Row`: an immutable cell sequence sharing a column-name index
//! - `KeyIndex` / `MappedSequence`: ordered containers addressable by
//!   position and by unique key
//! - `TypeTester`: column type inference over sampled raw cells
//! - `Error` / `Warning`: the error taxonomy and the warning channel
//!
//! # Example
//!
//! ```rust
//! use tabulon_core::{DataType, Value};
//!
//! let number = DataType::number();
//!
//! let value = number.cast(&Value::from("1,234.5")).unwrap();
//! assert_eq!(value.as_number().unwrap().to_string(), "1234.5");
//!
//! assert_eq!(number.cast(&Value::from("n/a")).unwrap(), Value::Null);
//! assert!(number.cast(&Value::from("pony")).is_err());
//! ```

#![no_std]

extern crate alloc;

mod error;
pub mod inference;
pub mod naming;
mod row;
mod sequence;
pub mod types;
mod value;
pub mod warn;

pub use error::{Error, Result};
pub use inference::TypeTester;
pub use row::Row;
pub use sequence::{KeyIndex, MappedSequence};
pub use types::{DataKind, DataType};
pub use value::Value;
pub use warn::Warning;
