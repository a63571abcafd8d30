//! tabulon - Immutable, exact-decimal, in-memory tables.
//!
//! A `Table` is an ordered set of named, typed columns over ordered rows.
//! Tables never change: every operation returns a new table, and derived
//! tables share row storage with their ancestors. Numbers are exact
//! decimals throughout; there is no binary-float arithmetic on table
//! data.
//!
//! The pieces:
//!
//! - `Table` / `TableBuilder`: construction, casting, and the relational
//!   operations (`select`, `filter`, `order_by`, `distinct`, `join`,
//!   `merge`, ...)
//! - `TableSet`: grouped tables from `group_by`, with proxy operations,
//!   nested grouping, `aggregate`, and `having`
//! - `aggregations`: column reducers (`Sum`, `Mean`, `Median`, `StDev`,
//!   the quantile family, ...)
//! - `computations`: row-wise derived columns (`Formula`, `Change`,
//!   `Percent`, `Rank`, ...)
//! - reshaping: `pivot`, `normalize`, `denormalize`, `homogenize`,
//!   `bins`
//!
//! # Example
//!
//! ```rust
//! use tabulon::aggregations::{Count, Median};
//! use tabulon::{DataType, Table, Value};
//!
//! let table = Table::builder()
//!     .column("state", DataType::text())
//!     .column("age", DataType::number())
//!     .row(vec![Value::from("NY"), Value::from("21")])
//!     .row(vec![Value::from("NY"), Value::from("35")])
//!     .row(vec![Value::from("CA"), Value::from("28")])
//!     .build()
//!     .unwrap();
//!
//! let by_state = table.group_by("state", None, None).unwrap();
//! let summary = by_state
//!     .aggregate(&[("count", &Count::rows()), ("median_age", &Median::new("age"))])
//!     .unwrap();
//!
//! assert_eq!(summary.n_rows(), 2);
//! ```

#![no_std]

extern crate alloc;

pub mod aggregations;
mod column;
pub mod computations;
mod key;
mod ops;
mod reshape;
mod schema;
mod table;
mod tableset;

pub use column::Column;
pub use key::Key;
pub use ops::Join;
pub use reshape::{DefaultRow, PivotOptions};
pub use schema::Schema;
pub use table::{RowNames, Table, TableBuilder};
pub use tableset::{Member, TableSet};

// The data model, re-exported so one dependency suffices.
pub use tabulon_core::{
    naming, types, warn, DataKind, DataType, Error, KeyIndex, MappedSequence, Result, Row,
    TypeTester, Value, Warning,
};
