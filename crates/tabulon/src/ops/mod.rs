//! Relational operations on tables.
//!
//! Every operation returns a new `Table`; the receiver is never changed.
//! Operations that only reorder or drop rows share the underlying row
//! objects with the source table.

mod aggregate;
mod compute;
mod distinct;
mod filter;
mod group;
mod join;
mod limit;
mod merge;
mod order;
mod rename;
mod select;

pub use join::Join;
