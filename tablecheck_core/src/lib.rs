//! # tablecheck core
//!
//! Core data structures for the tablecheck validation engine.
//!
//! A schema is a declarative description of a small relational dataset:
//! required columns and their types, format validators, enumerated value
//! sets, and cross-table foreign keys. The schema has no execution
//! semantics of its own; the validator crate consumes it together with
//! row data and produces a [`ValidationReport`].
//!
//! ## Key concepts
//!
//! - **Schema / TableSpec / ColumnSpec**: the read-only configuration tree
//! - **Finding**: one reported violation, tied to a table/row/column
//! - **ValidationReport**: the ordered set of findings from one run
//! - **SchemaError**: a fatal configuration defect, distinct from data
//!   defects, which are findings

pub mod builder;
pub mod error;
pub mod finding;
pub mod schema;

pub use builder::*;
pub use error::*;
pub use finding::*;
pub use schema::*;
