//! Dataset validation engine for tablecheck.
//!
//! Takes a parsed [`tablecheck_core::Schema`] plus a [`TableSource`] and
//! produces a [`tablecheck_core::ValidationReport`]. Configuration defects
//! (unknown formats, dangling foreign keys, cycles) abort the run before
//! any row is read; data defects are collected exhaustively and never stop
//! validation. Enum and foreign-key membership compare raw strings
//! exactly, so an int-typed key written `01` does not match the key `1`.

pub mod engine;
pub mod error;
pub mod fkgraph;
pub mod resolve;
pub mod source;
pub mod table;
pub mod value;

pub use engine::DatasetValidator;
pub use error::ValidateError;
pub use fkgraph::{ForeignKeyEdge, ForeignKeyGraph};
pub use resolve::{ColumnRules, ResolvedTable, resolve};
pub use source::{MemorySource, Row, SourceError, TableSource, row};
pub use table::validate_table;
pub use value::{CoerceError, FormatCheck, FormatRegistry, TypedValue, coerce};
