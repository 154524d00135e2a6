//! Engine error type.
//!
//! A validation run either fails fast — broken configuration or an
//! unreadable data source, before any row is judged — or completes with a
//! report. Data defects are never errors; they are findings.

use tablecheck_core::SchemaError;
use thiserror::Error;

use crate::source::SourceError;

/// Fatal failure of a validation run.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The schema itself is broken
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A declared table's data could not be obtained
    #[error(transparent)]
    Source(#[from] SourceError),
}
