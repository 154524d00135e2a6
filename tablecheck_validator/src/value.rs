//! Scalar value validators.
//!
//! Two layers, both pure and total: type coercion of a raw string into a
//! [`TypedValue`], and named format checks applied to the typed value.
//! Format checks are selected through a fixed [`FormatRegistry`] so that
//! unknown names can be rejected once, when the schema is resolved,
//! instead of per row.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use tablecheck_core::ColumnType;

/// A raw value after successful type coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
}

/// A raw value that failed coercion to its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoerceError {
    /// The declared type the value was checked against
    pub expected: ColumnType,
    /// The offending raw value
    pub raw: String,
}

impl fmt::Display for CoerceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value '{}' is not a valid {}", self.raw, self.expected)
    }
}

impl std::error::Error for CoerceError {}

/// Coerces a raw string into the declared column type.
///
/// - `int`: lossless `i64` parse; fractional input fails
/// - `float`: `f64` parse; integer-looking input is accepted
/// - `str`: always succeeds, empty included (emptiness is the required
///   check's concern, not a type failure)
/// - `date`: strict `YYYY-MM-DD`; invalid calendar dates fail
pub fn coerce(raw: &str, ty: ColumnType) -> Result<TypedValue, CoerceError> {
    let fail = || CoerceError {
        expected: ty,
        raw: raw.to_string(),
    };

    match ty {
        ColumnType::Int => raw.parse::<i64>().map(TypedValue::Int).map_err(|_| fail()),
        ColumnType::Float => raw.parse::<f64>().map(TypedValue::Float).map_err(|_| fail()),
        ColumnType::Str => Ok(TypedValue::Str(raw.to_string())),
        ColumnType::Date => parse_iso_date(raw).map(TypedValue::Date).ok_or_else(fail),
    }
}

/// Parses a calendar date in the single canonical `YYYY-MM-DD` form.
///
/// The shape is checked before chrono parses the content, so variants like
/// `2024-2-3` or `2024/02/03` are rejected rather than silently coerced.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    if !bytes
        .iter()
        .enumerate()
        .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit())
    {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Pragmatic syntactic email check: exactly one `@`, a non-empty local
/// part, and a domain containing at least one `.`. This is the documented
/// contract, not an approximation of full RFC validation.
pub fn is_valid_email(value: &str) -> bool {
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty() && domain.contains('.')
}

/// A named format predicate over typed values.
pub type FormatCheck = fn(&TypedValue) -> bool;

fn check_email(value: &TypedValue) -> bool {
    match value {
        TypedValue::Str(s) => is_valid_email(s),
        _ => false,
    }
}

fn check_date(value: &TypedValue) -> bool {
    match value {
        // A column typed `date` already passed the canonical-form parse
        TypedValue::Date(_) => true,
        TypedValue::Str(s) => parse_iso_date(s).is_some(),
        _ => false,
    }
}

/// Fixed registry of format validators, keyed by the name used in the
/// schema document. Checked for completeness at schema-resolve time.
pub struct FormatRegistry {
    checks: HashMap<&'static str, FormatCheck>,
}

impl FormatRegistry {
    /// Creates the registry with the built-in formats: `email`, `date`.
    pub fn with_builtins() -> Self {
        let mut checks: HashMap<&'static str, FormatCheck> = HashMap::new();
        checks.insert("email", check_email);
        checks.insert("date", check_date);
        Self { checks }
    }

    /// Looks up a format check by name.
    pub fn get(&self, name: &str) -> Option<FormatCheck> {
        self.checks.get(name).copied()
    }

    /// Returns true if the registry knows the named format.
    pub fn contains(&self, name: &str) -> bool {
        self.checks.contains_key(name)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
