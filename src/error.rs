//! Custom error types for budget reports
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::report::ReportKind;

/// The main error type for budget report operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// A row could not be turned into a transaction
    #[error("Malformed row '{row}': {reason}")]
    MalformedRow { row: String, reason: String },

    /// The first row has a column count no report kind understands
    #[error("Unsupported column count {count} in row '{row}' (expected 3 or 4)")]
    UnsupportedColumns { count: usize, row: String },

    /// Reports of different kinds were combined
    #[error("Cannot combine reports of different kinds: expected {expected}, got {found}")]
    VariantMismatch {
        expected: ReportKind,
        found: ReportKind,
    },

    /// Report totals do not fit in the cent range
    #[error("Totals of report '{0}' are out of range")]
    AmountOverflow(String),

    /// Combination was asked for with no reports at all
    #[error("Cannot combine an empty list of reports")]
    EmptyCombination,

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BudgetError {
    /// Create a malformed row error
    pub fn malformed_row(row: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            row: row.into(),
            reason: reason.into(),
        }
    }

    /// Create a variant mismatch error
    pub fn variant_mismatch(expected: ReportKind, found: ReportKind) -> Self {
        Self::VariantMismatch { expected, found }
    }

    /// Check if this is a malformed row error
    pub fn is_malformed_row(&self) -> bool {
        matches!(self, Self::MalformedRow { .. } | Self::UnsupportedColumns { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a variant mismatch error
    pub fn is_variant_mismatch(&self) -> bool {
        matches!(self, Self::VariantMismatch { .. })
    }
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for budget report operations
pub type BudgetResult<T> = Result<T, BudgetError>;
