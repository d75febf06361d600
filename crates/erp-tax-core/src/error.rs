//! # Error Types
//!
//! Domain-specific error types for erp-tax-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  erp-tax-core errors (this file)                                       │
//! │  ├── TaxError         - What callers see (always VALIDATION_FAILED)    │
//! │  └── ValidationError  - The violated precondition, with field + value  │
//! │                                                                         │
//! │  erp-tax-config errors (separate crate)                                │
//! │  └── ConfigError      - File, parse and template failures              │
//! │                                                                         │
//! │  Flow: ValidationError → TaxError → ConfigError / caller transaction   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. The engine performs no I/O, so every failure is a caller input problem
//! 2. Every error names the offending field and value
//! 3. Cascade errors additionally carry the row index
//! 4. Errors propagate immediately; nothing is caught or retried internally

use thiserror::Error;

/// Machine-readable code shared by every engine failure.
pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";

// =============================================================================
// Tax Error
// =============================================================================

/// Errors returned by the rounding engine and the cascade resolver.
///
/// There is exactly one failure category. The two variants only differ in
/// whether the failure can be pinned to a tax row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxError {
    /// A document-level or line-level input was rejected.
    #[error("VALIDATION_FAILED: {0}")]
    Validation(#[from] ValidationError),

    /// A tax row was rejected while resolving a document.
    ///
    /// ## User Workflow
    /// ```text
    /// Submit invoice (rows: [CESS on GST, GST])
    ///      │
    ///      ▼
    /// calculate_document_taxes
    ///      │
    ///      ▼
    /// RowValidation { row: 0, source: MissingPredecessor { .. } }
    ///      │
    ///      ▼
    /// Invoice submission aborted, UI shows "tax row 0: ..."
    /// ```
    #[error("VALIDATION_FAILED: tax row {row}: {source}")]
    RowValidation {
        row: usize,
        #[source]
        source: ValidationError,
    },
}

impl TaxError {
    /// Returns the error code. Always [`VALIDATION_FAILED`].
    #[inline]
    pub const fn code(&self) -> &'static str {
        VALIDATION_FAILED
    }

    /// Returns the row index for cascade failures.
    #[inline]
    pub fn row(&self) -> Option<usize> {
        match self {
            TaxError::Validation(_) => None,
            TaxError::RowValidation { row, .. } => Some(*row),
        }
    }

    /// Returns the name of the offending field.
    #[inline]
    pub fn field(&self) -> &str {
        self.validation().field()
    }

    /// Returns the underlying validation failure.
    pub fn validation(&self) -> &ValidationError {
        match self {
            TaxError::Validation(err) => err,
            TaxError::RowValidation { source, .. } => source,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Values are kept as text so one error type covers integers, decimals and
/// floats coming in from the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// Amounts and rates must be zero or positive.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: String },

    /// NaN or infinity reached the boundary.
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: String, value: String },

    /// Minor-unit amounts must be whole numbers.
    #[error("{field} must be a whole number of minor units, got {value}")]
    Fractional { field: String, value: String },

    /// Invalid format (e.g. unparseable rate).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A cascading charge type was used on the first row.
    #[error("{field} '{charge_type}' requires a preceding tax row")]
    MissingPredecessor { field: String, charge_type: String },

    /// The value does not fit in an `i64` minor-unit amount.
    #[error("{field} is out of range: {value}")]
    Overflow { field: String, value: String },
}

impl ValidationError {
    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::Negative { field, .. }
            | ValidationError::NotFinite { field, .. }
            | ValidationError::Fractional { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::MissingPredecessor { field, .. }
            | ValidationError::Overflow { field, .. } => field,
        }
    }

    /// Pins this failure to a tax row.
    #[inline]
    pub fn at_row(self, row: usize) -> TaxError {
        TaxError::RowValidation { row, source: self }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with TaxError.
pub type TaxResult<T> = Result<T, TaxError>;

// =============================================================================
// Unit Tests
// =============================================================================
