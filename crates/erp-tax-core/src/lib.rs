//! # erp-tax-core: Pure Tax Computation for the ERP
//!
//! This crate is the monetary tax engine of the ERP. It contains the
//! rounding policies and the cascading tax resolver as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ERP Tax Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Document assembly (invoices, credit notes)             │   │
//! │  │   rate resolution ──► ordered TaxRow list ──► submit            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ erp-tax-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ rounding  │  │  cascade  │  │ validation│  │   │
//! │  │   │  TaxRow   │  │ line tax  │  │ doc taxes │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        Consumers: tax-box mapping, ledgers, UI breakdowns       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (TaxRow, RoundingMethod, DocumentTaxes, ...)
//! - [`money`] - Minor-unit ↔ decimal conversions
//! - [`rounding`] - Line tax with five rounding policies
//! - [`cascade`] - Document taxes across chained rows
//! - [`template`] - Named reusable row sets
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, no hidden state
//! 2. **No I/O**: nothing to lock, nothing to release, safe to call in parallel
//! 3. **Integer Money**: amounts are i64 minor units, rates are decimals
//! 4. **Explicit Errors**: every failure is `VALIDATION_FAILED` with context
//!
//! ## Example Usage
//!
//! ```rust
//! use erp_tax_core::{calculate_document_taxes, RoundingMethod, TaxRow};
//! use rust_decimal::Decimal;
//!
//! // Excise 10% then VAT 15% on (net + excise)
//! let rows = [
//!     TaxRow::on_net_total(Decimal::new(10, 2), RoundingMethod::HalfUp),
//!     TaxRow::on_previous_row_total(Decimal::new(15, 2), RoundingMethod::HalfUp),
//! ];
//!
//! let taxes = calculate_document_taxes(10_000, &rows).unwrap();
//! assert_eq!(taxes.row_taxes(), &[1_000, 1_650]);
//! assert_eq!(taxes.total_tax_minor(), 2_650);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cascade;
pub mod error;
pub mod money;
pub mod rounding;
pub mod template;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cascade::calculate_document_taxes;
pub use error::{TaxError, TaxResult, ValidationError, VALIDATION_FAILED};
pub use rounding::calculate_line_tax;
pub use template::TaxTemplate;
pub use types::*;
