//! # Rounding Engine
//!
//! Turns `base × rate` into a whole number of minor units.
//!
//! ## Pipeline
//! ```text
//! base_minor (i64) ──► Decimal ──┐
//!                                ├──► checked_mul ──► round(method) ──► i64
//! rate (Decimal) ────────────────┘
//! ```
//!
//! The product is never held in binary floating point, so `100 × 0.065` is
//! exactly `6.5` and the tie rule of the chosen method decides the result.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::trace;

use crate::error::{TaxResult, ValidationError};
use crate::money;
use crate::types::RoundingMethod;
use crate::validation::{validate_minor_units, validate_rate};

impl RoundingMethod {
    /// Maps the policy onto rust_decimal's rounding strategy.
    pub const fn strategy(&self) -> RoundingStrategy {
        match self {
            RoundingMethod::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMethod::HalfDown => RoundingStrategy::MidpointTowardZero,
            RoundingMethod::Ceil => RoundingStrategy::ToPositiveInfinity,
            RoundingMethod::Floor => RoundingStrategy::ToNegativeInfinity,
            RoundingMethod::Banker => RoundingStrategy::MidpointNearestEven,
        }
    }

    /// Rounds an amount to zero decimal places.
    ///
    /// Single-row calculators elsewhere in the ERP use this directly to stay
    /// reconcilable with the cascade.
    ///
    /// ## Example
    /// ```rust
    /// use erp_tax_core::RoundingMethod;
    /// use rust_decimal::Decimal;
    ///
    /// let tie = Decimal::new(65, 1); // 6.5
    /// assert_eq!(RoundingMethod::HalfUp.round(tie), Decimal::from(7));
    /// assert_eq!(RoundingMethod::Banker.round(tie), Decimal::from(6));
    /// ```
    #[inline]
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(0, self.strategy())
    }
}

/// Calculates the tax for one line: `round(base_minor × rate)`.
///
/// ## Rules
/// - `base_minor` must be non-negative
/// - `rate` must be non-negative
/// - `method` has no default; callers always choose
///
/// ## Example
/// ```rust
/// use erp_tax_core::{calculate_line_tax, RoundingMethod};
/// use rust_decimal::Decimal;
///
/// // 6% GST on 100.00
/// let tax = calculate_line_tax(10_000, Decimal::new(6, 2), RoundingMethod::HalfUp).unwrap();
/// assert_eq!(tax, 600);
/// ```
///
/// ## User Workflow
/// ```text
/// Invoice line: 100.00 @ 6.5%
///      │
///      ▼
/// calculate_line_tax(10000, 0.065, half_up) ← THIS FUNCTION
///      │
///      ▼
/// Tax: 6.50 (650 minor units)
/// ```
pub fn calculate_line_tax(base_minor: i64, rate: Decimal, method: RoundingMethod) -> TaxResult<i64> {
    validate_minor_units("base_minor", base_minor)?;
    validate_rate("rate", rate)?;

    let raw = money::to_decimal(base_minor)
        .checked_mul(rate)
        .ok_or_else(|| ValidationError::Overflow {
            field: "tax_minor".to_string(),
            value: format!("{} × {}", base_minor, rate),
        })?;

    let tax_minor = money::from_decimal("tax_minor", method.round(raw))?;

    trace!(base_minor, %rate, %method, %raw, tax_minor, "Line tax rounded");
    Ok(tax_minor)
}

// =============================================================================
// Unit Tests
// =============================================================================
