//! # Money Module
//!
//! Conversions between integer minor units and decimals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    100 × 0.065 = 6.499999999999999  ❌ rounds to 6 under half_up!      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units + decimal rates                      │
//! │    Amounts:  i64 minor units (cents, paise, sen)                        │
//! │    Rates:    rust_decimal::Decimal (exact base-10 fractions)            │
//! │    Product:  Decimal, rounded once, then back to i64                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every helper here reports failures as [`ValidationError`] naming the
//! field, so callers can attach row context.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::ValidationError;

/// Lifts a minor-unit amount into decimal space.
#[inline]
pub fn to_decimal(minor: i64) -> Decimal {
    Decimal::from(minor)
}

/// Converts a whole, non-negative decimal back into minor units.
///
/// ## Example
/// ```rust
/// use erp_tax_core::money::from_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(from_decimal("amount", Decimal::new(600, 0)).unwrap(), 600);
/// assert!(from_decimal("amount", Decimal::new(65, 1)).is_err()); // 6.5
/// ```
pub fn from_decimal(field: &str, value: Decimal) -> Result<i64, ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
            value: value.to_string(),
        });
    }

    if !value.fract().is_zero() {
        return Err(ValidationError::Fractional {
            field: field.to_string(),
            value: value.to_string(),
        });
    }

    value.to_i64().ok_or_else(|| ValidationError::Overflow {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Adds two minor-unit amounts, failing instead of wrapping.
///
/// ## Example
/// ```rust
/// use erp_tax_core::money::checked_add;
///
/// assert_eq!(checked_add("total", 10_000, 1_000).unwrap(), 11_000);
/// assert!(checked_add("total", i64::MAX, 1).is_err());
/// ```
pub fn checked_add(field: &str, a: i64, b: i64) -> Result<i64, ValidationError> {
    a.checked_add(b).ok_or_else(|| ValidationError::Overflow {
        field: field.to_string(),
        value: format!("{} + {}", a, b),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
