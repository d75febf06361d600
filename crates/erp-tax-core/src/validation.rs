//! # Validation Module
//!
//! Input validation for the tax engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Boundary (forms, JSON, legacy float columns)                 │
//! │  ├── parse_rate / rate_from_f64                                        │
//! │  └── minor_units_from_decimal                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engine entry points                                          │
//! │  ├── validate_minor_units / validate_rate                              │
//! │  └── validate_row_position (first row cannot cascade)                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Arithmetic                                                   │
//! │  └── checked ops in money.rs (overflow → ValidationError)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use erp_tax_core::validation::{parse_rate, validate_minor_units};
//!
//! let rate = parse_rate("rate", "0.18").unwrap();
//! validate_minor_units("base_minor", 10_000).unwrap();
//! assert!(parse_rate("rate", "-0.05").is_err());
//! ```

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money;
use crate::types::TaxChargeType;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Amount Validators
// =============================================================================

/// Validates a minor-unit amount.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (zero-rated documents)
///
/// ## Example
/// ```rust
/// use erp_tax_core::validation::validate_minor_units;
///
/// assert!(validate_minor_units("base_minor", 1099).is_ok());
/// assert!(validate_minor_units("base_minor", 0).is_ok());
/// assert!(validate_minor_units("base_minor", -100).is_err());
/// ```
pub fn validate_minor_units(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
            value: value.to_string(),
        });
    }

    Ok(())
}

/// Converts a decimal amount to minor units, rejecting fractions.
///
/// For callers that hold amounts as decimals (ORM numeric columns).
pub fn minor_units_from_decimal(field: &str, value: Decimal) -> ValidationResult<i64> {
    money::from_decimal(field, value)
}

// =============================================================================
// Rate Validators
// =============================================================================

/// Validates a decimal rate.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - No upper bound: surcharges above 100% exist
pub fn validate_rate(field: &str, rate: Decimal) -> ValidationResult<()> {
    if rate < Decimal::ZERO {
        return Err(ValidationError::Negative {
            field: field.to_string(),
            value: rate.to_string(),
        });
    }

    Ok(())
}

/// Parses a rate from text (`"0.18"`, `"1.5e-2"`).
pub fn parse_rate(field: &str, text: &str) -> ValidationResult<Decimal> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let lowered = text.to_lowercase();
    if matches!(
        lowered.trim_start_matches(|c: char| c == '+' || c == '-'),
        "nan" | "inf" | "infinity"
    ) {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
            value: text.to_string(),
        });
    }

    let rate = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|e| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: e.to_string(),
        })?;

    validate_rate(field, rate)?;
    Ok(rate)
}

/// Converts a float-sourced rate to a decimal, once, at the boundary.
///
/// ## Rules
/// - NaN and infinities are rejected
/// - Negative values are rejected
///
/// ## Example
/// ```rust
/// use erp_tax_core::validation::rate_from_f64;
/// use rust_decimal::Decimal;
///
/// assert_eq!(rate_from_f64("rate", 0.065).unwrap(), Decimal::new(65, 3));
/// assert!(rate_from_f64("rate", f64::NAN).is_err());
/// ```
pub fn rate_from_f64(field: &str, value: f64) -> ValidationResult<Decimal> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
            value: value.to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
            value: value.to_string(),
        });
    }

    // Shortest round-trip text of the float, so 0.065 stays 0.065
    parse_rate(field, &value.to_string())
}

// =============================================================================
// Row Validators
// =============================================================================

/// Validates that a cascading charge type has a predecessor.
///
/// ## Example
/// ```rust
/// use erp_tax_core::validation::validate_row_position;
/// use erp_tax_core::TaxChargeType;
///
/// assert!(validate_row_position(0, TaxChargeType::OnNetTotal).is_ok());
/// assert!(validate_row_position(0, TaxChargeType::OnPreviousRowTotal).is_err());
/// assert!(validate_row_position(1, TaxChargeType::OnPreviousRowTotal).is_ok());
/// ```
pub fn validate_row_position(index: usize, charge_type: TaxChargeType) -> ValidationResult<()> {
    if index == 0 && charge_type.is_cascading() {
        return Err(ValidationError::MissingPredecessor {
            field: "charge_type".to_string(),
            charge_type: charge_type.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_minor_units() {
        assert!(validate_minor_units("x", 0).is_ok());
        assert!(validate_minor_units("x", i64::MAX).is_ok());
        let err = validate_minor_units("net_total_minor", -1).unwrap_err();
        assert_eq!(err.field(), "net_total_minor");
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate("rate", dec!(0)).is_ok());
        assert!(validate_rate("rate", dec!(0.18)).is_ok());
        assert!(validate_rate("rate", dec!(2.5)).is_ok());
        assert!(validate_rate("rate", dec!(-0.01)).is_err());
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("rate", "0.18").unwrap(), dec!(0.18));
        assert_eq!(parse_rate("rate", " 0.0075 ").unwrap(), dec!(0.0075));
        assert_eq!(parse_rate("rate", "1.5e-2").unwrap(), dec!(0.015));

        assert!(matches!(
            parse_rate("rate", "").unwrap_err(),
            ValidationError::Required { .. }
        ));
        assert!(matches!(
            parse_rate("rate", "NaN").unwrap_err(),
            ValidationError::NotFinite { .. }
        ));
        assert!(matches!(
            parse_rate("rate", "-inf").unwrap_err(),
            ValidationError::NotFinite { .. }
        ));
        assert!(matches!(
            parse_rate("rate", "eighteen").unwrap_err(),
            ValidationError::InvalidFormat { .. }
        ));
        assert!(matches!(
            parse_rate("rate", "-0.18").unwrap_err(),
            ValidationError::Negative { .. }
        ));
    }

    #[test]
    fn test_rate_from_f64() {
        assert_eq!(rate_from_f64("rate", 0.065).unwrap(), dec!(0.065));
        assert_eq!(rate_from_f64("rate", 0.0).unwrap(), dec!(0));
        assert!(rate_from_f64("rate", f64::INFINITY).is_err());
        assert!(rate_from_f64("rate", f64::NAN).is_err());
        assert!(rate_from_f64("rate", -0.1).is_err());
    }

    #[test]
    fn test_minor_units_from_decimal() {
        assert_eq!(minor_units_from_decimal("base_minor", dec!(10000)).unwrap(), 10000);
        assert!(minor_units_from_decimal("base_minor", dec!(100.5)).is_err());
        assert!(minor_units_from_decimal("base_minor", dec!(-3)).is_err());
    }

    #[test]
    fn test_validate_row_position() {
        for charge_type in [
            TaxChargeType::Actual,
            TaxChargeType::OnNetTotal,
            TaxChargeType::OnPreviousRowAmount,
            TaxChargeType::OnPreviousRowTotal,
        ] {
            assert!(validate_row_position(3, charge_type).is_ok());
        }
        assert!(validate_row_position(0, TaxChargeType::Actual).is_ok());
        assert!(validate_row_position(0, TaxChargeType::OnPreviousRowAmount).is_err());
    }
}
