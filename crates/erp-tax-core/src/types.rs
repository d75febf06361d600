//! # Domain Types
//!
//! Core domain types used throughout the tax engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────────┐                      │
//! │  │      TaxRow         │   │   DocumentTaxes     │                      │
//! │  │  ─────────────────  │   │  ─────────────────  │                      │
//! │  │  charge_type        │──►│  row_taxes          │                      │
//! │  │  rate (Decimal)     │   │  total_tax_minor    │                      │
//! │  │  rounding_method?   │   └─────────────────────┘                      │
//! │  │  actual_amount?     │                                                │
//! │  └─────────────────────┘                                                │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────────┐   ┌──────────────┐  │
//! │  │  RoundingMethod     │   │   TaxChargeType     │   │ ResolvedRate │  │
//! │  │  half_up            │   │   actual            │   │ rate         │  │
//! │  │  half_down          │   │   on_net_total      │   │ rounding_    │  │
//! │  │  ceil               │   │   on_previous_row_  │   │   method     │  │
//! │  │  floor              │   │     amount          │   └──────────────┘  │
//! │  │  banker             │   │   on_previous_row_  │                      │
//! │  └─────────────────────┘   │     total           │                      │
//! │                            └─────────────────────┘                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All amounts are `i64` minor units; all rates are `Decimal` fractions
//! (`0.18` is 18%).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{TaxResult, ValidationError};
use crate::money;

// =============================================================================
// Rounding Method
// =============================================================================

/// How a `base × rate` product is rounded to whole minor units.
///
/// ## Tie Behavior (x.5)
/// ```text
/// ┌──────────────┬────────┬────────┬──────────────────────────────────────┐
/// │ Method       │  6.5   │  7.5   │ Non-ties                             │
/// ├──────────────┼────────┼────────┼──────────────────────────────────────┤
/// │ half_up      │   7    │   8    │ nearest                              │
/// │ half_down    │   6    │   7    │ nearest                              │
/// │ banker       │   6    │   8    │ nearest                              │
/// │ ceil         │   7    │   8    │ always up (6.01 → 7)                 │
/// │ floor        │   6    │   7    │ always down (6.99 → 6)               │
/// └──────────────┴────────┴────────┴──────────────────────────────────────┘
/// ```
///
/// `half_down` is NOT `floor`: 6.6 rounds to 7 under `half_down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMethod {
    /// Ties round away from zero.
    HalfUp,
    /// Ties round toward zero.
    HalfDown,
    /// Always toward positive infinity.
    Ceil,
    /// Always toward negative infinity.
    Floor,
    /// Ties round to the nearest even integer.
    Banker,
}

impl RoundingMethod {
    /// Every rounding method, in declaration order.
    pub const ALL: [RoundingMethod; 5] = [
        RoundingMethod::HalfUp,
        RoundingMethod::HalfDown,
        RoundingMethod::Ceil,
        RoundingMethod::Floor,
        RoundingMethod::Banker,
    ];

    /// Returns the wire name (`half_up`, `banker`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            RoundingMethod::HalfUp => "half_up",
            RoundingMethod::HalfDown => "half_down",
            RoundingMethod::Ceil => "ceil",
            RoundingMethod::Floor => "floor",
            RoundingMethod::Banker => "banker",
        }
    }
}

impl fmt::Display for RoundingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundingMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "half_up" | "round_half_up" => Ok(RoundingMethod::HalfUp),
            "half_down" | "round_half_down" => Ok(RoundingMethod::HalfDown),
            "ceil" | "ceiling" => Ok(RoundingMethod::Ceil),
            "floor" => Ok(RoundingMethod::Floor),
            "banker" | "bankers" | "half_even" => Ok(RoundingMethod::Banker),
            other => Err(ValidationError::InvalidFormat {
                field: "rounding_method".to_string(),
                reason: format!(
                    "unknown rounding method '{}'. Valid options: half_up, half_down, ceil, floor, banker",
                    other
                ),
            }),
        }
    }
}

// =============================================================================
// Tax Charge Type
// =============================================================================

/// What a tax row's rate is applied to.
///
/// ## Bases
/// ```text
/// actual                  → fixed amount, no rate
/// on_net_total            → net_total × rate
/// on_previous_row_amount  → row_taxes[i-1] × rate          (CESS on GST)
/// on_previous_row_total   → (net_total + Σ row_taxes[..i]) × rate  (VAT on excise)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxChargeType {
    /// Fixed amount taken from `actual_amount_minor`.
    Actual,
    /// Percentage of the document's net total.
    OnNetTotal,
    /// Percentage of the immediately preceding row's tax.
    OnPreviousRowAmount,
    /// Percentage of net total plus all prior taxes.
    OnPreviousRowTotal,
}

impl TaxChargeType {
    /// Returns the wire name (`on_net_total`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            TaxChargeType::Actual => "actual",
            TaxChargeType::OnNetTotal => "on_net_total",
            TaxChargeType::OnPreviousRowAmount => "on_previous_row_amount",
            TaxChargeType::OnPreviousRowTotal => "on_previous_row_total",
        }
    }

    /// Returns true if the row's base depends on an earlier row.
    #[inline]
    pub const fn is_cascading(&self) -> bool {
        matches!(
            self,
            TaxChargeType::OnPreviousRowAmount | TaxChargeType::OnPreviousRowTotal
        )
    }

    /// Returns true if the row is computed as `base × rate`.
    #[inline]
    pub const fn is_percentage(&self) -> bool {
        !matches!(self, TaxChargeType::Actual)
    }
}

impl fmt::Display for TaxChargeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxChargeType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "actual" | "fixed" => Ok(TaxChargeType::Actual),
            "on_net_total" => Ok(TaxChargeType::OnNetTotal),
            "on_previous_row_amount" => Ok(TaxChargeType::OnPreviousRowAmount),
            "on_previous_row_total" => Ok(TaxChargeType::OnPreviousRowTotal),
            other => Err(ValidationError::InvalidFormat {
                field: "charge_type".to_string(),
                reason: format!("unknown charge type '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Resolved Rate
// =============================================================================

/// A rate and rounding policy as handed over by the tax-rate resolution
/// service. How it was looked up is not this crate's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResolvedRate {
    #[ts(as = "String")]
    pub rate: Decimal,
    pub rounding_method: RoundingMethod,
}

impl ResolvedRate {
    pub const fn new(rate: Decimal, rounding_method: RoundingMethod) -> Self {
        ResolvedRate {
            rate,
            rounding_method,
        }
    }
}

// =============================================================================
// Tax Row
// =============================================================================

/// One line of a document's tax table.
///
/// Built by document-assembly code right before computation and never
/// mutated by the engine. `rounding_method` is optional only so that
/// `actual` rows do not have to name one; percentage rows without a method
/// are rejected, never defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRow {
    pub charge_type: TaxChargeType,

    /// Fraction applied to the row's base (`0.18` = 18%).
    #[serde(default)]
    #[ts(as = "String")]
    pub rate: Decimal,

    #[serde(default)]
    #[ts(optional)]
    pub rounding_method: Option<RoundingMethod>,

    /// Fixed tax in minor units; only read for `actual` rows.
    #[serde(default)]
    #[ts(optional)]
    pub actual_amount_minor: Option<i64>,
}

impl TaxRow {
    fn percentage(charge_type: TaxChargeType, rate: Decimal, method: RoundingMethod) -> Self {
        TaxRow {
            charge_type,
            rate,
            rounding_method: Some(method),
            actual_amount_minor: None,
        }
    }

    /// A fixed-amount row.
    pub fn actual(amount_minor: i64) -> Self {
        TaxRow {
            charge_type: TaxChargeType::Actual,
            rate: Decimal::ZERO,
            rounding_method: None,
            actual_amount_minor: Some(amount_minor),
        }
    }

    /// A percentage of the document's net total.
    pub fn on_net_total(rate: Decimal, method: RoundingMethod) -> Self {
        Self::percentage(TaxChargeType::OnNetTotal, rate, method)
    }

    /// A percentage of the preceding row's tax.
    pub fn on_previous_row_amount(rate: Decimal, method: RoundingMethod) -> Self {
        Self::percentage(TaxChargeType::OnPreviousRowAmount, rate, method)
    }

    /// A percentage of net total plus all preceding taxes.
    pub fn on_previous_row_total(rate: Decimal, method: RoundingMethod) -> Self {
        Self::percentage(TaxChargeType::OnPreviousRowTotal, rate, method)
    }

    /// Builds a row from a rate supplied by the resolution service.
    pub fn from_resolved(charge_type: TaxChargeType, resolved: &ResolvedRate) -> Self {
        Self::percentage(charge_type, resolved.rate, resolved.rounding_method)
    }

    /// Returns the rounding method, or `Required` if a percentage row lacks one.
    pub fn require_rounding_method(&self) -> Result<RoundingMethod, ValidationError> {
        self.rounding_method
            .ok_or_else(|| ValidationError::Required {
                field: "rounding_method".to_string(),
            })
    }
}

// =============================================================================
// Document Taxes
// =============================================================================

/// Result of resolving a document's tax rows.
///
/// Only the cascade resolver builds these, so `total_tax_minor` is always the
/// exact sum of `row_taxes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct DocumentTaxes {
    row_taxes: Vec<i64>,
    total_tax_minor: i64,
}

impl DocumentTaxes {
    pub(crate) fn new(row_taxes: Vec<i64>, total_tax_minor: i64) -> Self {
        debug_assert_eq!(row_taxes.iter().sum::<i64>(), total_tax_minor);
        DocumentTaxes {
            row_taxes,
            total_tax_minor,
        }
    }

    /// Tax per row, in input order.
    #[inline]
    pub fn row_taxes(&self) -> &[i64] {
        &self.row_taxes
    }

    /// Sum of all row taxes.
    #[inline]
    pub fn total_tax_minor(&self) -> i64 {
        self.total_tax_minor
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.row_taxes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.row_taxes.is_empty()
    }

    /// Net total plus all taxes, i.e. the document's gross amount.
    pub fn grand_total_minor(&self, net_total_minor: i64) -> TaxResult<i64> {
        Ok(money::checked_add(
            "grand_total_minor",
            net_total_minor,
            self.total_tax_minor,
        )?)
    }

    /// Consumes the result, returning the per-row taxes.
    pub fn into_row_taxes(self) -> Vec<i64> {
        self.row_taxes
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
