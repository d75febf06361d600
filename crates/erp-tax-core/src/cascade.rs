//! # Cascade Resolver
//!
//! Resolves a document's ordered tax rows in one forward pass.
//!
//! ## How Rows Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  India GST + CESS, net = 1,000,000                                      │
//! │                                                                         │
//! │  row 0  on_net_total           18%  base = net            → 180,000    │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │  row 1  on_previous_row_amount  1%  base = row_taxes[0]   →   1,800    │
//! │                                                                         │
//! │  Excise + VAT, net = 10,000                                             │
//! │                                                                         │
//! │  row 0  on_net_total           10%  base = net            →   1,000    │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │  row 1  on_previous_row_total  15%  base = net + 1,000    →   1,650    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Row `i` only ever looks at rows `< i` and the net total. The first failing
//! row aborts the whole document; no partial result is returned.

use tracing::debug;

use crate::error::{TaxError, TaxResult, ValidationError};
use crate::money;
use crate::rounding::calculate_line_tax;
use crate::types::{DocumentTaxes, TaxChargeType, TaxRow};
use crate::validation::{validate_minor_units, validate_row_position};

/// Resolves every tax row of a document.
///
/// ## Example
/// ```rust
/// use erp_tax_core::{calculate_document_taxes, RoundingMethod, TaxRow};
/// use rust_decimal::Decimal;
///
/// let rows = [
///     TaxRow::on_net_total(Decimal::new(18, 2), RoundingMethod::HalfUp),
///     TaxRow::on_previous_row_amount(Decimal::new(1, 2), RoundingMethod::HalfUp),
/// ];
/// let taxes = calculate_document_taxes(1_000_000, &rows).unwrap();
/// assert_eq!(taxes.row_taxes(), &[180_000, 1_800]);
/// assert_eq!(taxes.total_tax_minor(), 181_800);
/// ```
pub fn calculate_document_taxes(net_total_minor: i64, tax_rows: &[TaxRow]) -> TaxResult<DocumentTaxes> {
    validate_minor_units("net_total_minor", net_total_minor)?;

    let mut row_taxes: Vec<i64> = Vec::with_capacity(tax_rows.len());
    let mut cumulative_tax: i64 = 0;

    for (index, row) in tax_rows.iter().enumerate() {
        let tax_minor = resolve_row(index, row, net_total_minor, &row_taxes, cumulative_tax)?;

        cumulative_tax = money::checked_add("total_tax_minor", cumulative_tax, tax_minor)
            .map_err(|e| e.at_row(index))?;
        row_taxes.push(tax_minor);

        debug!(
            row = index,
            charge_type = %row.charge_type,
            tax_minor,
            cumulative_tax,
            "Resolved tax row"
        );
    }

    Ok(DocumentTaxes::new(row_taxes, cumulative_tax))
}

/// Computes one row's tax from the rows already resolved.
fn resolve_row(
    index: usize,
    row: &TaxRow,
    net_total_minor: i64,
    previous: &[i64],
    cumulative_tax: i64,
) -> TaxResult<i64> {
    validate_row_position(index, row.charge_type).map_err(|e| e.at_row(index))?;

    let base_minor = match row.charge_type {
        TaxChargeType::Actual => {
            let amount = row.actual_amount_minor.unwrap_or(0);
            validate_minor_units("actual_amount_minor", amount).map_err(|e| e.at_row(index))?;
            return Ok(amount);
        }
        TaxChargeType::OnNetTotal => net_total_minor,
        TaxChargeType::OnPreviousRowAmount => match previous.last() {
            Some(&tax) => tax,
            None => return Err(missing_predecessor(index, row.charge_type)),
        },
        TaxChargeType::OnPreviousRowTotal => {
            money::checked_add("base_minor", net_total_minor, cumulative_tax)
                .map_err(|e| e.at_row(index))?
        }
    };

    let method = row.require_rounding_method().map_err(|e| e.at_row(index))?;

    calculate_line_tax(base_minor, row.rate, method).map_err(|e| e.validation().clone().at_row(index))
}

fn missing_predecessor(index: usize, charge_type: TaxChargeType) -> TaxError {
    ValidationError::MissingPredecessor {
        field: "charge_type".to_string(),
        charge_type: charge_type.to_string(),
    }
    .at_row(index)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoundingMethod;
    use rust_decimal_macros::dec;

    fn half_up_net(rate: rust_decimal::Decimal) -> TaxRow {
        TaxRow::on_net_total(rate, RoundingMethod::HalfUp)
    }

    #[test]
    fn test_empty_rows() {
        let taxes = calculate_document_taxes(10000, &[]).unwrap();
        assert!(taxes.is_empty());
        assert_eq!(taxes.row_taxes(), &[] as &[i64]);
        assert_eq!(taxes.total_tax_minor(), 0);
    }

    #[test]
    fn test_gst_with_cess() {
        let rows = [
            half_up_net(dec!(0.18)),
            TaxRow::on_previous_row_amount(dec!(0.01), RoundingMethod::HalfUp),
        ];
        let taxes = calculate_document_taxes(1_000_000, &rows).unwrap();
        assert_eq!(taxes.row_taxes(), &[180000, 1800]);
        assert_eq!(taxes.total_tax_minor(), 181800);
    }

    #[test]
    fn test_excise_then_vat() {
        let rows = [
            half_up_net(dec!(0.10)),
            TaxRow::on_previous_row_total(dec!(0.15), RoundingMethod::HalfUp),
        ];
        let taxes = calculate_document_taxes(10_000, &rows).unwrap();
        assert_eq!(taxes.row_taxes(), &[1000, 1650]);
        assert_eq!(taxes.total_tax_minor(), 2650);
    }

    #[test]
    fn test_parallel_taxes_do_not_cascade() {
        let rows = [half_up_net(dec!(0.05)), half_up_net(dec!(0.07))];
        let taxes = calculate_document_taxes(10_000, &rows).unwrap();
        assert_eq!(taxes.row_taxes(), &[500, 700]);
        assert_eq!(taxes.total_tax_minor(), 1200);
    }

    #[test]
    fn test_previous_row_amount_uses_only_immediate_predecessor() {
        // row 2 is 10% of row 1's tax (100), not of the cumulative 1100
        let rows = [
            TaxRow::actual(1000),
            TaxRow::actual(100),
            TaxRow::on_previous_row_amount(dec!(0.10), RoundingMethod::HalfUp),
        ];
        let taxes = calculate_document_taxes(0, &rows).unwrap();
        assert_eq!(taxes.row_taxes(), &[1000, 100, 10]);
        assert_eq!(taxes.total_tax_minor(), 1110);
    }

    #[test]
    fn test_previous_row_total_accumulates_all_prior_rows() {
        // base for row 2 = 10000 + 500 + 700 = 11200
        let rows = [
            half_up_net(dec!(0.05)),
            half_up_net(dec!(0.07)),
            TaxRow::on_previous_row_total(dec!(0.10), RoundingMethod::HalfUp),
        ];
        let taxes = calculate_document_taxes(10_000, &rows).unwrap();
        assert_eq!(taxes.row_taxes(), &[500, 700, 1120]);
        assert_eq!(taxes.total_tax_minor(), 2320);
    }

    #[test]
    fn test_actual_row_without_amount_is_zero() {
        let row = TaxRow {
            charge_type: TaxChargeType::Actual,
            rate: dec!(0.5),
            rounding_method: None,
            actual_amount_minor: None,
        };
        let taxes = calculate_document_taxes(10_000, &[row]).unwrap();
        assert_eq!(taxes.row_taxes(), &[0]);
    }

    #[test]
    fn test_actual_row_ignores_rate() {
        let mut row = TaxRow::actual(250);
        row.rate = dec!(0.99);
        let taxes = calculate_document_taxes(10_000, &[row]).unwrap();
        assert_eq!(taxes.row_taxes(), &[250]);
    }

    #[test]
    fn test_first_row_cannot_cascade() {
        for row in [
            TaxRow::on_previous_row_amount(dec!(0.01), RoundingMethod::HalfUp),
            TaxRow::on_previous_row_total(dec!(0.01), RoundingMethod::HalfUp),
        ] {
            let err = calculate_document_taxes(10_000, &[row]).unwrap_err();
            assert_eq!(err.row(), Some(0));
            assert_eq!(err.field(), "charge_type");
            assert!(matches!(
                err.validation(),
                ValidationError::MissingPredecessor { .. }
            ));
        }
    }

    #[test]
    fn test_negative_net_total_rejected() {
        let err = calculate_document_taxes(-1, &[half_up_net(dec!(0.18))]).unwrap_err();
        assert_eq!(err.field(), "net_total_minor");
        assert_eq!(err.row(), None);
    }

    #[test]
    fn test_negative_actual_amount_names_row() {
        let rows = [half_up_net(dec!(0.18)), TaxRow::actual(-5)];
        let err = calculate_document_taxes(10_000, &rows).unwrap_err();
        assert_eq!(err.row(), Some(1));
        assert_eq!(err.field(), "actual_amount_minor");
    }

    #[test]
    fn test_negative_rate_names_row() {
        let rows = [half_up_net(dec!(0.18)), half_up_net(dec!(-0.01))];
        let err = calculate_document_taxes(10_000, &rows).unwrap_err();
        assert!(matches!(err, TaxError::RowValidation { row: 1, .. }));
        assert_eq!(err.field(), "rate");
    }

    #[test]
    fn test_percentage_row_requires_rounding_method() {
        let row = TaxRow {
            charge_type: TaxChargeType::OnNetTotal,
            rate: dec!(0.18),
            rounding_method: None,
            actual_amount_minor: None,
        };
        let err = calculate_document_taxes(10_000, &[row]).unwrap_err();
        assert_eq!(err.row(), Some(0));
        assert_eq!(err.field(), "rounding_method");
    }

    #[test]
    fn test_fails_fast_on_first_bad_row() {
        // Both row 1 and row 2 are invalid; only row 1 is reported
        let rows = [
            half_up_net(dec!(0.18)),
            TaxRow::actual(-1),
            half_up_net(dec!(-0.5)),
        ];
        let err = calculate_document_taxes(10_000, &rows).unwrap_err();
        assert_eq!(err.row(), Some(1));
    }

    #[test]
    fn test_running_total_overflow_names_row() {
        let rows = [TaxRow::actual(i64::MAX), TaxRow::actual(1)];
        let err = calculate_document_taxes(0, &rows).unwrap_err();
        assert_eq!(err.row(), Some(1));
        assert_eq!(err.field(), "total_tax_minor");
    }

    #[test]
    fn test_idempotent() {
        let rows = [
            half_up_net(dec!(0.18)),
            TaxRow::on_previous_row_amount(dec!(0.01), RoundingMethod::Banker),
            TaxRow::on_previous_row_total(dec!(0.025), RoundingMethod::Ceil),
        ];
        let first = calculate_document_taxes(123_457, &rows).unwrap();
        let second = calculate_document_taxes(123_457, &rows).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_mixed_rounding_methods_per_row() {
        // 12345 × 0.05 = 617.25; 617 × 0.5 = 308.5
        let rows = [
            TaxRow::on_net_total(dec!(0.05), RoundingMethod::Ceil),
            TaxRow::on_previous_row_amount(dec!(0.5), RoundingMethod::Banker),
        ];
        let taxes = calculate_document_taxes(12_345, &rows).unwrap();
        // ceil(617.25) = 618; 618 × 0.5 = 309 exactly
        assert_eq!(taxes.row_taxes(), &[618, 309]);

        let rows = [
            TaxRow::on_net_total(dec!(0.05), RoundingMethod::Floor),
            TaxRow::on_previous_row_amount(dec!(0.5), RoundingMethod::Banker),
        ];
        let taxes = calculate_document_taxes(12_345, &rows).unwrap();
        // floor(617.25) = 617; 617 × 0.5 = 308.5 → 308 (even)
        assert_eq!(taxes.row_taxes(), &[617, 308]);
    }
}
