//! # Tax Templates
//!
//! A named, ordered set of tax rows that documents reuse, e.g. "GST 18% +
//! CESS 1%". Templates are checked up front for everything that does not
//! depend on the document's net total, so a broken template is caught when
//! it is loaded rather than on the first invoice that uses it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cascade::calculate_document_taxes;
use crate::error::TaxResult;
use crate::types::{DocumentTaxes, TaxRow};
use crate::validation::{validate_minor_units, validate_rate, validate_row_position};

/// A reusable tax table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxTemplate {
    pub name: String,

    #[serde(default)]
    #[ts(optional)]
    pub description: Option<String>,

    #[serde(default)]
    pub rows: Vec<TaxRow>,
}

impl TaxTemplate {
    pub fn new(name: impl Into<String>, rows: Vec<TaxRow>) -> Self {
        TaxTemplate {
            name: name.into(),
            description: None,
            rows,
        }
    }

    /// Checks every row without computing anything.
    ///
    /// ## Rules
    /// - First row cannot cascade
    /// - Rates are non-negative
    /// - Percentage rows name a rounding method
    /// - Fixed amounts are non-negative
    pub fn validate(&self) -> TaxResult<()> {
        for (index, row) in self.rows.iter().enumerate() {
            validate_row_position(index, row.charge_type).map_err(|e| e.at_row(index))?;

            if row.charge_type.is_percentage() {
                validate_rate("rate", row.rate).map_err(|e| e.at_row(index))?;
                row.require_rounding_method().map_err(|e| e.at_row(index))?;
            } else if let Some(amount) = row.actual_amount_minor {
                validate_minor_units("actual_amount_minor", amount).map_err(|e| e.at_row(index))?;
            }
        }

        Ok(())
    }

    /// Resolves this template's rows against a document's net total.
    pub fn apply(&self, net_total_minor: i64) -> TaxResult<DocumentTaxes> {
        calculate_document_taxes(net_total_minor, &self.rows)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RoundingMethod, TaxChargeType};
    use rust_decimal_macros::dec;

    fn gst_cess() -> TaxTemplate {
        TaxTemplate::new(
            "in-gst-cess",
            vec![
                TaxRow::on_net_total(dec!(0.18), RoundingMethod::HalfUp),
                TaxRow::on_previous_row_amount(dec!(0.01), RoundingMethod::HalfUp),
            ],
        )
    }

    #[test]
    fn test_valid_template() {
        let template = gst_cess();
        assert!(template.validate().is_ok());
        let taxes = template.apply(1_000_000).unwrap();
        assert_eq!(taxes.total_tax_minor(), 181_800);
    }

    #[test]
    fn test_empty_template_is_valid() {
        let template = TaxTemplate::new("exempt", vec![]);
        assert!(template.validate().is_ok());
        assert!(template.apply(5_000).unwrap().is_empty());
    }

    #[test]
    fn test_template_rejects_cascading_first_row() {
        let mut template = gst_cess();
        template.rows.reverse();
        let err = template.validate().unwrap_err();
        assert_eq!(err.row(), Some(0));
        assert_eq!(err.field(), "charge_type");
    }

    #[test]
    fn test_template_rejects_missing_method() {
        let mut template = gst_cess();
        template.rows[1].rounding_method = None;
        let err = template.validate().unwrap_err();
        assert_eq!(err.row(), Some(1));
        assert_eq!(err.field(), "rounding_method");
    }

    #[test]
    fn test_template_rejects_negative_values() {
        let template = TaxTemplate::new(
            "bad",
            vec![TaxRow::actual(10), TaxRow::on_net_total(dec!(-0.1), RoundingMethod::Floor)],
        );
        assert_eq!(template.validate().unwrap_err().row(), Some(1));

        let template = TaxTemplate::new("bad", vec![TaxRow::actual(-10)]);
        assert_eq!(template.validate().unwrap_err().field(), "actual_amount_minor");
    }

    #[test]
    fn test_actual_row_needs_no_method() {
        let template = TaxTemplate::new(
            "stamp-duty",
            vec![TaxRow {
                charge_type: TaxChargeType::Actual,
                rate: dec!(0),
                rounding_method: None,
                actual_amount_minor: Some(500),
            }],
        );
        assert!(template.validate().is_ok());
    }
}
