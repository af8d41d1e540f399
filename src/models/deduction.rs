//! Deduction and government contribution models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A labelled amount subtracted from pay (loan repayment, cash advance, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    /// Free-text label identifying the deduction.
    pub deduction_type: String,
    /// The amount deducted.
    pub amount: Decimal,
    /// The base amount the deduction was derived from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxable_base: Option<Decimal>,
}

impl Deduction {
    /// Creates a deduction.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] for a blank label or a negative
    /// amount.
    pub fn new(deduction_type: impl Into<String>, amount: Decimal) -> EngineResult<Self> {
        let deduction_type = deduction_type.into();
        if deduction_type.trim().is_empty() {
            return Err(EngineError::validation("deduction_type", "must not be blank"));
        }
        if amount < Decimal::ZERO {
            return Err(EngineError::validation(
                "amount",
                format!("must not be negative, got {}", amount),
            ));
        }
        Ok(Self {
            deduction_type,
            amount,
            taxable_base: None,
        })
    }

    /// Links the deduction to the base amount it was computed from.
    pub fn with_taxable_base(mut self, base: Decimal) -> Self {
        self.taxable_base = Some(base);
        self
    }
}

/// Mandatory government contributions and withholding tax for one period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::GovernmentContributions;
/// use rust_decimal::Decimal;
///
/// let contributions = GovernmentContributions {
///     sss: Decimal::new(1350, 0),
///     philhealth: Decimal::new(133250, 2),
///     pagibig: Decimal::new(200, 0),
///     withholding_tax: Decimal::new(529190, 2),
/// };
/// assert_eq!(contributions.total(), Decimal::new(817440, 2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernmentContributions {
    /// Social Security System contribution.
    pub sss: Decimal,
    /// PhilHealth premium.
    pub philhealth: Decimal,
    /// Pag-IBIG fund contribution.
    pub pagibig: Decimal,
    /// Withholding tax.
    pub withholding_tax: Decimal,
}

impl GovernmentContributions {
    /// Sum of the three mandatory contributions, excluding tax.
    pub fn mandatory_total(&self) -> Decimal {
        self.sss + self.philhealth + self.pagibig
    }

    /// Sum of all four components.
    pub fn total(&self) -> Decimal {
        self.mandatory_total() + self.withholding_tax
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deduction_requires_label() {
        match Deduction::new("   ", dec("100")) {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "deduction_type"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_deduction_rejects_negative_amount() {
        assert!(Deduction::new("Cash Advance", dec("-5")).is_err());
    }

    #[test]
    fn test_deduction_with_taxable_base() {
        let deduction = Deduction::new("Salary Loan", dec("1000"))
            .unwrap()
            .with_taxable_base(dec("50000"));
        assert_eq!(deduction.taxable_base, Some(dec("50000")));
    }

    #[test]
    fn test_contributions_totals() {
        let contributions = GovernmentContributions {
            sss: dec("1350"),
            philhealth: dec("1332.50"),
            pagibig: dec("200"),
            withholding_tax: dec("5291.90"),
        };
        assert_eq!(contributions.mandatory_total(), dec("2882.50"));
        assert_eq!(contributions.total(), dec("8174.40"));
        assert_eq!(GovernmentContributions::default().total(), Decimal::ZERO);
    }
}
