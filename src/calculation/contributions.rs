//! Government contribution and withholding tax calculation.
//!
//! SSS, PhilHealth and Pag-IBIG are looked up in bracket tables keyed by
//! gross pay. Withholding tax is computed on gross pay less those three
//! mandatory contributions.

use rust_decimal::Decimal;

use crate::config::{BracketTable, ContributionSchedule, TaxTable};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, GovernmentContributions};

use super::round_currency;

/// The result of calculating contributions, including the audit step.
#[derive(Debug, Clone)]
pub struct ContributionsResult {
    /// The four computed components.
    pub contributions: GovernmentContributions,
    /// Gross pay less mandatory contributions, floored at zero.
    pub taxable_income: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Looks up the contribution owed on `gross_pay` in `table`.
///
/// Incomes below every bracket owe nothing. The result is rounded to
/// centavos and never negative.
pub fn bracket_amount(table: &BracketTable, gross_pay: Decimal) -> Decimal {
    table
        .bracket_for(gross_pay)
        .map_or(Decimal::ZERO, |bracket| {
            round_currency(bracket.contribution(gross_pay)).max(Decimal::ZERO)
        })
}

/// Computes withholding tax on `taxable_income`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::withholding_tax;
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let schedule = loader.schedule_for(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()).unwrap();
///
/// // Below the first taxable bracket.
/// assert_eq!(withholding_tax(&schedule.withholding_tax, Decimal::new(20000, 0)), Decimal::ZERO);
/// // 1875 + (50417.50 - 33333) × 20%
/// assert_eq!(
///     withholding_tax(&schedule.withholding_tax, Decimal::new(5041750, 2)),
///     Decimal::new(529190, 2)
/// );
/// ```
pub fn withholding_tax(table: &TaxTable, taxable_income: Decimal) -> Decimal {
    table
        .bracket_for(taxable_income)
        .map_or(Decimal::ZERO, |bracket| {
            round_currency(bracket.tax(taxable_income)).max(Decimal::ZERO)
        })
}

/// Calculates SSS, PhilHealth, Pag-IBIG and withholding tax on gross pay.
///
/// # Arguments
///
/// * `gross_pay` - Gross pay for the period
/// * `schedule` - The contribution schedule effective for the period
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns [`EngineError::Validation`] if `gross_pay` is negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_contributions;
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let schedule = loader.schedule_for(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()).unwrap();
///
/// let result = calculate_contributions(Decimal::new(53300, 0), schedule, 4).unwrap();
/// assert_eq!(result.contributions.sss, Decimal::new(1350, 0));
/// assert_eq!(result.contributions.philhealth, Decimal::new(133250, 2));
/// assert_eq!(result.contributions.pagibig, Decimal::new(200, 0));
/// assert_eq!(result.contributions.withholding_tax, Decimal::new(529190, 2));
/// ```
pub fn calculate_contributions(
    gross_pay: Decimal,
    schedule: &ContributionSchedule,
    step_number: u32,
) -> EngineResult<ContributionsResult> {
    if gross_pay < Decimal::ZERO {
        return Err(EngineError::validation(
            "gross_pay",
            format!("must not be negative, got {}", gross_pay),
        ));
    }

    let sss = bracket_amount(&schedule.sss, gross_pay);
    let philhealth = bracket_amount(&schedule.philhealth, gross_pay);
    let pagibig = bracket_amount(&schedule.pagibig, gross_pay);

    let mandatory = sss + philhealth + pagibig;
    let taxable_income = (gross_pay - mandatory).max(Decimal::ZERO);
    let tax = withholding_tax(&schedule.withholding_tax, taxable_income);

    let contributions = GovernmentContributions {
        sss,
        philhealth,
        pagibig,
        withholding_tax: tax,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "government_contributions".to_string(),
        rule_name: "Government Contributions and Withholding Tax".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "schedule_effective_date": schedule.effective_date.to_string()
        }),
        output: serde_json::json!({
            "sss": sss.to_string(),
            "philhealth": philhealth.to_string(),
            "pagibig": pagibig.to_string(),
            "taxable_income": taxable_income.to_string(),
            "withholding_tax": tax.to_string(),
            "total": contributions.total().to_string()
        }),
        reasoning: format!(
            "SSS {} + PhilHealth {} + Pag-IBIG {} on gross {}; tax {} on taxable {}",
            sss, philhealth, pagibig, gross_pay, tax, taxable_income
        ),
    };

    Ok(ContributionsResult {
        contributions,
        taxable_income,
        audit_step,
    })
}
