//! Salary proration and overtime pay.
//!
//! Monthly-rated employees are paid `monthly_rate × paid_days /
//! standard_working_days`. Overtime is paid at the hourly equivalent of the
//! monthly rate times the overtime multiplier.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::PayPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// Number of decimal places money is rounded to.
pub const CURRENCY_SCALE: u32 = 2;

/// Rounds a monetary amount to centavos, halves away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_currency(Decimal::new(3551136, 3)), Decimal::new(355114, 2));
/// assert_eq!(round_currency(Decimal::new(1005, 3)), Decimal::new(101, 2));
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// The result of prorating the monthly rate over the paid days.
#[derive(Debug, Clone)]
pub struct GrossEarningsResult {
    /// Prorated salary, rounded to centavos.
    pub gross_earnings: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Prorates the monthly rate over the paid days of a period.
///
/// # Arguments
///
/// * `monthly_rate` - The employee's basic monthly salary
/// * `days_worked` - Distinct days the employee was present
/// * `paid_leave_days` - Approved paid leave days not already worked
/// * `policy` - Supplies the standard working days per month
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns [`EngineError::Validation`] for a negative monthly rate and
/// [`EngineError::CalculationError`] if the policy has no working days.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_gross_earnings;
/// use payroll_engine::config::PayPolicy;
/// use rust_decimal::Decimal;
///
/// let result = calculate_gross_earnings(
///     Decimal::new(50000, 0),
///     11,
///     0,
///     &PayPolicy::default(),
///     1,
/// )
/// .unwrap();
/// assert_eq!(result.gross_earnings, Decimal::new(25000, 0));
/// ```
pub fn calculate_gross_earnings(
    monthly_rate: Decimal,
    days_worked: u32,
    paid_leave_days: u32,
    policy: &PayPolicy,
    step_number: u32,
) -> EngineResult<GrossEarningsResult> {
    if monthly_rate < Decimal::ZERO {
        return Err(EngineError::validation(
            "basic_salary",
            format!("must not be negative, got {}", monthly_rate),
        ));
    }
    if policy.standard_working_days == 0 {
        return Err(EngineError::CalculationError {
            message: "standard working days must be positive".to_string(),
        });
    }

    let paid_days = days_worked + paid_leave_days;
    let standard_days = Decimal::from(policy.standard_working_days);
    let gross_earnings = round_currency(monthly_rate * Decimal::from(paid_days) / standard_days);

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_earnings".to_string(),
        rule_name: "Prorated Basic Salary".to_string(),
        input: serde_json::json!({
            "monthly_rate": monthly_rate.normalize().to_string(),
            "days_worked": days_worked,
            "paid_leave_days": paid_leave_days,
            "standard_working_days": policy.standard_working_days
        }),
        output: serde_json::json!({
            "paid_days": paid_days,
            "gross_earnings": gross_earnings.to_string()
        }),
        reasoning: format!(
            "{} × {} paid days / {} standard days = {}",
            monthly_rate.normalize(),
            paid_days,
            policy.standard_working_days,
            gross_earnings
        ),
    };

    Ok(GrossEarningsResult {
        gross_earnings,
        audit_step,
    })
}

/// Hourly equivalent of a monthly rate, unrounded.
pub fn hourly_rate(monthly_rate: Decimal, policy: &PayPolicy) -> EngineResult<Decimal> {
    let monthly_hours = policy.standard_monthly_hours();
    if monthly_hours <= Decimal::ZERO {
        return Err(EngineError::CalculationError {
            message: "standard monthly hours must be positive".to_string(),
        });
    }
    Ok(monthly_rate / monthly_hours)
}

/// The result of calculating overtime pay.
#[derive(Debug, Clone)]
pub struct OvertimePayResult {
    /// Hourly rate, rounded to centavos for reporting.
    pub hourly_rate: Decimal,
    /// Overtime pay, rounded to centavos.
    pub overtime_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates pay for approved overtime hours.
///
/// The unrounded hourly rate is used so that the only rounding happens on
/// the final amount.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_overtime_pay;
/// use payroll_engine::config::PayPolicy;
/// use rust_decimal::Decimal;
///
/// let result = calculate_overtime_pay(
///     Decimal::new(10, 0),
///     Decimal::new(50000, 0),
///     &PayPolicy::default(),
///     2,
/// )
/// .unwrap();
/// assert_eq!(result.hourly_rate, Decimal::new(28409, 2));
/// assert_eq!(result.overtime_pay, Decimal::new(355114, 2));
/// ```
pub fn calculate_overtime_pay(
    overtime_hours: Decimal,
    monthly_rate: Decimal,
    policy: &PayPolicy,
    step_number: u32,
) -> EngineResult<OvertimePayResult> {
    if overtime_hours < Decimal::ZERO {
        return Err(EngineError::CalculationError {
            message: format!("negative overtime hours: {}", overtime_hours),
        });
    }

    let exact_hourly = hourly_rate(monthly_rate, policy)?;
    let overtime_pay = round_currency(overtime_hours * exact_hourly * policy.overtime_multiplier);
    let hourly_rate = round_currency(exact_hourly);

    let reasoning = if overtime_hours.is_zero() {
        "No approved overtime in period".to_string()
    } else {
        format!(
            "{} hours × {} hourly × {} = {}",
            overtime_hours.normalize(),
            hourly_rate,
            policy.overtime_multiplier.normalize(),
            overtime_pay
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_pay".to_string(),
        rule_name: "Overtime Pay".to_string(),
        input: serde_json::json!({
            "overtime_hours": overtime_hours.normalize().to_string(),
            "monthly_rate": monthly_rate.normalize().to_string(),
            "standard_monthly_hours": policy.standard_monthly_hours().normalize().to_string(),
            "multiplier": policy.overtime_multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "hourly_rate": hourly_rate.to_string(),
            "overtime_pay": overtime_pay.to_string()
        }),
        reasoning,
    };

    Ok(OvertimePayResult {
        hourly_rate,
        overtime_pay,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_currency_midpoint_away_from_zero() {
        assert_eq!(round_currency(dec("0.005")), dec("0.01"));
        assert_eq!(round_currency(dec("-0.005")), dec("-0.01"));
        assert_eq!(round_currency(dec("45454.545454")), dec("45454.55"));
        assert_eq!(round_currency(dec("100")), dec("100"));
    }

    #[test]
    fn test_full_month_earns_monthly_rate() {
        let result =
            calculate_gross_earnings(dec("50000"), 22, 0, &PayPolicy::default(), 1).unwrap();
        assert_eq!(result.gross_earnings, dec("50000.00"));
        assert_eq!(result.audit_step.rule_id, "gross_earnings");
        assert_eq!(result.audit_step.output["paid_days"], 22);
    }

    #[test]
    fn test_partial_month_is_prorated() {
        let result =
            calculate_gross_earnings(dec("50000"), 20, 0, &PayPolicy::default(), 1).unwrap();
        assert_eq!(result.gross_earnings, dec("45454.55"));
    }

    #[test]
    fn test_paid_leave_counts_towards_paid_days() {
        let result =
            calculate_gross_earnings(dec("50000"), 20, 2, &PayPolicy::default(), 1).unwrap();
        assert_eq!(result.gross_earnings, dec("50000.00"));
    }

    #[test]
    fn test_no_days_earns_nothing() {
        let result =
            calculate_gross_earnings(dec("50000"), 0, 0, &PayPolicy::default(), 1).unwrap();
        assert_eq!(result.gross_earnings, Decimal::ZERO);
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let result = calculate_gross_earnings(dec("-1"), 22, 0, &PayPolicy::default(), 1);
        assert!(matches!(result, Err(EngineError::Validation { .. })));
    }

    #[test]
    fn test_zero_working_days_policy_is_rejected() {
        let policy = PayPolicy {
            standard_working_days: 0,
            ..PayPolicy::default()
        };
        let result = calculate_gross_earnings(dec("50000"), 22, 0, &policy, 1);
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
        assert!(hourly_rate(dec("50000"), &policy).is_err());
    }

    #[test]
    fn test_hourly_rate() {
        let rate = hourly_rate(dec("17600"), &PayPolicy::default()).unwrap();
        assert_eq!(rate, dec("100"));
    }

    #[test]
    fn test_overtime_pay_for_ten_hours() {
        let result =
            calculate_overtime_pay(dec("10"), dec("50000"), &PayPolicy::default(), 2).unwrap();
        assert_eq!(result.hourly_rate, dec("284.09"));
        assert_eq!(result.overtime_pay, dec("3551.14"));
        assert_eq!(result.audit_step.step_number, 2);
    }

    #[test]
    fn test_no_overtime_pays_nothing() {
        let result =
            calculate_overtime_pay(Decimal::ZERO, dec("50000"), &PayPolicy::default(), 2).unwrap();
        assert_eq!(result.overtime_pay, Decimal::ZERO);
        assert_eq!(result.audit_step.reasoning, "No approved overtime in period");
    }

    #[test]
    fn test_negative_overtime_hours_rejected() {
        let result = calculate_overtime_pay(dec("-1"), dec("50000"), &PayPolicy::default(), 2);
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_custom_multiplier() {
        let policy = PayPolicy {
            overtime_multiplier: dec("1.30"),
            ..PayPolicy::default()
        };
        let result = calculate_overtime_pay(dec("2"), dec("17600"), &policy, 1).unwrap();
        assert_eq!(result.overtime_pay, dec("260.00"));
    }
}
