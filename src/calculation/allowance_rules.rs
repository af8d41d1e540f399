//! Allowance entitlement rules.
//!
//! This module decides which allowances an employee receives for a period.
//! Amounts come from the employee's entitlements, falling back to the policy
//! defaults; eligibility is decided by each allowance's [`AllowanceRule`].

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::AllowancePolicy;
use crate::error::EngineResult;
use crate::models::{
    Allowance, AllowancePayment, AllowanceRule, AuditStep, ClothingAllowance, EmployeeProfile,
    EmploymentStatus, PhoneAllowance, RiceAllowance,
};

use super::round_currency;

/// The result of calculating allowances, including the payments and audit step.
#[derive(Debug, Clone)]
pub struct AllowancesResult {
    /// One payment per allowance received, in rice, phone, clothing order.
    pub allowances: Vec<AllowancePayment>,
    /// Sum of the payments.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Builds the allowances an employee is entitled to.
///
/// - Rice: the employee's override or the policy default.
/// - Phone: Regular employees receive their configured amount (none if not
///   configured); Probationary employees receive the policy's fixed reduced
///   amount unless their phone entitlement is explicitly zero.
/// - Clothing: the employee's override or the policy default.
///
/// Allowances the employee is not eligible for, and zero amounts, are left
/// out.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Validation`] if the employee id is
/// zero or an amount is negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::entitled_allowances;
/// use payroll_engine::config::AllowancePolicy;
/// use payroll_engine::models::{AllowanceRule, AllowanceType, EmployeeProfile, EmploymentStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = EmployeeProfile {
///     id: 10002,
///     name: "Ana Reyes".to_string(),
///     status: EmploymentStatus::Probationary,
///     basic_salary: Decimal::new(25000, 0),
///     entitlements: Default::default(),
///     bonus_eligible: false,
/// };
///
/// let allowances = entitled_allowances(
///     &employee,
///     &AllowancePolicy::default(),
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
/// )
/// .unwrap();
///
/// let kinds: Vec<AllowanceType> = allowances.iter().map(|a| a.allowance_type()).collect();
/// assert_eq!(kinds, vec![AllowanceType::Rice, AllowanceType::Phone]);
/// ```
pub fn entitled_allowances(
    employee: &EmployeeProfile,
    policy: &AllowancePolicy,
    effective_date: NaiveDate,
) -> EngineResult<Vec<Allowance>> {
    let entitlements = &employee.entitlements;

    let rice = RiceAllowance::with_amount(
        employee.id,
        entitlements.rice.unwrap_or(policy.default_rice),
        effective_date,
    )?;

    let phone = match (employee.status, entitlements.phone) {
        (EmploymentStatus::Probationary, Some(amount)) if amount.is_zero() => None,
        (EmploymentStatus::Probationary, _) => Some(PhoneAllowance::reduced(
            employee.id,
            policy.probationary_phone,
            effective_date,
        )?),
        (_, Some(amount)) => Some(PhoneAllowance::new(employee.id, amount, effective_date)?),
        (_, None) => None,
    };

    let clothing = ClothingAllowance::with_amount(
        employee.id,
        entitlements.clothing.unwrap_or(policy.default_clothing),
        effective_date,
    )?;

    let candidates = [
        Some(Allowance::from(rice)),
        phone.map(Allowance::from),
        Some(Allowance::from(clothing)),
    ];

    Ok(candidates
        .into_iter()
        .flatten()
        .filter(|a| a.is_eligible(employee.status) && a.calculated_amount() > Decimal::ZERO)
        .collect())
}

/// Calculates the allowance payments for a period.
///
/// Allowances are monthly amounts and are paid in full regardless of
/// attendance.
///
/// # Arguments
///
/// * `employee` - The employee to calculate allowances for
/// * `policy` - Default amounts
/// * `effective_date` - The date the allowances apply from (the period start)
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_allowances(
    employee: &EmployeeProfile,
    policy: &AllowancePolicy,
    effective_date: NaiveDate,
    step_number: u32,
) -> EngineResult<AllowancesResult> {
    let entitled = entitled_allowances(employee, policy, effective_date)?;

    let allowances: Vec<AllowancePayment> = entitled
        .iter()
        .map(|allowance| AllowancePayment {
            allowance_type: allowance.allowance_type(),
            description: allowance.allowance_type().label().to_string(),
            amount: round_currency(allowance.calculated_amount()),
            taxable: allowance.is_taxable(),
        })
        .collect();
    let total: Decimal = allowances.iter().map(|a| a.amount).sum();

    let reasoning = if allowances.is_empty() {
        format!(
            "{} employee is not eligible for any allowance",
            employee.status.label()
        )
    } else {
        let parts: Vec<String> = allowances
            .iter()
            .map(|a| format!("{} {}", a.description, a.amount.normalize()))
            .collect();
        format!(
            "{} employee receives {} = {}",
            employee.status.label(),
            parts.join(" + "),
            total.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "allowances".to_string(),
        rule_name: "Allowance Entitlements".to_string(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "status": employee.status,
            "rice_override": employee.entitlements.rice.map(|d| d.normalize().to_string()),
            "phone_entitlement": employee.entitlements.phone.map(|d| d.normalize().to_string()),
            "clothing_override": employee.entitlements.clothing.map(|d| d.normalize().to_string())
        }),
        output: serde_json::json!({
            "allowances": allowances
                .iter()
                .map(|a| serde_json::json!({
                    "type": a.allowance_type,
                    "amount": a.amount.to_string(),
                    "taxable": a.taxable
                }))
                .collect::<Vec<_>>(),
            "total": total.to_string()
        }),
        reasoning,
    };

    Ok(AllowancesResult {
        allowances,
        total,
        audit_step,
    })
}
