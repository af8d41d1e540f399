//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] type and its associated
//! structures that capture all outputs from a payroll calculation, including
//! allowance payments, contributions, the attendance summary and the audit
//! trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AllowanceType, GovernmentContributions, PayPeriod};

/// Represents an allowance paid in a payroll.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AllowancePayment, AllowanceType};
/// use rust_decimal::Decimal;
///
/// let payment = AllowancePayment {
///     allowance_type: AllowanceType::Rice,
///     description: "Rice Subsidy".to_string(),
///     amount: Decimal::new(1500, 0),
///     taxable: false,
/// };
/// assert_eq!(payment.amount, Decimal::new(1500, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowancePayment {
    /// The kind of allowance.
    #[serde(rename = "type")]
    pub allowance_type: AllowanceType,
    /// Display label of the allowance.
    pub description: String,
    /// The amount paid.
    pub amount: Decimal,
    /// Whether the allowance is taxable compensation.
    pub taxable: bool,
}

/// Period totals derived from attendance, overtime and leave records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Calendar days in the period.
    pub calendar_days: u32,
    /// Distinct dates the employee was present.
    pub days_worked: u32,
    /// Present dates with at least a full day of work hours.
    pub full_days: u32,
    /// Total hours between log-in and log-out.
    pub total_work_hours: Decimal,
    /// Total minutes logged in after shift start.
    pub total_late_minutes: i64,
    /// Total minutes logged out before shift end.
    pub total_undertime_minutes: i64,
    /// Approved overtime hours.
    pub total_overtime_hours: Decimal,
    /// Overtime hours still awaiting approval; not paid.
    pub unapproved_overtime_hours: Decimal,
    /// Approved leave days in the period.
    pub approved_leave_days: u32,
    /// Approved paid leave days on which the employee did not work.
    pub paid_leave_days: u32,
}

impl AttendanceSummary {
    /// Days that count towards prorated salary.
    pub fn paid_days(&self) -> u32 {
        self.days_worked + self.paid_leave_days
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(!trace.has_warning("NEGATIVE_NET_PAY"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Returns true if a warning with `code` was recorded.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }

    /// Returns the step recorded for `rule_id`, if any.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|s| s.rule_id == rule_id)
    }
}

/// The complete result of a payroll calculation.
///
/// Invariants: `gross_pay = gross_earnings + overtime_pay + allowance_total`
/// and `net_pay = gross_pay - total_deductions`, exactly. Net pay may be
/// negative; the audit trace then carries a `NEGATIVE_NET_PAY` warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The employee the payroll is for.
    pub employee_id: u32,
    /// The pay period.
    pub pay_period: PayPeriod,
    /// Distinct days the employee was present.
    pub days_worked: u32,
    /// Approved paid leave days counted towards salary.
    pub paid_leave_days: u32,
    /// Monthly rate (basic salary).
    pub monthly_rate: Decimal,
    /// Hourly rate used for overtime.
    pub hourly_rate: Decimal,
    /// Prorated basic salary for the period.
    pub gross_earnings: Decimal,
    /// Approved overtime hours.
    pub total_overtime_hours: Decimal,
    /// Pay for approved overtime.
    pub overtime_pay: Decimal,
    /// Allowances paid.
    pub allowances: Vec<AllowancePayment>,
    /// Sum of allowance payments.
    pub allowance_total: Decimal,
    /// Gross earnings plus overtime pay plus allowances.
    pub gross_pay: Decimal,
    /// Contribution and tax breakdown.
    pub contributions: GovernmentContributions,
    /// Income withholding tax was computed on.
    pub taxable_income: Decimal,
    /// Total of all deductions.
    pub total_deductions: Decimal,
    /// Gross pay minus total deductions.
    pub net_pay: Decimal,
    /// Attendance totals for the period.
    pub attendance: AttendanceSummary,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl PayrollResult {
    /// Amount paid for an allowance kind, zero if not paid.
    pub fn allowance_amount(&self, kind: AllowanceType) -> Decimal {
        self.allowances
            .iter()
            .filter(|a| a.allowance_type == kind)
            .map(|a| a.amount)
            .sum()
    }
}
