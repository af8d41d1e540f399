//! Payroll calculation orchestrator.
//!
//! [`PayrollCalculator`] drives one calculation through its stages:
//! validate the request, load the employee and contribution schedule,
//! aggregate time records, compute pay, and assemble a [`PayrollResult`].
//! Any failure aborts the calculation; no partial result is returned.

use std::fmt;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditTrace, AuditWarning, PayPeriod, PayrollResult};
use crate::provider::{AttendanceProvider, EmployeeProvider, LeaveProvider, OvertimeProvider};

use super::{
    aggregate_attendance, calculate_allowances, calculate_contributions, calculate_gross_earnings,
    calculate_overtime_pay,
};

/// Warning code recorded when deductions exceed gross pay.
pub const NEGATIVE_NET_PAY: &str = "NEGATIVE_NET_PAY";

/// Warning code recorded when overtime awaiting approval was left unpaid.
pub const UNAPPROVED_OVERTIME: &str = "UNAPPROVED_OVERTIME";

/// Warning code recorded when the employee has no paid days in the period.
pub const NO_PAID_DAYS: &str = "NO_PAID_DAYS";

/// The stage a calculation is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationStage {
    /// Checking the request.
    Validating,
    /// Loading the employee and configuration.
    Loading,
    /// Reducing time records to period totals.
    Aggregating,
    /// Computing pay, allowances and contributions.
    Computing,
    /// The result is complete.
    Assembled,
    /// The calculation was aborted.
    Failed,
}

impl fmt::Display for CalculationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalculationStage::Validating => "validating",
            CalculationStage::Loading => "loading",
            CalculationStage::Aggregating => "aggregating",
            CalculationStage::Computing => "computing",
            CalculationStage::Assembled => "assembled",
            CalculationStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// A request to calculate one employee's payroll.
///
/// The dates are optional so that incomplete requests from callers can be
/// rejected with a typed validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The employee to calculate for.
    pub employee_id: u32,
    /// First day of the pay period.
    #[serde(default)]
    pub period_start: Option<NaiveDate>,
    /// Last day of the pay period.
    #[serde(default)]
    pub period_end: Option<NaiveDate>,
}

impl PayrollRequest {
    /// Creates a request with both period bounds.
    pub fn new(employee_id: u32, period_start: NaiveDate, period_end: NaiveDate) -> Self {
        Self {
            employee_id,
            period_start: Some(period_start),
            period_end: Some(period_end),
        }
    }
}

/// Calculates payroll from provider data and engine configuration.
///
/// The calculator holds only shared references and no mutable state, so one
/// instance can serve many independent calculations, including from several
/// threads.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::PayrollCalculator;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::error::EngineError;
/// use payroll_engine::provider::RecordStore;
/// use chrono::NaiveDate;
///
/// let config = ConfigLoader::builtin().unwrap().into_config();
/// let store = RecordStore::new();
/// let calculator = PayrollCalculator::new(&store, &config);
///
/// let result = calculator.calculate_payroll(
///     99999,
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
/// );
/// assert!(matches!(result, Err(EngineError::EmployeeNotFound { employee_id: 99999 })));
/// ```
pub struct PayrollCalculator<'a> {
    employees: &'a dyn EmployeeProvider,
    attendance: &'a dyn AttendanceProvider,
    overtime: &'a dyn OvertimeProvider,
    leave: &'a dyn LeaveProvider,
    config: &'a EngineConfig,
}

impl<'a> PayrollCalculator<'a> {
    /// Creates a calculator reading every record kind from one store.
    pub fn new<S>(store: &'a S, config: &'a EngineConfig) -> Self
    where
        S: EmployeeProvider + AttendanceProvider + OvertimeProvider + LeaveProvider,
    {
        Self {
            employees: store,
            attendance: store,
            overtime: store,
            leave: store,
            config,
        }
    }

    /// Creates a calculator from separate providers.
    pub fn with_providers(
        employees: &'a dyn EmployeeProvider,
        attendance: &'a dyn AttendanceProvider,
        overtime: &'a dyn OvertimeProvider,
        leave: &'a dyn LeaveProvider,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            employees,
            attendance,
            overtime,
            leave,
            config,
        }
    }

    /// Calculates payroll for `employee_id` over `[period_start, period_end]`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Validation`] for a zero id or an inverted period
    /// - [`EngineError::EmployeeNotFound`] if the employee does not exist
    /// - [`EngineError::ScheduleNotFound`] if no schedule covers the period
    /// - [`EngineError::InvalidRecord`] for malformed provider records
    /// - any error raised by a provider
    pub fn calculate_payroll(
        &self,
        employee_id: u32,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> EngineResult<PayrollResult> {
        self.run(&PayrollRequest::new(employee_id, period_start, period_end))
    }

    /// Runs a calculation request.
    ///
    /// See [`PayrollCalculator::calculate_payroll`] for the errors returned;
    /// in addition a missing period bound is a [`EngineError::Validation`].
    pub fn run(&self, request: &PayrollRequest) -> EngineResult<PayrollResult> {
        let start_time = Instant::now();
        let mut stage = CalculationStage::Validating;
        debug!(employee_id = request.employee_id, stage = %stage, "Payroll calculation started");

        match self.execute(request, &mut stage, start_time) {
            Ok(result) => {
                info!(
                    calculation_id = %result.calculation_id,
                    employee_id = result.employee_id,
                    gross_pay = %result.gross_pay,
                    net_pay = %result.net_pay,
                    duration_us = result.audit_trace.duration_us,
                    "Payroll calculation completed"
                );
                Ok(result)
            }
            Err(err) => {
                warn!(
                    employee_id = request.employee_id,
                    stage = %stage,
                    error = %err,
                    "Payroll calculation failed"
                );
                advance(&mut stage, CalculationStage::Failed, request.employee_id);
                Err(err)
            }
        }
    }

    /// Runs several requests independently, in order.
    pub fn run_batch(&self, requests: &[PayrollRequest]) -> Vec<EngineResult<PayrollResult>> {
        requests.iter().map(|request| self.run(request)).collect()
    }

    fn execute(
        &self,
        request: &PayrollRequest,
        stage: &mut CalculationStage,
        start_time: Instant,
    ) -> EngineResult<PayrollResult> {
        let employee_id = request.employee_id;

        // Validating
        if employee_id == 0 {
            return Err(EngineError::validation("employee_id", "must be positive"));
        }
        let period = PayPeriod::from_bounds(request.period_start, request.period_end)?;

        advance(stage, CalculationStage::Loading, employee_id);
        let employee = self
            .employees
            .employee_by_id(employee_id)?
            .ok_or(EngineError::EmployeeNotFound { employee_id })?;
        employee.validate()?;
        let schedule = self.config.schedule_for(period.start_date)?;
        let policy = self.config.policy();

        advance(stage, CalculationStage::Aggregating, employee_id);
        let mut audit_steps: Vec<AuditStep> = Vec::new();
        let mut warnings: Vec<AuditWarning> = Vec::new();
        let mut step_number: u32 = 1;

        let attendance =
            self.attendance
                .attendance_between(employee_id, period.start_date, period.end_date)?;
        let overtime =
            self.overtime
                .overtime_between(employee_id, period.start_date, period.end_date)?;
        let leave =
            self.leave
                .approved_leave_between(employee_id, period.start_date, period.end_date)?;

        let aggregation = aggregate_attendance(
            employee_id,
            &period,
            &attendance,
            &overtime,
            &leave,
            &policy.shift,
            step_number,
        )?;
        let summary = aggregation.summary;
        audit_steps.push(aggregation.audit_step);
        step_number += 1;

        advance(stage, CalculationStage::Computing, employee_id);
        let monthly_rate = employee.basic_salary;

        let earnings = calculate_gross_earnings(
            monthly_rate,
            summary.days_worked,
            summary.paid_leave_days,
            &policy.pay,
            step_number,
        )?;
        audit_steps.push(earnings.audit_step);
        step_number += 1;

        let overtime_pay = calculate_overtime_pay(
            summary.total_overtime_hours,
            monthly_rate,
            &policy.pay,
            step_number,
        )?;
        audit_steps.push(overtime_pay.audit_step);
        step_number += 1;

        let allowances =
            calculate_allowances(&employee, &policy.allowances, period.start_date, step_number)?;
        audit_steps.push(allowances.audit_step);
        step_number += 1;

        let gross_pay = earnings.gross_earnings + overtime_pay.overtime_pay + allowances.total;

        let contributions = calculate_contributions(gross_pay, schedule, step_number)?;
        audit_steps.push(contributions.audit_step);
        step_number += 1;

        let total_deductions = contributions.contributions.total();
        let net_pay = gross_pay - total_deductions;

        audit_steps.push(AuditStep {
            step_number,
            rule_id: "net_pay".to_string(),
            rule_name: "Net Pay".to_string(),
            input: serde_json::json!({
                "gross_earnings": earnings.gross_earnings.to_string(),
                "overtime_pay": overtime_pay.overtime_pay.to_string(),
                "allowance_total": allowances.total.to_string(),
                "total_deductions": total_deductions.to_string()
            }),
            output: serde_json::json!({
                "gross_pay": gross_pay.to_string(),
                "net_pay": net_pay.to_string()
            }),
            reasoning: format!(
                "{} + {} + {} = gross {}; {} - {} = net {}",
                earnings.gross_earnings,
                overtime_pay.overtime_pay,
                allowances.total,
                gross_pay,
                gross_pay,
                total_deductions,
                net_pay
            ),
        });

        if net_pay < Decimal::ZERO {
            warnings.push(AuditWarning {
                code: NEGATIVE_NET_PAY.to_string(),
                message: format!(
                    "Deductions of {} exceed gross pay of {}",
                    total_deductions, gross_pay
                ),
                severity: "high".to_string(),
            });
        }
        if summary.unapproved_overtime_hours > Decimal::ZERO {
            warnings.push(AuditWarning {
                code: UNAPPROVED_OVERTIME.to_string(),
                message: format!(
                    "{} overtime hours awaiting approval were not paid",
                    summary.unapproved_overtime_hours.normalize()
                ),
                severity: "low".to_string(),
            });
        }
        if summary.paid_days() == 0 {
            warnings.push(AuditWarning {
                code: NO_PAID_DAYS.to_string(),
                message: format!(
                    "No days worked or paid leave between {} and {}",
                    period.start_date, period.end_date
                ),
                severity: "medium".to_string(),
            });
        }

        advance(stage, CalculationStage::Assembled, employee_id);
        let duration_us = u64::try_from(start_time.elapsed().as_micros()).unwrap_or(u64::MAX);

        Ok(PayrollResult {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            employee_id,
            pay_period: period,
            days_worked: summary.days_worked,
            paid_leave_days: summary.paid_leave_days,
            monthly_rate,
            hourly_rate: overtime_pay.hourly_rate,
            gross_earnings: earnings.gross_earnings,
            total_overtime_hours: summary.total_overtime_hours,
            overtime_pay: overtime_pay.overtime_pay,
            allowances: allowances.allowances,
            allowance_total: allowances.total,
            gross_pay,
            contributions: contributions.contributions,
            taxable_income: contributions.taxable_income,
            total_deductions,
            net_pay,
            attendance: summary,
            audit_trace: AuditTrace {
                steps: audit_steps,
                warnings,
                duration_us,
            },
        })
    }
}

fn advance(stage: &mut CalculationStage, next: CalculationStage, employee_id: u32) {
    debug!(employee_id, from = %stage, to = %next, "Payroll calculation stage changed");
    *stage = next;
}
