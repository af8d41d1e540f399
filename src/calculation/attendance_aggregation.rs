//! Attendance aggregation.
//!
//! Reduces an employee's attendance, overtime and leave records for a pay
//! period into an [`AttendanceSummary`]. Records outside the period are
//! ignored; malformed records fail the aggregation.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::ShiftPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AttendanceSummary, AuditStep, LeaveRecord, OvertimeRecord, PayPeriod,
};

/// The result of aggregating attendance, including the audit step.
#[derive(Debug, Clone)]
pub struct AttendanceAggregation {
    /// Period totals.
    pub summary: AttendanceSummary,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Presence on one date, merged across that date's records.
struct WorkedDay {
    hours: Decimal,
    late_minutes: i64,
    undertime_minutes: i64,
    open: bool,
}

impl WorkedDay {
    fn from_record(record: &AttendanceRecord, shift: &ShiftPolicy) -> Self {
        Self {
            hours: record.work_hours(),
            late_minutes: record.late_minutes(shift.shift_start),
            undertime_minutes: record.undertime_minutes(shift.shift_end),
            open: record.log_out.is_none(),
        }
    }

    /// Lateness follows the earliest log-in and undertime the latest log-out.
    fn merge(&mut self, record: &AttendanceRecord, shift: &ShiftPolicy) {
        self.hours += record.work_hours();
        self.late_minutes = self.late_minutes.min(record.late_minutes(shift.shift_start));
        self.undertime_minutes = self
            .undertime_minutes
            .min(record.undertime_minutes(shift.shift_end));
        self.open |= record.log_out.is_none();
    }

    fn undertime(&self) -> i64 {
        if self.open { 0 } else { self.undertime_minutes }
    }
}

fn check_owner(expected: u32, actual: u32, record: impl FnOnce() -> String) -> EngineResult<()> {
    if expected != actual {
        return Err(EngineError::invalid_record(
            record(),
            format!("belongs to employee {}, expected {}", actual, expected),
        ));
    }
    Ok(())
}

/// Aggregates attendance, overtime and leave for one employee and period.
///
/// # Arguments
///
/// * `employee_id` - The employee every record must belong to
/// * `period` - The pay period
/// * `attendance` - Attendance records, in any order
/// * `overtime` - Overtime records, in any order
/// * `leave` - Leave records; only approved leave is counted
/// * `shift` - Late, undertime and full-day thresholds
/// * `step_number` - The step number for audit trail sequencing
///
/// # Rules
///
/// - A day is worked if any in-period record for it is present; duplicate
///   records for one date count once, and their hours are summed.
/// - Late minutes for a date are measured from its earliest log-in and
///   undertime from its latest log-out. A date with an open record has no
///   undertime.
/// - A record with a log-in but no log-out is present with zero hours and no
///   undertime.
/// - Only approved overtime is paid; the rest is reported separately.
/// - Paid leave days are approved, paid leave dates the employee did not
///   also work.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRecord`] for a malformed record or one
/// belonging to another employee, and [`EngineError::CalculationError`] if a
/// total comes out negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::aggregate_attendance;
/// use payroll_engine::config::ShiftPolicy;
/// use payroll_engine::models::{AttendanceRecord, PayPeriod};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
/// )
/// .unwrap();
/// let attendance = vec![AttendanceRecord::new(
///     10001,
///     NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     NaiveTime::from_hms_opt(8, 15, 0),
///     NaiveTime::from_hms_opt(17, 0, 0),
/// )];
///
/// let result =
///     aggregate_attendance(10001, &period, &attendance, &[], &[], &ShiftPolicy::default(), 1)
///         .unwrap();
/// assert_eq!(result.summary.days_worked, 1);
/// assert_eq!(result.summary.total_late_minutes, 15);
/// assert_eq!(result.summary.total_work_hours, Decimal::new(875, 2));
/// ```
pub fn aggregate_attendance(
    employee_id: u32,
    period: &PayPeriod,
    attendance: &[AttendanceRecord],
    overtime: &[OvertimeRecord],
    leave: &[LeaveRecord],
    shift: &ShiftPolicy,
    step_number: u32,
) -> EngineResult<AttendanceAggregation> {
    let mut worked_days: BTreeMap<NaiveDate, WorkedDay> = BTreeMap::new();
    let mut ignored = 0usize;

    for record in attendance {
        record.validate()?;
        check_owner(employee_id, record.employee_id, || record.describe())?;
        if !period.contains_date(record.date) {
            debug!(record = %record.describe(), "ignoring attendance outside pay period");
            ignored += 1;
            continue;
        }
        if !record.is_present() {
            continue;
        }

        worked_days
            .entry(record.date)
            .and_modify(|day| day.merge(record, shift))
            .or_insert_with(|| WorkedDay::from_record(record, shift));
    }

    let mut total_overtime_hours = Decimal::ZERO;
    let mut unapproved_overtime_hours = Decimal::ZERO;

    for record in overtime {
        record.validate()?;
        check_owner(employee_id, record.employee_id, || record.describe())?;
        if !period.contains_date(record.date) {
            debug!(record = %record.describe(), "ignoring overtime outside pay period");
            ignored += 1;
            continue;
        }
        if record.approved {
            total_overtime_hours += record.hours;
        } else {
            unapproved_overtime_hours += record.hours;
        }
    }

    let mut approved_leave_dates: BTreeSet<NaiveDate> = BTreeSet::new();
    let mut paid_leave_dates: BTreeSet<NaiveDate> = BTreeSet::new();

    for record in leave {
        record.validate()?;
        check_owner(employee_id, record.employee_id, || record.describe())?;
        if record.days_within(period) == 0 {
            debug!(record = %record.describe(), "ignoring leave outside pay period");
            ignored += 1;
            continue;
        }
        if !record.is_approved() {
            debug!(
                record = %record.describe(),
                status = ?record.status,
                "ignoring leave that is not approved"
            );
            continue;
        }
        for date in period.dates().filter(|d| record.covers(*d)) {
            approved_leave_dates.insert(date);
            if record.counts_as_paid() && !worked_days.contains_key(&date) {
                paid_leave_dates.insert(date);
            }
        }
    }

    let total_work_hours: Decimal = worked_days.values().map(|day| day.hours).sum();
    let total_late_minutes: i64 = worked_days.values().map(|day| day.late_minutes).sum();
    let total_undertime_minutes: i64 = worked_days.values().map(WorkedDay::undertime).sum();

    if total_work_hours < Decimal::ZERO
        || total_overtime_hours < Decimal::ZERO
        || total_late_minutes < 0
        || total_undertime_minutes < 0
    {
        return Err(EngineError::CalculationError {
            message: format!(
                "negative attendance totals for employee {}: {} work hours, {} overtime hours",
                employee_id, total_work_hours, total_overtime_hours
            ),
        });
    }

    let full_days = worked_days
        .values()
        .filter(|day| day.hours >= shift.full_day_hours)
        .count();

    let summary = AttendanceSummary {
        calendar_days: period.calendar_days(),
        days_worked: count_u32(worked_days.len()),
        full_days: count_u32(full_days),
        total_work_hours,
        total_late_minutes,
        total_undertime_minutes,
        total_overtime_hours,
        unapproved_overtime_hours,
        approved_leave_days: count_u32(approved_leave_dates.len()),
        paid_leave_days: count_u32(paid_leave_dates.len()),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "attendance_aggregation".to_string(),
        rule_name: "Attendance Aggregation".to_string(),
        input: serde_json::json!({
            "employee_id": employee_id,
            "period_start": period.start_date.to_string(),
            "period_end": period.end_date.to_string(),
            "attendance_records": attendance.len(),
            "overtime_records": overtime.len(),
            "leave_records": leave.len(),
            "ignored_out_of_period": ignored
        }),
        output: serde_json::json!({
            "calendar_days": summary.calendar_days,
            "days_worked": summary.days_worked,
            "full_days": summary.full_days,
            "total_work_hours": summary.total_work_hours.normalize().to_string(),
            "total_late_minutes": summary.total_late_minutes,
            "total_undertime_minutes": summary.total_undertime_minutes,
            "total_overtime_hours": summary.total_overtime_hours.normalize().to_string(),
            "unapproved_overtime_hours": summary.unapproved_overtime_hours.normalize().to_string(),
            "approved_leave_days": summary.approved_leave_days,
            "paid_leave_days": summary.paid_leave_days
        }),
        reasoning: format!(
            "{} days worked of {} calendar days, {} approved overtime hours, {} paid leave days",
            summary.days_worked,
            summary.calendar_days,
            summary.total_overtime_hours.normalize(),
            summary.paid_leave_days
        ),
    };

    Ok(AttendanceAggregation {
        summary,
        audit_step,
    })
}

fn count_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
