//! Leave record model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::PayPeriod;

/// Approval state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting approval.
    Pending,
    /// Approved by a supervisor.
    Approved,
    /// Rejected by a supervisor.
    Rejected,
}

/// A leave request covering an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// The employee the leave belongs to.
    pub employee_id: u32,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Approval state.
    pub status: LeaveStatus,
    /// Whether the leave is paid.
    pub paid: bool,
    /// Free-text reason given by the employee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl LeaveRecord {
    /// Short label identifying the record in errors and audit output.
    pub fn describe(&self) -> String {
        format!(
            "leave {} {}..{}",
            self.employee_id, self.start_date, self.end_date
        )
    }

    /// Checks the record invariants.
    pub fn validate(&self) -> EngineResult<()> {
        if self.employee_id == 0 {
            return Err(EngineError::invalid_record(
                self.describe(),
                "employee id must be positive",
            ));
        }
        if self.start_date > self.end_date {
            return Err(EngineError::invalid_record(
                self.describe(),
                "start date is after end date",
            ));
        }
        Ok(())
    }

    /// Returns true if the leave was approved.
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }

    /// Returns true if the leave counts towards paid days.
    pub fn counts_as_paid(&self) -> bool {
        self.is_approved() && self.paid
    }

    /// Returns true if `date` is one of the leave days.
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of leave days that fall inside `period`.
    pub fn days_within(&self, period: &PayPeriod) -> u32 {
        period.overlap_days(self.start_date, self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn leave(start: &str, end: &str, status: LeaveStatus, paid: bool) -> LeaveRecord {
        LeaveRecord {
            employee_id: 10001,
            start_date: make_date(start),
            end_date: make_date(end),
            status,
            paid,
            reason: None,
        }
    }

    #[test]
    fn test_days_within_period() {
        let period = PayPeriod::new(make_date("2024-06-01"), make_date("2024-06-30")).unwrap();
        let record = leave("2024-06-10", "2024-06-12", LeaveStatus::Approved, true);
        assert_eq!(record.days_within(&period), 3);

        let straddling = leave("2024-06-29", "2024-07-02", LeaveStatus::Approved, true);
        assert_eq!(straddling.days_within(&period), 2);
    }

    #[test]
    fn test_only_approved_paid_leave_counts_as_paid() {
        assert!(leave("2024-06-10", "2024-06-10", LeaveStatus::Approved, true).counts_as_paid());
        assert!(!leave("2024-06-10", "2024-06-10", LeaveStatus::Approved, false).counts_as_paid());
        assert!(!leave("2024-06-10", "2024-06-10", LeaveStatus::Pending, true).counts_as_paid());
        assert!(!leave("2024-06-10", "2024-06-10", LeaveStatus::Rejected, true).counts_as_paid());
    }

    #[test]
    fn test_inverted_range_is_invalid() {
        let record = leave("2024-06-12", "2024-06-10", LeaveStatus::Approved, true);
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_covers() {
        let record = leave("2024-06-10", "2024-06-12", LeaveStatus::Approved, true);
        assert!(record.covers(make_date("2024-06-10")));
        assert!(record.covers(make_date("2024-06-12")));
        assert!(!record.covers(make_date("2024-06-13")));
    }

    #[test]
    fn test_deserialize_leave_record() {
        let json = r#"{
            "employee_id": 10001,
            "start_date": "2024-06-10",
            "end_date": "2024-06-11",
            "status": "approved",
            "paid": false
        }"#;
        let record: LeaveRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, LeaveStatus::Approved);
        assert!(!record.paid);
        assert!(record.reason.is_none());
    }
}
