//! Attendance record model.
//!
//! This module defines the [`AttendanceRecord`] struct representing one
//! employee's log-in/log-out for a calendar day, and the derived measures
//! (work hours, lateness, undertime) the aggregator sums over a period.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The recorded status of an attendance day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// The employee reported for work.
    #[default]
    Present,
    /// The employee was marked absent for the day.
    Absent,
}

/// A single day of attendance for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee the record belongs to.
    pub employee_id: u32,
    /// The calendar day of the record.
    pub date: NaiveDate,
    /// When the employee logged in, if at all.
    pub log_in: Option<NaiveTime>,
    /// When the employee logged out; `None` if not yet logged out.
    pub log_out: Option<NaiveTime>,
    /// The recorded status for the day.
    #[serde(default)]
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Creates a present record with the given times.
    pub fn new(
        employee_id: u32,
        date: NaiveDate,
        log_in: Option<NaiveTime>,
        log_out: Option<NaiveTime>,
    ) -> Self {
        Self {
            employee_id,
            date,
            log_in,
            log_out,
            status: AttendanceStatus::Present,
        }
    }

    /// Short label identifying the record in errors and audit output.
    pub fn describe(&self) -> String {
        format!("attendance {} {}", self.employee_id, self.date)
    }

    /// Checks the record invariants.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRecord`] if the employee id is zero or the
    /// log-out time is earlier than the log-in time.
    pub fn validate(&self) -> EngineResult<()> {
        if self.employee_id == 0 {
            return Err(EngineError::invalid_record(
                self.describe(),
                "employee id must be positive",
            ));
        }
        if let (Some(log_in), Some(log_out)) = (self.log_in, self.log_out) {
            if log_out < log_in {
                return Err(EngineError::invalid_record(
                    self.describe(),
                    format!("log-out {} is earlier than log-in {}", log_out, log_in),
                ));
            }
        }
        Ok(())
    }

    /// Returns true if the employee logged in and was not marked absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::AttendanceRecord;
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let record = AttendanceRecord::new(
    ///     10001,
    ///     NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
    ///     NaiveTime::from_hms_opt(8, 0, 0),
    ///     None,
    /// );
    /// assert!(record.is_present());
    /// ```
    pub fn is_present(&self) -> bool {
        self.log_in.is_some() && self.status != AttendanceStatus::Absent
    }

    /// Returns the hours between log-in and log-out.
    ///
    /// Zero when either time is missing; never negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::AttendanceRecord;
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let record = AttendanceRecord::new(
    ///     10001,
    ///     NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
    ///     NaiveTime::from_hms_opt(8, 0, 0),
    ///     NaiveTime::from_hms_opt(17, 30, 0),
    /// );
    /// assert_eq!(record.work_hours(), Decimal::new(95, 1)); // 9.5 hours
    /// ```
    pub fn work_hours(&self) -> Decimal {
        match (self.log_in, self.log_out) {
            (Some(log_in), Some(log_out)) => {
                let minutes = (log_out - log_in).num_minutes().max(0);
                Decimal::new(minutes, 0) / Decimal::new(60, 0)
            }
            _ => Decimal::ZERO,
        }
    }

    /// Returns true if the employee logged in after `shift_start`.
    pub fn is_late(&self, shift_start: NaiveTime) -> bool {
        self.late_minutes(shift_start) > 0
    }

    /// Minutes between `shift_start` and log-in, zero if on time or absent.
    pub fn late_minutes(&self, shift_start: NaiveTime) -> i64 {
        if !self.is_present() {
            return 0;
        }
        match self.log_in {
            Some(log_in) if log_in > shift_start => (log_in - shift_start).num_minutes(),
            _ => 0,
        }
    }

    /// Returns true if the employee logged out before `shift_end`.
    ///
    /// A record without a log-out never has undertime.
    pub fn has_undertime(&self, shift_end: NaiveTime) -> bool {
        self.undertime_minutes(shift_end) > 0
    }

    /// Minutes between log-out and `shift_end`, zero if not applicable.
    pub fn undertime_minutes(&self, shift_end: NaiveTime) -> i64 {
        if !self.is_present() {
            return 0;
        }
        match self.log_out {
            Some(log_out) if log_out < shift_end => (shift_end - log_out).num_minutes(),
            _ => 0,
        }
    }

    /// Returns true if the worked hours reach `full_day_hours`.
    pub fn is_full_day(&self, full_day_hours: Decimal) -> bool {
        self.is_present() && self.work_hours() >= full_day_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn record(log_in: Option<NaiveTime>, log_out: Option<NaiveTime>) -> AttendanceRecord {
        AttendanceRecord::new(10001, make_date("2024-06-03"), log_in, log_out)
    }

    #[test]
    fn test_full_shift_is_present_with_nine_hours() {
        let record = record(Some(time(8, 0)), Some(time(17, 0)));
        assert!(record.validate().is_ok());
        assert!(record.is_present());
        assert_eq!(record.work_hours(), dec("9"));
        assert!(record.is_full_day(dec("8.0")));
    }

    #[test]
    fn test_log_out_before_log_in_is_invalid() {
        let record = record(Some(time(17, 0)), Some(time(8, 0)));
        let err = record.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("earlier than log-in"));
    }

    #[test]
    fn test_zero_employee_id_is_invalid() {
        let mut record = record(Some(time(8, 0)), Some(time(17, 0)));
        record.employee_id = 0;
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_late_arrival() {
        let record = record(Some(time(8, 30)), Some(time(17, 0)));
        assert!(record.is_late(time(8, 0)));
        assert_eq!(record.late_minutes(time(8, 0)), 30);
    }

    #[test]
    fn test_on_time_arrival_is_not_late() {
        let record = record(Some(time(8, 0)), Some(time(17, 0)));
        assert!(!record.is_late(time(8, 0)));
        assert_eq!(record.late_minutes(time(8, 0)), 0);
    }

    #[test]
    fn test_undertime() {
        let record = record(Some(time(8, 0)), Some(time(16, 30)));
        assert!(record.has_undertime(time(17, 0)));
        assert_eq!(record.undertime_minutes(time(17, 0)), 30);
    }

    #[test]
    fn test_work_hours_with_half_hour() {
        let record = record(Some(time(8, 0)), Some(time(17, 30)));
        assert_eq!(record.work_hours(), dec("9.5"));
    }

    #[test]
    fn test_null_log_out() {
        let record = record(Some(time(8, 0)), None);
        assert!(record.is_present());
        assert!(!record.has_undertime(time(17, 0)));
        assert_eq!(record.work_hours(), Decimal::ZERO);
        assert!(!record.is_full_day(dec("8.0")));
    }

    #[test]
    fn test_no_log_in_is_not_present() {
        let record = record(None, None);
        assert!(!record.is_present());
        assert_eq!(record.late_minutes(time(8, 0)), 0);
    }

    #[test]
    fn test_absent_status_is_not_present() {
        let mut record = record(Some(time(9, 0)), Some(time(12, 0)));
        record.status = AttendanceStatus::Absent;
        assert!(!record.is_present());
        assert_eq!(record.late_minutes(time(8, 0)), 0);
        assert_eq!(record.undertime_minutes(time(17, 0)), 0);
    }

    #[test]
    fn test_short_day_is_not_full_day() {
        let record = record(Some(time(8, 0)), Some(time(15, 0)));
        assert!(!record.is_full_day(dec("8.0")));
    }

    #[test]
    fn test_deserialize_defaults_to_present() {
        let json = r#"{
            "employee_id": 10001,
            "date": "2024-06-03",
            "log_in": "08:00:00",
            "log_out": null
        }"#;
        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.log_in, Some(time(8, 0)));
        assert_eq!(record.log_out, None);
    }
}
