//! Record providers.
//!
//! The engine reads employees and their time records through the four
//! provider traits in this module, so any storage backend can be plugged in.
//! [`RecordStore`] is an in-memory implementation of all four.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{AttendanceRecord, EmployeeProfile, LeaveRecord, OvertimeRecord};

/// Looks up employee profiles.
pub trait EmployeeProvider: Send + Sync {
    /// Returns the employee with `employee_id`, or `None` if there is none.
    fn employee_by_id(&self, employee_id: u32) -> EngineResult<Option<EmployeeProfile>>;
}

/// Supplies attendance records.
pub trait AttendanceProvider: Send + Sync {
    /// Returns the employee's attendance records dated within `[start, end]`.
    fn attendance_between(
        &self,
        employee_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>>;
}

/// Supplies overtime records.
pub trait OvertimeProvider: Send + Sync {
    /// Returns the employee's overtime records dated within `[start, end]`.
    fn overtime_between(
        &self,
        employee_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<OvertimeRecord>>;
}

/// Supplies leave records.
pub trait LeaveProvider: Send + Sync {
    /// Returns the employee's approved leave overlapping `[start, end]`.
    fn approved_leave_between(
        &self,
        employee_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<LeaveRecord>>;
}

/// In-memory store implementing every provider trait.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{EmployeeProfile, EmploymentStatus};
/// use payroll_engine::provider::{EmployeeProvider, RecordStore};
/// use rust_decimal::Decimal;
///
/// let store = RecordStore::new().with_employee(EmployeeProfile {
///     id: 10001,
///     name: "John Doe".to_string(),
///     status: EmploymentStatus::Regular,
///     basic_salary: Decimal::new(50000, 0),
///     entitlements: Default::default(),
///     bonus_eligible: true,
/// });
///
/// assert!(store.employee_by_id(10001).unwrap().is_some());
/// assert!(store.employee_by_id(99999).unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    employees: HashMap<u32, EmployeeProfile>,
    attendance: Vec<AttendanceRecord>,
    overtime: Vec<OvertimeRecord>,
    leave: Vec<LeaveRecord>,
}

impl RecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an employee.
    pub fn insert_employee(&mut self, employee: EmployeeProfile) {
        self.employees.insert(employee.id, employee);
    }

    /// Adds attendance records.
    pub fn extend_attendance(&mut self, records: impl IntoIterator<Item = AttendanceRecord>) {
        self.attendance.extend(records);
    }

    /// Adds overtime records.
    pub fn extend_overtime(&mut self, records: impl IntoIterator<Item = OvertimeRecord>) {
        self.overtime.extend(records);
    }

    /// Adds leave records.
    pub fn extend_leave(&mut self, records: impl IntoIterator<Item = LeaveRecord>) {
        self.leave.extend(records);
    }

    /// Builder form of [`RecordStore::insert_employee`].
    pub fn with_employee(mut self, employee: EmployeeProfile) -> Self {
        self.insert_employee(employee);
        self
    }

    /// Builder form of [`RecordStore::extend_attendance`].
    pub fn with_attendance(mut self, records: impl IntoIterator<Item = AttendanceRecord>) -> Self {
        self.extend_attendance(records);
        self
    }

    /// Builder form of [`RecordStore::extend_overtime`].
    pub fn with_overtime(mut self, records: impl IntoIterator<Item = OvertimeRecord>) -> Self {
        self.extend_overtime(records);
        self
    }

    /// Builder form of [`RecordStore::extend_leave`].
    pub fn with_leave(mut self, records: impl IntoIterator<Item = LeaveRecord>) -> Self {
        self.extend_leave(records);
        self
    }
}

impl EmployeeProvider for RecordStore {
    fn employee_by_id(&self, employee_id: u32) -> EngineResult<Option<EmployeeProfile>> {
        Ok(self.employees.get(&employee_id).cloned())
    }
}

impl AttendanceProvider for RecordStore {
    fn attendance_between(
        &self,
        employee_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        Ok(self
            .attendance
            .iter()
            .filter(|r| r.employee_id == employee_id && r.date >= start && r.date <= end)
            .cloned()
            .collect())
    }
}

impl OvertimeProvider for RecordStore {
    fn overtime_between(
        &self,
        employee_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<OvertimeRecord>> {
        Ok(self
            .overtime
            .iter()
            .filter(|r| r.employee_id == employee_id && r.date >= start && r.date <= end)
            .cloned()
            .collect())
    }
}

impl LeaveProvider for RecordStore {
    fn approved_leave_between(
        &self,
        employee_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<LeaveRecord>> {
        Ok(self
            .leave
            .iter()
            .filter(|r| {
                r.employee_id == employee_id
                    && r.is_approved()
                    && r.start_date <= end
                    && r.end_date >= start
            })
            .cloned()
            .collect())
    }
}
