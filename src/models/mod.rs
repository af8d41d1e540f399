//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod allowance;
mod attendance;
mod compensation_package;
mod deduction;
mod employee;
mod leave;
mod overtime;
mod pay_period;
mod payroll_result;

pub use allowance::{
    Allowance, AllowanceRule, AllowanceType, ClothingAllowance, DEFAULT_CLOTHING_AMOUNT,
    DEFAULT_RICE_AMOUNT, PhoneAllowance, PhoneTier, RiceAllowance,
};
pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use compensation_package::CompensationPackage;
pub use deduction::{Deduction, GovernmentContributions};
pub use employee::{AllowanceEntitlements, EmployeeProfile, EmploymentStatus};
pub use leave::{LeaveRecord, LeaveStatus};
pub use overtime::OvertimeRecord;
pub use pay_period::PayPeriod;
pub use payroll_result::{
    AllowancePayment, AttendanceSummary, AuditStep, AuditTrace, AuditWarning, PayrollResult,
};
