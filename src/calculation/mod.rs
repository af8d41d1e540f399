//! Payroll calculation logic.
//!
//! This module contains the calculation functions for one pay period:
//! attendance aggregation, prorated basic salary, overtime pay, allowance
//! entitlements, and government contributions with withholding tax. The
//! [`PayrollCalculator`] runs them in order and assembles the result.

mod allowance_rules;
mod attendance_aggregation;
mod contributions;
mod earnings;
mod payroll_calculator;

pub use allowance_rules::{AllowancesResult, calculate_allowances, entitled_allowances};
pub use attendance_aggregation::{AttendanceAggregation, aggregate_attendance};
pub use contributions::{
    ContributionsResult, bracket_amount, calculate_contributions, withholding_tax,
};
pub use earnings::{
    CURRENCY_SCALE, GrossEarningsResult, OvertimePayResult, calculate_gross_earnings,
    calculate_overtime_pay, hourly_rate, round_currency,
};
pub use payroll_calculator::{
    CalculationStage, NEGATIVE_NET_PAY, NO_PAID_DAYS, PayrollCalculator, PayrollRequest,
    UNAPPROVED_OVERTIME,
};
