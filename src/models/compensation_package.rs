//! Compensation package aggregate.
//!
//! A [`CompensationPackage`] groups an employee's allowances, ad-hoc
//! deductions and government contributions. Totals are computed on read from
//! the current lists, so they can never drift out of sync with them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{entitled_allowances, round_currency};
use crate::config::AllowancePolicy;
use crate::error::EngineResult;

use super::{
    Allowance, AllowanceRule, AllowanceType, Deduction, EmployeeProfile, GovernmentContributions,
};

/// Share of basic salary paid as bonus (10%).
const BONUS_SALARY_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Share of total allowances paid as bonus (5%).
const BONUS_ALLOWANCE_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// An employee's allowances, deductions and contributions.
///
/// # Example
///
/// ```
/// use payroll_engine::config::AllowancePolicy;
/// use payroll_engine::models::{
///     AllowanceEntitlements, CompensationPackage, EmployeeProfile, EmploymentStatus,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = EmployeeProfile {
///     id: 10001,
///     name: "John Doe".to_string(),
///     status: EmploymentStatus::Regular,
///     basic_salary: Decimal::new(50000, 0),
///     entitlements: AllowanceEntitlements {
///         phone: Some(Decimal::new(1000, 0)),
///         ..Default::default()
///     },
///     bonus_eligible: true,
/// };
///
/// let package = CompensationPackage::standard(
///     &employee,
///     "Standard",
///     &AllowancePolicy::default(),
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
/// )
/// .unwrap();
///
/// // rice 1500 + phone 1000 + clothing 1000
/// assert_eq!(package.total_allowances(), Decimal::new(3500, 0));
/// assert_eq!(package.net_compensation(), Decimal::new(53500, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationPackage {
    /// The package name.
    pub name: String,
    employee_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    employee: Option<EmployeeProfile>,
    /// The first date the package applies.
    pub effective_date: NaiveDate,
    /// Whether the package is currently in force.
    pub active: bool,
    allowances: Vec<Allowance>,
    deductions: Vec<Deduction>,
    contributions: GovernmentContributions,
}

impl CompensationPackage {
    /// Creates an empty, active package for `employee`.
    pub fn new(
        employee: &EmployeeProfile,
        name: impl Into<String>,
        effective_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            employee_id: employee.id,
            employee: Some(employee.clone()),
            effective_date,
            active: true,
            allowances: Vec::new(),
            deductions: Vec::new(),
            contributions: GovernmentContributions::default(),
        }
    }

    /// Creates the standard package for the employee's status.
    ///
    /// Contains every allowance the employee is entitled to under `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::Validation`] if the employee id is
    /// zero or an entitlement is negative.
    pub fn standard(
        employee: &EmployeeProfile,
        name: impl Into<String>,
        policy: &AllowancePolicy,
        effective_date: NaiveDate,
    ) -> EngineResult<Self> {
        let mut package = Self::new(employee, name, effective_date);
        for allowance in entitled_allowances(employee, policy, effective_date)? {
            package.add_allowance(allowance);
        }
        Ok(package)
    }

    /// The employee the package belongs to.
    pub fn employee_id(&self) -> u32 {
        self.employee_id
    }

    /// The employee profile, when known.
    ///
    /// Packages deserialized without a profile have none.
    pub fn employee(&self) -> Option<&EmployeeProfile> {
        self.employee.as_ref()
    }

    /// Adds an allowance if it was granted to the package's employee and that
    /// employee is eligible for it.
    ///
    /// Returns false (and leaves the package unchanged) otherwise, including
    /// when the package has no employee profile.
    pub fn add_allowance(&mut self, allowance: impl Into<Allowance>) -> bool {
        let allowance = allowance.into();
        let eligible = allowance.employee_id() == self.employee_id
            && self
                .employee
                .as_ref()
                .is_some_and(|employee| allowance.is_eligible(employee.status));
        if eligible {
            self.allowances.push(allowance);
        }
        eligible
    }

    /// Removes the first allowance equal to `allowance`.
    pub fn remove_allowance(&mut self, allowance: &Allowance) -> bool {
        match self.allowances.iter().position(|a| a == allowance) {
            Some(index) => {
                self.allowances.remove(index);
                true
            }
            None => false,
        }
    }

    /// Appends a deduction.
    pub fn add_deduction(&mut self, deduction: Deduction) {
        self.deductions.push(deduction);
    }

    /// Removes the first deduction with the given label.
    pub fn remove_deduction(&mut self, deduction_type: &str) -> bool {
        match self
            .deductions
            .iter()
            .position(|d| d.deduction_type == deduction_type)
        {
            Some(index) => {
                self.deductions.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replaces the government contributions.
    pub fn set_contributions(&mut self, contributions: GovernmentContributions) {
        self.contributions = contributions;
    }

    /// The allowances in insertion order.
    pub fn allowances(&self) -> &[Allowance] {
        &self.allowances
    }

    /// The deductions in insertion order.
    pub fn deductions(&self) -> &[Deduction] {
        &self.deductions
    }

    /// The current government contributions.
    pub fn contributions(&self) -> &GovernmentContributions {
        &self.contributions
    }

    /// Number of allowances.
    pub fn allowance_count(&self) -> usize {
        self.allowances.len()
    }

    /// Number of deductions, not counting contributions.
    pub fn deduction_count(&self) -> usize {
        self.deductions.len()
    }

    /// Sum of all allowance amounts.
    pub fn total_allowances(&self) -> Decimal {
        self.allowances.iter().map(|a| a.calculated_amount()).sum()
    }

    /// Sum of all deductions plus the contributions total.
    pub fn total_deductions(&self) -> Decimal {
        let deductions: Decimal = self.deductions.iter().map(|d| d.amount).sum();
        deductions + self.contributions.total()
    }

    /// Basic salary plus allowances minus deductions.
    pub fn net_compensation(&self) -> Decimal {
        let basic_salary = self
            .employee
            .as_ref()
            .map_or(Decimal::ZERO, |employee| employee.basic_salary);
        basic_salary + self.total_allowances() - self.total_deductions()
    }

    /// Allowances of the given kind.
    pub fn allowances_by_type(&self, kind: AllowanceType) -> Vec<&Allowance> {
        self.allowances
            .iter()
            .filter(|a| a.allowance_type() == kind)
            .collect()
    }

    /// Deductions with the given label.
    pub fn deductions_by_type(&self, deduction_type: &str) -> Vec<&Deduction> {
        self.deductions
            .iter()
            .filter(|d| d.deduction_type == deduction_type)
            .collect()
    }

    /// Returns true if the package can pay a bonus.
    pub fn is_eligible_for_bonus(&self) -> bool {
        self.active
            && self
                .employee
                .as_ref()
                .is_some_and(|employee| employee.bonus_eligible)
    }

    /// 10% of basic salary plus 5% of allowances, or zero when ineligible.
    pub fn calculate_bonus_amount(&self) -> Decimal {
        match &self.employee {
            Some(employee) if self.is_eligible_for_bonus() => round_currency(
                employee.basic_salary * BONUS_SALARY_RATE
                    + self.total_allowances() * BONUS_ALLOWANCE_RATE,
            ),
            _ => Decimal::ZERO,
        }
    }

    /// Returns true if the package is internally consistent.
    pub fn is_valid(&self) -> bool {
        self.employee_id > 0
            && !self.name.trim().is_empty()
            && self.total_allowances() >= Decimal::ZERO
            && self.total_deductions() >= Decimal::ZERO
    }

    /// Copies the package for another employee.
    ///
    /// Only the allowances `employee` is eligible for are carried over.
    /// Deductions and contributions are specific to the original employee and
    /// are not copied.
    pub fn clone_for_employee(&self, employee: &EmployeeProfile) -> Self {
        let mut package = Self::new(employee, self.name.clone(), self.effective_date);
        package.active = self.active;
        package.allowances = self
            .allowances
            .iter()
            .filter_map(|allowance| allowance.for_employee(employee))
            .collect();
        package
    }
}
