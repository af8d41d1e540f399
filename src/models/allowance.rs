//! Allowance variants and the rule trait they share.
//!
//! The set of allowances is closed: [`Allowance`] is a tagged union over
//! [`RiceAllowance`], [`PhoneAllowance`] and [`ClothingAllowance`], and each
//! variant implements [`AllowanceRule`]. Eligibility is keyed only by
//! [`EmploymentStatus`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{EmployeeProfile, EmploymentStatus};

/// Default monthly rice subsidy.
pub const DEFAULT_RICE_AMOUNT: Decimal = Decimal::from_parts(1500, 0, 0, false, 0);

/// Default monthly clothing allowance.
pub const DEFAULT_CLOTHING_AMOUNT: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Identifies the kind of an allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceType {
    /// Rice subsidy.
    Rice,
    /// Phone allowance.
    Phone,
    /// Clothing allowance.
    Clothing,
}

impl AllowanceType {
    /// Returns the display label used in payslips and audit output.
    pub fn label(&self) -> &'static str {
        match self {
            AllowanceType::Rice => "Rice Subsidy",
            AllowanceType::Phone => "Phone Allowance",
            AllowanceType::Clothing => "Clothing Allowance",
        }
    }
}

/// Capabilities shared by every allowance variant.
pub trait AllowanceRule {
    /// The kind of allowance.
    fn allowance_type(&self) -> AllowanceType;

    /// Returns true if an employee with `status` may receive this allowance.
    fn is_eligible(&self, status: EmploymentStatus) -> bool;

    /// The amount paid for one pay period.
    fn calculated_amount(&self) -> Decimal;

    /// Returns true if the allowance is part of taxable compensation.
    fn is_taxable(&self) -> bool;

    /// Re-creates this allowance for another employee.
    ///
    /// Returns `None` if that employee is not eligible. The configured
    /// amount and effective date are copied unchanged.
    fn for_employee(&self, employee: &EmployeeProfile) -> Option<Allowance>;
}

fn validate_allowance(kind: AllowanceType, employee_id: u32, amount: Decimal) -> EngineResult<()> {
    if employee_id == 0 {
        return Err(EngineError::validation(
            "employee_id",
            format!("{} requires a positive employee id", kind.label()),
        ));
    }
    if amount < Decimal::ZERO {
        return Err(EngineError::validation(
            "amount",
            format!("{} must not be negative, got {}", kind.label(), amount),
        ));
    }
    Ok(())
}

/// Monthly rice subsidy. Non-taxable; Regular and Probationary employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiceAllowance {
    /// The employee receiving the allowance.
    pub employee_id: u32,
    /// The monthly amount.
    pub amount: Decimal,
    /// The first date the allowance applies.
    pub effective_date: NaiveDate,
}

impl RiceAllowance {
    /// Creates a rice allowance with the default amount.
    pub fn new(employee_id: u32, effective_date: NaiveDate) -> EngineResult<Self> {
        Self::with_amount(employee_id, DEFAULT_RICE_AMOUNT, effective_date)
    }

    /// Creates a rice allowance with an explicit amount.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] for a zero employee id or a
    /// negative amount.
    pub fn with_amount(
        employee_id: u32,
        amount: Decimal,
        effective_date: NaiveDate,
    ) -> EngineResult<Self> {
        validate_allowance(AllowanceType::Rice, employee_id, amount)?;
        Ok(Self {
            employee_id,
            amount,
            effective_date,
        })
    }
}

impl AllowanceRule for RiceAllowance {
    fn allowance_type(&self) -> AllowanceType {
        AllowanceType::Rice
    }

    fn is_eligible(&self, status: EmploymentStatus) -> bool {
        matches!(
            status,
            EmploymentStatus::Regular | EmploymentStatus::Probationary
        )
    }

    fn calculated_amount(&self) -> Decimal {
        self.amount
    }

    fn is_taxable(&self) -> bool {
        false
    }

    fn for_employee(&self, employee: &EmployeeProfile) -> Option<Allowance> {
        if !self.is_eligible(employee.status) {
            return None;
        }
        Some(Allowance::Rice(Self {
            employee_id: employee.id,
            ..self.clone()
        }))
    }
}

/// Which phone allowance policy an allowance was granted under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneTier {
    /// Full allowance for Regular employees.
    #[default]
    Standard,
    /// Fixed reduced allowance for Probationary employees.
    Reduced,
}

/// Monthly phone allowance. Taxable.
///
/// The standard tier is for Regular employees only; the reduced tier is for
/// Probationary employees only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneAllowance {
    /// The employee receiving the allowance.
    pub employee_id: u32,
    /// The monthly amount.
    pub amount: Decimal,
    /// The first date the allowance applies.
    pub effective_date: NaiveDate,
    /// The policy tier.
    #[serde(default)]
    pub tier: PhoneTier,
}

impl PhoneAllowance {
    /// Creates a standard-tier phone allowance.
    pub fn new(employee_id: u32, amount: Decimal, effective_date: NaiveDate) -> EngineResult<Self> {
        Self::with_tier(employee_id, amount, effective_date, PhoneTier::Standard)
    }

    /// Creates a reduced-tier phone allowance.
    pub fn reduced(
        employee_id: u32,
        amount: Decimal,
        effective_date: NaiveDate,
    ) -> EngineResult<Self> {
        Self::with_tier(employee_id, amount, effective_date, PhoneTier::Reduced)
    }

    fn with_tier(
        employee_id: u32,
        amount: Decimal,
        effective_date: NaiveDate,
        tier: PhoneTier,
    ) -> EngineResult<Self> {
        validate_allowance(AllowanceType::Phone, employee_id, amount)?;
        Ok(Self {
            employee_id,
            amount,
            effective_date,
            tier,
        })
    }
}

impl AllowanceRule for PhoneAllowance {
    fn allowance_type(&self) -> AllowanceType {
        AllowanceType::Phone
    }

    fn is_eligible(&self, status: EmploymentStatus) -> bool {
        match self.tier {
            PhoneTier::Standard => status == EmploymentStatus::Regular,
            PhoneTier::Reduced => status == EmploymentStatus::Probationary,
        }
    }

    fn calculated_amount(&self) -> Decimal {
        self.amount
    }

    fn is_taxable(&self) -> bool {
        true
    }

    fn for_employee(&self, employee: &EmployeeProfile) -> Option<Allowance> {
        if !self.is_eligible(employee.status) {
            return None;
        }
        Some(Allowance::Phone(Self {
            employee_id: employee.id,
            ..self.clone()
        }))
    }
}

/// Monthly clothing allowance. Taxable; Regular employees only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingAllowance {
    /// The employee receiving the allowance.
    pub employee_id: u32,
    /// The monthly amount.
    pub amount: Decimal,
    /// The first date the allowance applies.
    pub effective_date: NaiveDate,
}

impl ClothingAllowance {
    /// Creates a clothing allowance with the default amount.
    pub fn new(employee_id: u32, effective_date: NaiveDate) -> EngineResult<Self> {
        Self::with_amount(employee_id, DEFAULT_CLOTHING_AMOUNT, effective_date)
    }

    /// Creates a clothing allowance with an explicit amount.
    pub fn with_amount(
        employee_id: u32,
        amount: Decimal,
        effective_date: NaiveDate,
    ) -> EngineResult<Self> {
        validate_allowance(AllowanceType::Clothing, employee_id, amount)?;
        Ok(Self {
            employee_id,
            amount,
            effective_date,
        })
    }
}

impl AllowanceRule for ClothingAllowance {
    fn allowance_type(&self) -> AllowanceType {
        AllowanceType::Clothing
    }

    fn is_eligible(&self, status: EmploymentStatus) -> bool {
        status == EmploymentStatus::Regular
    }

    fn calculated_amount(&self) -> Decimal {
        self.amount
    }

    fn is_taxable(&self) -> bool {
        true
    }

    fn for_employee(&self, employee: &EmployeeProfile) -> Option<Allowance> {
        if !self.is_eligible(employee.status) {
            return None;
        }
        Some(Allowance::Clothing(Self {
            employee_id: employee.id,
            ..self.clone()
        }))
    }
}

/// An allowance of any kind.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Allowance, AllowanceRule, EmploymentStatus, RiceAllowance};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let rice = Allowance::Rice(RiceAllowance::new(10001, date).unwrap());
///
/// assert_eq!(rice.calculated_amount(), Decimal::new(1500, 0));
/// assert!(!rice.is_taxable());
/// assert!(rice.is_eligible(EmploymentStatus::Probationary));
/// assert!(!rice.is_eligible(EmploymentStatus::Contractual));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Allowance {
    /// Rice subsidy.
    Rice(RiceAllowance),
    /// Phone allowance.
    Phone(PhoneAllowance),
    /// Clothing allowance.
    Clothing(ClothingAllowance),
}

impl Allowance {
    fn rule(&self) -> &dyn AllowanceRule {
        match self {
            Allowance::Rice(a) => a,
            Allowance::Phone(a) => a,
            Allowance::Clothing(a) => a,
        }
    }

    /// The employee receiving the allowance.
    pub fn employee_id(&self) -> u32 {
        match self {
            Allowance::Rice(a) => a.employee_id,
            Allowance::Phone(a) => a.employee_id,
            Allowance::Clothing(a) => a.employee_id,
        }
    }

    /// The first date the allowance applies.
    pub fn effective_date(&self) -> NaiveDate {
        match self {
            Allowance::Rice(a) => a.effective_date,
            Allowance::Phone(a) => a.effective_date,
            Allowance::Clothing(a) => a.effective_date,
        }
    }
}

impl AllowanceRule for Allowance {
    fn allowance_type(&self) -> AllowanceType {
        self.rule().allowance_type()
    }

    fn is_eligible(&self, status: EmploymentStatus) -> bool {
        self.rule().is_eligible(status)
    }

    fn calculated_amount(&self) -> Decimal {
        self.rule().calculated_amount()
    }

    fn is_taxable(&self) -> bool {
        self.rule().is_taxable()
    }

    fn for_employee(&self, employee: &EmployeeProfile) -> Option<Allowance> {
        self.rule().for_employee(employee)
    }
}

impl From<RiceAllowance> for Allowance {
    fn from(value: RiceAllowance) -> Self {
        Allowance::Rice(value)
    }
}

impl From<PhoneAllowance> for Allowance {
    fn from(value: PhoneAllowance) -> Self {
        Allowance::Phone(value)
    }
}

impl From<ClothingAllowance> for Allowance {
    fn from(value: ClothingAllowance) -> Self {
        Allowance::Clothing(value)
    }
}
