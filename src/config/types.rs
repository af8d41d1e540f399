//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files: the pay policy and the
//! versioned contribution schedules.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

/// Shift thresholds used to classify attendance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShiftPolicy {
    /// Log-ins after this time are late.
    pub shift_start: NaiveTime,
    /// Log-outs before this time are undertime.
    pub shift_end: NaiveTime,
    /// Work hours needed for a full day.
    pub full_day_hours: Decimal,
}

impl Default for ShiftPolicy {
    fn default() -> Self {
        Self {
            shift_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
            shift_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
            full_day_hours: Decimal::from_parts(80, 0, 0, false, 1),
        }
    }
}

/// Salary proration and overtime parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PayPolicy {
    /// Working days in a standard month.
    pub standard_working_days: u32,
    /// Working hours in a standard day.
    pub hours_per_day: Decimal,
    /// Overtime rate as a multiple of the hourly rate.
    pub overtime_multiplier: Decimal,
}

impl PayPolicy {
    /// Working hours in a standard month.
    pub fn standard_monthly_hours(&self) -> Decimal {
        Decimal::from(self.standard_working_days) * self.hours_per_day
    }
}

impl Default for PayPolicy {
    fn default() -> Self {
        Self {
            standard_working_days: 22,
            hours_per_day: Decimal::from_parts(8, 0, 0, false, 0),
            overtime_multiplier: Decimal::from_parts(125, 0, 0, false, 2),
        }
    }
}

/// Default allowance amounts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AllowancePolicy {
    /// Rice subsidy when the employee has no override.
    pub default_rice: Decimal,
    /// Clothing allowance when the employee has no override.
    pub default_clothing: Decimal,
    /// Fixed phone allowance for probationary employees.
    pub probationary_phone: Decimal,
}

impl Default for AllowancePolicy {
    fn default() -> Self {
        Self {
            default_rice: Decimal::from_parts(1500, 0, 0, false, 0),
            default_clothing: Decimal::from_parts(1000, 0, 0, false, 0),
            probationary_phone: Decimal::from_parts(500, 0, 0, false, 0),
        }
    }
}

/// Policy configuration from policy.yaml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Shift thresholds.
    pub shift: ShiftPolicy,
    /// Pay parameters.
    pub pay: PayPolicy,
    /// Allowance defaults.
    pub allowances: AllowancePolicy,
}

impl PolicyConfig {
    /// Rejects policy values no calculation can use.
    pub fn validate(&self) -> EngineResult<()> {
        if self.shift.shift_end <= self.shift.shift_start {
            return Err(EngineError::validation(
                "shift.shift_end",
                "must be later than shift.shift_start",
            ));
        }
        if self.pay.standard_working_days == 0 {
            return Err(EngineError::validation(
                "pay.standard_working_days",
                "must be positive",
            ));
        }
        if self.pay.hours_per_day <= Decimal::ZERO {
            return Err(EngineError::validation("pay.hours_per_day", "must be positive"));
        }
        if self.pay.overtime_multiplier < Decimal::ONE {
            return Err(EngineError::validation(
                "pay.overtime_multiplier",
                "must be at least 1",
            ));
        }
        let allowances = [
            ("allowances.default_rice", self.allowances.default_rice),
            ("allowances.default_clothing", self.allowances.default_clothing),
            ("allowances.probationary_phone", self.allowances.probationary_phone),
        ];
        for (field, amount) in allowances {
            if amount < Decimal::ZERO {
                return Err(EngineError::validation(field, "must not be negative"));
            }
        }
        Ok(())
    }
}

/// One row of a contribution bracket table.
///
/// Applies to incomes in `[lower, upper)`; `upper` is absent only on the last
/// row. Exactly one of `amount` (fixed) or `rate` (share of income) is set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContributionBracket {
    /// Inclusive lower bound.
    pub lower: Decimal,
    /// Exclusive upper bound, absent for the open-ended last bracket.
    #[serde(default)]
    pub upper: Option<Decimal>,
    /// Fixed contribution.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Contribution as a share of income.
    #[serde(default)]
    pub rate: Option<Decimal>,
}

impl ContributionBracket {
    /// Returns true if `income` falls in this bracket.
    pub fn contains(&self, income: Decimal) -> bool {
        income >= self.lower && self.upper.is_none_or(|upper| income < upper)
    }

    /// The contribution owed on `income`.
    pub fn contribution(&self, income: Decimal) -> Decimal {
        match (self.amount, self.rate) {
            (Some(amount), _) => amount,
            (None, Some(rate)) => income * rate,
            (None, None) => Decimal::ZERO,
        }
    }
}

/// An ordered bracket table for one contribution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct BracketTable {
    /// The brackets, ordered by lower bound.
    pub brackets: Vec<ContributionBracket>,
}

impl BracketTable {
    /// Returns the bracket containing `income`.
    pub fn bracket_for(&self, income: Decimal) -> Option<&ContributionBracket> {
        self.brackets.iter().find(|b| b.contains(income))
    }

    /// Checks ordering, contiguity and amount/rate exclusivity.
    pub fn validate(&self, name: &str) -> EngineResult<()> {
        validate_ranges(name, self.brackets.iter().map(|b| (b.lower, b.upper)))?;
        for (index, bracket) in self.brackets.iter().enumerate() {
            match (bracket.amount, bracket.rate) {
                (Some(amount), None) if amount >= Decimal::ZERO => {}
                (None, Some(rate)) if rate >= Decimal::ZERO && rate <= Decimal::ONE => {}
                _ => {
                    return Err(EngineError::InvalidSchedule {
                        message: format!(
                            "{} bracket {} must have exactly one of a non-negative amount or a rate between 0 and 1",
                            name, index
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

/// One row of the withholding tax table.
///
/// Tax on taxable income `t` in `[lower, upper)` is `base + (t - lower) * rate`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxBracket {
    /// Inclusive lower bound.
    pub lower: Decimal,
    /// Exclusive upper bound, absent for the open-ended last bracket.
    #[serde(default)]
    pub upper: Option<Decimal>,
    /// Tax owed at the lower bound.
    pub base: Decimal,
    /// Marginal rate above the lower bound.
    pub rate: Decimal,
}

impl TaxBracket {
    /// Returns true if `income` falls in this bracket.
    pub fn contains(&self, income: Decimal) -> bool {
        income >= self.lower && self.upper.is_none_or(|upper| income < upper)
    }

    /// The tax owed on `income`.
    pub fn tax(&self, income: Decimal) -> Decimal {
        self.base + (income - self.lower) * self.rate
    }
}

/// The withholding tax table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TaxTable {
    /// The brackets, ordered by lower bound.
    pub brackets: Vec<TaxBracket>,
}

impl TaxTable {
    /// Returns the bracket containing `income`.
    pub fn bracket_for(&self, income: Decimal) -> Option<&TaxBracket> {
        self.brackets.iter().find(|b| b.contains(income))
    }

    /// Checks ordering, contiguity and value ranges.
    pub fn validate(&self) -> EngineResult<()> {
        validate_ranges(
            "withholding_tax",
            self.brackets.iter().map(|b| (b.lower, b.upper)),
        )?;
        for (index, bracket) in self.brackets.iter().enumerate() {
            if bracket.base < Decimal::ZERO
                || bracket.rate < Decimal::ZERO
                || bracket.rate > Decimal::ONE
            {
                return Err(EngineError::InvalidSchedule {
                    message: format!(
                        "withholding_tax bracket {} needs a non-negative base and a rate between 0 and 1",
                        index
                    ),
                });
            }
        }
        Ok(())
    }
}

fn validate_ranges(
    name: &str,
    ranges: impl ExactSizeIterator<Item = (Decimal, Option<Decimal>)>,
) -> EngineResult<()> {
    let invalid = |message: String| EngineError::InvalidSchedule {
        message: format!("{}: {}", name, message),
    };

    let count = ranges.len();
    if count == 0 {
        return Err(invalid("table has no brackets".to_string()));
    }

    let mut expected_lower = Decimal::ZERO;
    for (index, (lower, upper)) in ranges.enumerate() {
        if lower != expected_lower {
            return Err(invalid(format!(
                "bracket {} starts at {} but {} was expected",
                index, lower, expected_lower
            )));
        }
        match upper {
            Some(upper) if upper <= lower => {
                return Err(invalid(format!(
                    "bracket {} upper bound {} is not above its lower bound {}",
                    index, upper, lower
                )));
            }
            Some(upper) if index + 1 == count => {
                return Err(invalid(format!(
                    "last bracket is capped at {} but must be open-ended",
                    upper
                )));
            }
            Some(upper) => expected_lower = upper,
            None if index + 1 == count => {}
            None => {
                return Err(invalid(format!(
                    "bracket {} is open-ended but is not the last bracket",
                    index
                )));
            }
        }
    }

    Ok(())
}

/// Contribution tables effective from a given date.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContributionSchedule {
    /// The first date this schedule applies.
    pub effective_date: NaiveDate,
    /// Social Security System table.
    pub sss: BracketTable,
    /// PhilHealth premium table.
    pub philhealth: BracketTable,
    /// Pag-IBIG fund table.
    pub pagibig: BracketTable,
    /// Withholding tax table.
    pub withholding_tax: TaxTable,
}

impl ContributionSchedule {
    /// Validates all four tables.
    pub fn validate(&self) -> EngineResult<()> {
        self.sss.validate("sss")?;
        self.philhealth.validate("philhealth")?;
        self.pagibig.validate("pagibig")?;
        self.withholding_tax.validate()
    }
}

/// The complete engine configuration.
///
/// Schedules are kept sorted oldest first.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    policy: PolicyConfig,
    schedules: Vec<ContributionSchedule>,
}

impl EngineConfig {
    /// Creates a configuration, validating the policy and every schedule.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] for an unusable policy and
    /// [`EngineError::InvalidSchedule`] for an inconsistent or duplicated
    /// schedule.
    pub fn new(policy: PolicyConfig, schedules: Vec<ContributionSchedule>) -> EngineResult<Self> {
        policy.validate()?;

        let mut sorted = schedules;
        sorted.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        for schedule in &sorted {
            schedule.validate()?;
        }
        if let Some(pair) = sorted
            .windows(2)
            .find(|pair| pair[0].effective_date == pair[1].effective_date)
        {
            return Err(EngineError::InvalidSchedule {
                message: format!(
                    "more than one schedule effective from {}",
                    pair[0].effective_date
                ),
            });
        }

        Ok(Self {
            policy,
            schedules: sorted,
        })
    }

    /// Returns the policy configuration.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Returns all schedules, oldest first.
    pub fn schedules(&self) -> &[ContributionSchedule] {
        &self.schedules
    }

    /// Returns the most recent schedule effective on or before `date`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ScheduleNotFound`] if every schedule starts
    /// after `date`.
    pub fn schedule_for(&self, date: NaiveDate) -> EngineResult<&ContributionSchedule> {
        let schedule = self
            .schedules
            .iter()
            .rev()
            .find(|s| s.effective_date <= date)
            .ok_or(EngineError::ScheduleNotFound { date })?;
        debug!(
            %date,
            effective_date = %schedule.effective_date,
            "selected contribution schedule"
        );
        Ok(schedule)
    }
}
