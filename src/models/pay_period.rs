//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type that defines the inclusive
//! date range a payroll is calculated for.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents a pay period with an inclusive date range.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let pay_period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
/// )
/// .unwrap();
///
/// assert!(pay_period.contains_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()));
/// assert_eq!(pay_period.calendar_days(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a validated pay period.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] if `start_date` is after `end_date`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        let period = Self {
            start_date,
            end_date,
        };
        period.validate()?;
        Ok(period)
    }

    /// Creates a pay period from bounds that may be missing.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] if either bound is absent or the
    /// range is inverted.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let end = NaiveDate::from_ymd_opt(2024, 6, 30);
    /// assert!(PayPeriod::from_bounds(None, end).is_err());
    /// ```
    pub fn from_bounds(
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> EngineResult<Self> {
        let start_date =
            start_date.ok_or_else(|| EngineError::validation("period_start", "is required"))?;
        let end_date =
            end_date.ok_or_else(|| EngineError::validation("period_end", "is required"))?;
        Self::new(start_date, end_date)
    }

    /// Checks that the range is not inverted.
    pub fn validate(&self) -> EngineResult<()> {
        if self.start_date > self.end_date {
            return Err(EngineError::validation(
                "period_start",
                format!("{} is after period end {}", self.start_date, self.end_date),
            ));
        }
        Ok(())
    }

    /// Checks if a given date falls within this pay period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns the number of calendar days in the period, inclusive.
    pub fn calendar_days(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        u32::try_from(days.max(0)).unwrap_or(u32::MAX)
    }

    /// Returns the number of days of `[start, end]` that fall inside this period.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let period = PayPeriod::new(
    ///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
    /// )
    /// .unwrap();
    ///
    /// let overlap = period.overlap_days(
    ///     NaiveDate::from_ymd_opt(2024, 5, 30).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
    /// );
    /// assert_eq!(overlap, 2);
    /// ```
    pub fn overlap_days(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        let from = start.max(self.start_date);
        let to = end.min(self.end_date);
        if from > to {
            return 0;
        }
        u32::try_from((to - from).num_days() + 1).unwrap_or(0)
    }

    /// Iterates over every date in the period.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end_date = self.end_date;
        self.start_date
            .iter_days()
            .take_while(move |d| *d <= end_date)
    }
}
