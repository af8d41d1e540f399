//! Overtime record model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Hours worked beyond the regular shift on a given day.
///
/// Only approved records are paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRecord {
    /// The employee the record belongs to.
    pub employee_id: u32,
    /// The day the overtime was worked.
    pub date: NaiveDate,
    /// Hours worked beyond the shift.
    pub hours: Decimal,
    /// Whether a supervisor approved the overtime.
    #[serde(default)]
    pub approved: bool,
}

impl OvertimeRecord {
    /// Short label identifying the record in errors and audit output.
    pub fn describe(&self) -> String {
        format!("overtime {} {}", self.employee_id, self.date)
    }

    /// Checks the record invariants.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRecord`] for a zero employee id or
    /// negative hours.
    pub fn validate(&self) -> EngineResult<()> {
        if self.employee_id == 0 {
            return Err(EngineError::invalid_record(
                self.describe(),
                "employee id must be positive",
            ));
        }
        if self.hours < Decimal::ZERO {
            return Err(EngineError::invalid_record(
                self.describe(),
                format!("hours must not be negative, got {}", self.hours),
            ));
        }
        Ok(())
    }
}
