//! Employee profile and related types.
//!
//! This module defines the [`EmployeeProfile`] struct and [`EmploymentStatus`]
//! enum for representing the workers a payroll is calculated for.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents the employment status of an employee.
///
/// Status drives allowance eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Permanent employee, eligible for every allowance.
    Regular,
    /// Employee still in the probation period.
    Probationary,
    /// Fixed-term contractor.
    Contractual,
    /// No longer employed.
    Terminated,
}

impl EmploymentStatus {
    /// Returns the display label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            EmploymentStatus::Regular => "Regular",
            EmploymentStatus::Probationary => "Probationary",
            EmploymentStatus::Contractual => "Contractual",
            EmploymentStatus::Terminated => "Terminated",
        }
    }
}

/// Fixed allowance amounts configured for an employee.
///
/// `None` means the employee has no override and the policy default applies
/// (or, for the phone allowance, that no phone allowance is configured).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceEntitlements {
    /// Monthly rice subsidy.
    #[serde(default)]
    pub rice: Option<Decimal>,
    /// Monthly phone allowance.
    #[serde(default)]
    pub phone: Option<Decimal>,
    /// Monthly clothing allowance.
    #[serde(default)]
    pub clothing: Option<Decimal>,
}

/// Represents an employee whose pay is calculated by the engine.
///
/// Profiles are owned by the caller and are never mutated during a
/// calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Unique identifier for the employee (must be positive).
    pub id: u32,
    /// The employee's full name.
    pub name: String,
    /// The employee's employment status.
    pub status: EmploymentStatus,
    /// Basic monthly salary.
    pub basic_salary: Decimal,
    /// Fixed allowance entitlements.
    #[serde(default)]
    pub entitlements: AllowanceEntitlements,
    /// Whether the employee may receive a performance bonus.
    #[serde(default)]
    pub bonus_eligible: bool,
}

impl EmployeeProfile {
    /// Returns true if the employee is a regular employee.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{EmployeeProfile, EmploymentStatus};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = EmployeeProfile {
    ///     id: 10001,
    ///     name: "John Doe".to_string(),
    ///     status: EmploymentStatus::Regular,
    ///     basic_salary: Decimal::new(50000, 0),
    ///     entitlements: Default::default(),
    ///     bonus_eligible: true,
    /// };
    /// assert!(employee.is_regular());
    /// ```
    pub fn is_regular(&self) -> bool {
        self.status == EmploymentStatus::Regular
    }

    /// Checks the profile for values the engine cannot calculate with.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] if the id is zero, or the salary
    /// or any entitlement is negative.
    pub fn validate(&self) -> EngineResult<()> {
        if self.id == 0 {
            return Err(EngineError::validation("employee_id", "must be positive"));
        }
        if self.basic_salary < Decimal::ZERO {
            return Err(EngineError::validation(
                "basic_salary",
                format!("must not be negative, got {}", self.basic_salary),
            ));
        }

        let entitlements = [
            ("entitlements.rice", self.entitlements.rice),
            ("entitlements.phone", self.entitlements.phone),
            ("entitlements.clothing", self.entitlements.clothing),
        ];
        for (field, amount) in entitlements {
            if let Some(amount) = amount {
                if amount < Decimal::ZERO {
                    return Err(EngineError::validation(
                        field,
                        format!("must not be negative, got {}", amount),
                    ));
                }
            }
        }

        Ok(())
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

    fn create_test_employee(status: EmploymentStatus) -> EmployeeProfile {
        EmployeeProfile {
            id: 10001,
            name: "John Doe".to_string(),
            status,
            basic_salary: dec("50000"),
            entitlements: AllowanceEntitlements {
                rice: Some(dec("1500")),
                phone: Some(dec("1000")),
                clothing: Some(dec("800")),
            },
            bonus_eligible: true,
        }
    }

    #[test]
    fn test_deserialize_regular_employee() {
        let json = r#"{
            "id": 10001,
            "name": "John Doe",
            "status": "regular",
            "basic_salary": "50000.00",
            "entitlements": {
                "rice": "1500",
                "phone": "1000",
                "clothing": "800"
            },
            "bonus_eligible": true
        }"#;

        let employee: EmployeeProfile = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, 10001);
        assert_eq!(employee.status, EmploymentStatus::Regular);
        assert_eq!(employee.basic_salary, dec("50000.00"));
        assert_eq!(employee.entitlements.phone, Some(dec("1000")));
        assert!(employee.bonus_eligible);
    }

    #[test]
    fn test_deserialize_employee_without_entitlements() {
        let json = r#"{
            "id": 10002,
            "name": "Jane Roe",
            "status": "probationary",
            "basic_salary": "30000"
        }"#;

        let employee: EmployeeProfile = serde_json::from_str(json).unwrap();
        assert_eq!(employee.status, EmploymentStatus::Probationary);
        assert_eq!(employee.entitlements, AllowanceEntitlements::default());
        assert!(!employee.bonus_eligible);
    }

    #[test]
    fn test_employment_status_serialization() {
        assert_eq!(
            serde_json::to_string(&EmploymentStatus::Regular).unwrap(),
            "\"regular\""
        );
        assert_eq!(
            serde_json::to_string(&EmploymentStatus::Contractual).unwrap(),
            "\"contractual\""
        );
        assert_eq!(EmploymentStatus::Terminated.label(), "Terminated");
    }

    #[test]
    fn test_is_regular() {
        assert!(create_test_employee(EmploymentStatus::Regular).is_regular());
        assert!(!create_test_employee(EmploymentStatus::Probationary).is_regular());
    }

    #[test]
    fn test_validate_accepts_valid_profile() {
        assert!(create_test_employee(EmploymentStatus::Regular).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_id() {
        let mut employee = create_test_employee(EmploymentStatus::Regular);
        employee.id = 0;
        let err = employee.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("employee_id"));
    }

    #[test]
    fn test_validate_rejects_negative_salary() {
        let mut employee = create_test_employee(EmploymentStatus::Regular);
        employee.basic_salary = dec("-1");
        match employee.validate() {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "basic_salary"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_negative_entitlement() {
        let mut employee = create_test_employee(EmploymentStatus::Regular);
        employee.entitlements.clothing = Some(dec("-100"));
        match employee.validate() {
            Err(EngineError::Validation { field, .. }) => {
                assert_eq!(field, "entitlements.clothing")
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}
