//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during a payroll calculation.
//! Every error maps onto a stable [`ErrorKind`] so callers (UI, reports,
//! data-access layers) can react without matching on messages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The broad category of an [`EngineError`].
///
/// # Example
///
/// ```
/// use payroll_engine::error::{EngineError, ErrorKind};
///
/// let error = EngineError::EmployeeNotFound { employee_id: 99999 };
/// assert_eq!(error.kind(), ErrorKind::NotFound);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or out-of-range input.
    Validation,
    /// A referenced entity does not exist.
    NotFound,
    /// An unexpected internal inconsistency.
    Computation,
    /// Missing or invalid configuration.
    Configuration,
    /// A record provider failed.
    DataAccess,
}

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// An input value was missing or out of range.
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// The input field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A record supplied by a provider was malformed.
    #[error("Invalid record '{record}': {message}")]
    InvalidRecord {
        /// A short description identifying the record.
        record: String,
        /// A description of what made the record invalid.
        message: String,
    },

    /// The employee provider has no employee with the requested id.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        employee_id: u32,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A contribution schedule parsed but is internally inconsistent.
    #[error("Invalid contribution schedule: {message}")]
    InvalidSchedule {
        /// A description of the inconsistency.
        message: String,
    },

    /// No contribution schedule is effective on the requested date.
    #[error("No contribution schedule effective on {date}")]
    ScheduleNotFound {
        /// The date for which a schedule was requested.
        date: NaiveDate,
    },

    /// A record provider failed to return data.
    #[error("Provider '{provider}' failed: {message}")]
    Provider {
        /// The provider that failed (e.g. "attendance").
        provider: String,
        /// The failure reported by the provider.
        message: String,
    },
}

impl EngineError {
    /// Creates a [`EngineError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a [`EngineError::InvalidRecord`] error.
    pub fn invalid_record(record: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            record: record.into(),
            message: message.into(),
        }
    }

    /// Returns the stable category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Validation { .. } | EngineError::InvalidRecord { .. } => {
                ErrorKind::Validation
            }
            EngineError::EmployeeNotFound { .. } => ErrorKind::NotFound,
            EngineError::CalculationError { .. } => ErrorKind::Computation,
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidSchedule { .. }
            | EngineError::ScheduleNotFound { .. } => ErrorKind::Configuration,
            EngineError::Provider { .. } => ErrorKind::DataAccess,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
