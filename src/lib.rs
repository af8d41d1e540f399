//! Payroll Calculation Engine
//!
//! This crate calculates monthly payroll for salaried employees: attendance
//! aggregation, prorated basic salary, overtime, status-based allowances,
//! and government contributions (SSS, PhilHealth, Pag-IBIG) with
//! withholding tax. Every calculation carries an audit trace of the steps
//! that produced it.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod provider;
