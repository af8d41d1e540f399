//! Configuration loading and management for the payroll engine.
//!
//! This module loads the pay policy (shift thresholds, proration and
//! overtime parameters, allowance defaults) and the versioned government
//! contribution schedules from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/ph").unwrap();
//! println!("Working days: {}", config.policy().pay.standard_working_days);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AllowancePolicy, BracketTable, ContributionBracket, ContributionSchedule, EngineConfig,
    PayPolicy, PolicyConfig, ShiftPolicy, TaxBracket, TaxTable,
};
