//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the pay policy
//! and contribution schedules from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{ContributionSchedule, EngineConfig, PolicyConfig};

const BUILTIN_POLICY: &str = include_str!("../../config/ph/policy.yaml");
const BUILTIN_SCHEDULES: &[(&str, &str)] = &[(
    "config/ph/schedules/2024-01-01.yaml",
    include_str!("../../config/ph/schedules/2024-01-01.yaml"),
)];

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/ph/
/// ├── policy.yaml            # Shift, pay and allowance policy
/// └── schedules/
///     └── 2024-01-01.yaml    # Contribution tables effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/ph")?;
/// let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let schedule = loader.schedule_for(date)?;
/// println!("Schedule effective from {}", schedule.effective_date);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `policy.yaml` or the `schedules` directory is missing
    /// - Any file contains invalid YAML
    /// - The policy or any schedule fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<PolicyConfig>(&path.join("policy.yaml"))?;
        let schedules = Self::load_schedules(&path.join("schedules"))?;

        Ok(Self {
            config: EngineConfig::new(policy, schedules)?,
        })
    }

    /// Parses the Philippine policy and schedules compiled into the crate.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::builtin().unwrap();
    /// assert_eq!(loader.config().policy().pay.standard_working_days, 22);
    /// ```
    pub fn builtin() -> EngineResult<Self> {
        let policy = Self::parse_yaml::<PolicyConfig>("config/ph/policy.yaml", BUILTIN_POLICY)?;
        let schedules = BUILTIN_SCHEDULES
            .iter()
            .map(|(name, content)| Self::parse_yaml::<ContributionSchedule>(name, content))
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(Self {
            config: EngineConfig::new(policy, schedules)?,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse_yaml(&path_str, &content)
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(path: &str, content: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Loads all schedule files from the schedules directory.
    fn load_schedules(schedules_dir: &Path) -> EngineResult<Vec<ContributionSchedule>> {
        let schedules_dir_str = schedules_dir.display().to_string();

        if !schedules_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: schedules_dir_str,
            });
        }

        let entries = fs::read_dir(schedules_dir).map_err(|_| EngineError::ConfigNotFound {
            path: schedules_dir_str.clone(),
        })?;

        let mut schedules = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: schedules_dir_str.clone(),
            })?;

            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                let schedule = Self::load_yaml::<ContributionSchedule>(&path)?;
                debug!(
                    path = %path.display(),
                    effective_date = %schedule.effective_date,
                    "loaded contribution schedule"
                );
                schedules.push(schedule);
            }
        }

        if schedules.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no schedule files found)", schedules_dir_str),
            });
        }

        Ok(schedules)
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }

    /// Returns the policy configuration.
    pub fn policy(&self) -> &PolicyConfig {
        self.config.policy()
    }

    /// Returns the schedule effective on `date`.
    pub fn schedule_for(&self, date: NaiveDate) -> EngineResult<&ContributionSchedule> {
        self.config.schedule_for(date)
    }
}
