//! Scheduler configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default round robin time quantum.
pub const DEFAULT_TIME_QUANTUM: i64 = 2;

/// Default aging threshold for priority round robin.
pub const DEFAULT_AGING_FACTOR: i64 = 10;

/// Options recognized by the scheduling algorithms.
///
/// Algorithms ignore options they do not use: only the round robin variants
/// read `time_quantum`, and only priority round robin reads `aging_factor`.
///
/// # Example
/// ```
/// use u_cpusched::scheduler::SchedulerConfig;
///
/// let config = SchedulerConfig::default().with_time_quantum(4);
/// assert_eq!(config.time_quantum, 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Maximum slice granted per dispatch (> 0).
    pub time_quantum: i64,
    /// Wait (ticks since last run) that triggers a priority boost (> 0).
    pub aging_factor: i64,
}

impl SchedulerConfig {
    /// Sets the time quantum.
    pub fn with_time_quantum(mut self, time_quantum: i64) -> Self {
        self.time_quantum = time_quantum;
        self
    }

    /// Sets the aging factor.
    pub fn with_aging_factor(mut self, aging_factor: i64) -> Self {
        self.aging_factor = aging_factor;
        self
    }

    /// Checks the quantum.
    pub fn validate_time_quantum(&self) -> Result<i64, ConfigError> {
        if self.time_quantum <= 0 {
            return Err(ConfigError::InvalidTimeQuantum(self.time_quantum));
        }
        Ok(self.time_quantum)
    }

    /// Checks the aging factor.
    pub fn validate_aging_factor(&self) -> Result<i64, ConfigError> {
        if self.aging_factor <= 0 {
            return Err(ConfigError::InvalidAgingFactor(self.aging_factor));
        }
        Ok(self.aging_factor)
    }

    /// Checks every option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_time_quantum()?;
        self.validate_aging_factor()?;
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            time_quantum: DEFAULT_TIME_QUANTUM,
            aging_factor: DEFAULT_AGING_FACTOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SchedulerConfig::default();
        assert_eq!(c.time_quantum, 2);
        assert_eq!(c.aging_factor, 10);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_invalid_values() {
        let c = SchedulerConfig::default().with_time_quantum(0);
        assert_eq!(c.validate(), Err(ConfigError::InvalidTimeQuantum(0)));

        let c = SchedulerConfig::default().with_aging_factor(-2);
        assert_eq!(c.validate(), Err(ConfigError::InvalidAgingFactor(-2)));
        assert_eq!(c.validate_time_quantum(), Ok(2));
    }

    #[test]
    fn test_partial_json() {
        let c: SchedulerConfig = serde_json::from_str(r#"{"time_quantum": 5}"#).unwrap();
        assert_eq!(c.time_quantum, 5);
        assert_eq!(c.aging_factor, DEFAULT_AGING_FACTOR);

        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"time_quantum":5,"aging_factor":10}"#);
    }
}
