//! Wizard configuration.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::autosave::RetryPolicy;

/// Which step layout the wizard uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepFlow {
    /// Twelve fine-grained steps
    Legacy,
    /// Eight steps grouping related details
    #[default]
    Consolidated,
}

impl FromStr for StepFlow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "legacy" => Ok(StepFlow::Legacy),
            "consolidated" => Ok(StepFlow::Consolidated),
            other => Err(format!("unknown step flow '{other}' (expected legacy or consolidated)")),
        }
    }
}

impl fmt::Display for StepFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StepFlow::Legacy => "legacy",
            StepFlow::Consolidated => "consolidated",
        })
    }
}

/// Settings of a wizard session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardConfig {
    pub flow: StepFlow,
    /// Quiet period before an automatic remote save
    pub autosave_interval: Duration,
    /// Quiet period before the local backup is written
    pub backup_interval: Duration,
    pub autosave_enabled: bool,
    /// Retry policy of explicit saves
    pub retry: RetryPolicy,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            flow: StepFlow::default(),
            autosave_interval: Duration::from_millis(5000),
            backup_interval: Duration::from_millis(1000),
            autosave_enabled: true,
            retry: RetryPolicy::default(),
        }
    }
}

impl WizardConfig {
    pub fn with_flow(mut self, flow: StepFlow) -> Self {
        self.flow = flow;
        self
    }

    pub fn with_autosave(mut self, enabled: bool) -> Self {
        self.autosave_enabled = enabled;
        self
    }

    pub fn with_autosave_interval(mut self, interval: Duration) -> Self {
        self.autosave_interval = interval;
        self
    }

    pub fn with_backup_interval(mut self, interval: Duration) -> Self {
        self.backup_interval = interval;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WizardConfig::default();
        assert_eq!(config.autosave_interval, Duration::from_secs(5));
        assert_eq!(config.backup_interval, Duration::from_secs(1));
        assert!(config.autosave_enabled);
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn test_flow_parsing() {
        assert_eq!("Legacy".parse::<StepFlow>().unwrap(), StepFlow::Legacy);
        assert_eq!(" consolidated ".parse::<StepFlow>().unwrap(), StepFlow::Consolidated);
        assert!("short".parse::<StepFlow>().is_err());
    }
}
