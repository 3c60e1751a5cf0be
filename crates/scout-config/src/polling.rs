//! Job polling cadence.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Longest accepted poll interval (one hour).
const MAX_INTERVAL_SECS: u64 = 60 * 60;

const fn default_interval_secs() -> u64 {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollingConfig {
    /// Seconds between status polls of a running research job.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl PollingConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_secs == 0 {
            return Err(ConfigError::invalid(
                "polling.interval_secs",
                "must be at least 1",
            ));
        }
        if self.interval_secs > MAX_INTERVAL_SECS {
            return Err(ConfigError::invalid(
                "polling.interval_secs",
                format!("must be at most {MAX_INTERVAL_SECS}"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_interval_is_five_seconds() {
        assert_eq!(PollingConfig::default().interval(), Duration::from_secs(5));
    }

    #[test]
    fn zero_interval_is_invalid() {
        let config = PollingConfig { interval_secs: 0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn interval_is_capped_at_one_hour() {
        let at_cap = PollingConfig {
            interval_secs: MAX_INTERVAL_SECS,
        };
        assert!(at_cap.validate().is_ok());

        for interval_secs in [MAX_INTERVAL_SECS + 1, u64::MAX] {
            let config = PollingConfig { interval_secs };
            assert!(config.validate().is_err(), "{interval_secs}");
        }
    }
}
