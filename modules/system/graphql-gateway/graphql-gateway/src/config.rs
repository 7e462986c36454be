//! Configuration for the GraphQL gateway module.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration error for the gateway.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid graphql-gateway config: {0}")]
    InvalidConfig(#[source] serde_json::Error),
    #[error("poll_interval must be greater than zero")]
    ZeroPollInterval,
    #[error("poll_interval ({poll_interval:?}) must not exceed wait_timeout ({wait_timeout:?})")]
    PollIntervalExceedsTimeout {
        poll_interval: Duration,
        wait_timeout: Duration,
    },
}

/// GraphQL gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphqlGatewayConfig {
    /// Identities whose lifecycle events are ignored.
    pub blacklist: Vec<String>,

    /// Identities that must be registered and built before `start` succeeds.
    pub required_services: Vec<String>,

    /// Composite schema snapshot written after every successful composition.
    pub snapshot: SnapshotConfig,

    /// Deadline for the startup convergence wait.
    #[serde(with = "crate::humantime_serde")]
    pub wait_timeout: Duration,

    /// Interval between convergence checks during startup.
    #[serde(with = "crate::humantime_serde")]
    pub poll_interval: Duration,
}

/// Snapshot file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnapshotConfig {
    pub enabled: bool,
    pub path: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("graphql-schema.snapshot.graphql"),
        }
    }
}

fn default_wait_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_poll_interval() -> Duration {
    Duration::from_millis(100)
}

impl Default for GraphqlGatewayConfig {
    fn default() -> Self {
        Self {
            blacklist: Vec::new(),
            required_services: Vec::new(),
            snapshot: SnapshotConfig::default(),
            wait_timeout: default_wait_timeout(),
            poll_interval: default_poll_interval(),
        }
    }
}

impl GraphqlGatewayConfig {
    /// Loads the config from a module section of the form `{ "config": { ... } }`.
    ///
    /// A missing section, a non-object section or a section without `config`
    /// yields the defaults.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidConfig` if the `config` object cannot be
    /// deserialized, or a validation error from [`Self::validate`].
    pub fn from_module_section(section: Option<&serde_json::Value>) -> Result<Self, ConfigError> {
        let Some(config_section) = section
            .and_then(serde_json::Value::as_object)
            .and_then(|obj| obj.get("config"))
        else {
            return Ok(Self::default());
        };

        let cfg: Self =
            serde_json::from_value(config_section.clone()).map_err(ConfigError::InvalidConfig)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    /// Returns an error for a zero poll interval or one longer than the wait timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.poll_interval > self.wait_timeout {
            return Err(ConfigError::PollIntervalExceedsTimeout {
                poll_interval: self.poll_interval,
                wait_timeout: self.wait_timeout,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn is_blacklisted(&self, identity: &str) -> bool {
        self.blacklist.iter().any(|name| name == identity)
    }
}
