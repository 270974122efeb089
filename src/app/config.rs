//! Runtime configuration.
//!
//! There is no configuration file. Defaults reproduce the classic behaviour and
//! a couple of environment variables can override them for troubleshooting.

use super::error::ConfigError;
use std::time::Duration;
use tracing::warn;

pub const APP_NAME: &str = "VirtualDesktopIndicator";

/// Default poll interval: the tick rate of a stock UI timer.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub const ENV_POLL_INTERVAL: &str = "VDI_POLL_INTERVAL_MS";
pub const ENV_ON_FAILURE: &str = "VDI_ON_FAILURE";

/// What the host does when a tick fails to query the desktop or install the icon.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum FailurePolicy {
    /// Tear everything down and start a fresh copy of the executable.
    Restart,
    /// Log the failure and try again on the next tick.
    Continue,
}

impl FailurePolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "restart" => Some(FailurePolicy::Restart),
            "continue" => Some(FailurePolicy::Continue),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Name of the autorun registry value and of the single-instance mutex.
    pub app_name: String,
    pub poll_interval: Duration,
    pub on_failure: FailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app_name: APP_NAME.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            on_failure: FailurePolicy::Restart,
        }
    }
}

impl Config {
    /// Defaults overlaid with the process environment. Bad values are logged and ignored.
    pub fn from_env() -> Self {
        let (config, errors) = Self::from_lookup(|key| std::env::var(key).ok());
        for e in errors {
            warn!("ignoring configuration override: {e}");
        }
        config
    }

    /// Builds a config from an arbitrary key lookup, returning the rejected overrides.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let mut errors = Vec::new();

        if let Some(value) = lookup(ENV_POLL_INTERVAL) {
            match value.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.poll_interval = Duration::from_millis(ms),
                _ => errors.push(ConfigError::Interval {
                    key: ENV_POLL_INTERVAL,
                    value,
                }),
            }
        }

        if let Some(value) = lookup(ENV_ON_FAILURE) {
            match FailurePolicy::parse(&value) {
                Some(policy) => config.on_failure = policy,
                None => errors.push(ConfigError::FailurePolicy {
                    key: ENV_ON_FAILURE,
                    value,
                }),
            }
        }

        (config, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let (config, errors) = Config::from_lookup(lookup(&[]));
        assert!(errors.is_empty());
        assert_eq!(config, Config::default());
        assert_eq!(config.app_name, "VirtualDesktopIndicator");
        assert_eq!(config.poll_interval, Duration::from_millis(100));
        assert_eq!(config.on_failure, FailurePolicy::Restart);
    }

    #[test]
    fn overrides_are_applied() {
        let (config, errors) = Config::from_lookup(lookup(&[
            (ENV_POLL_INTERVAL, " 250 "),
            (ENV_ON_FAILURE, "Continue"),
        ]));
        assert!(errors.is_empty());
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.on_failure, FailurePolicy::Continue);
    }

    #[test]
    fn invalid_overrides_keep_defaults() {
        let (config, errors) = Config::from_lookup(lookup(&[
            (ENV_POLL_INTERVAL, "0"),
            (ENV_ON_FAILURE, "explode"),
        ]));
        assert_eq!(config, Config::default());
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ConfigError::Interval { .. }));
        assert!(matches!(errors[1], ConfigError::FailurePolicy { .. }));
    }

    #[test]
    fn non_numeric_interval_is_rejected() {
        let (config, errors) = Config::from_lookup(lookup(&[(ENV_POLL_INTERVAL, "fast")]));
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
        assert_eq!(
            errors,
            vec![ConfigError::Interval {
                key: ENV_POLL_INTERVAL,
                value: "fast".to_string()
            }]
        );
    }
}
