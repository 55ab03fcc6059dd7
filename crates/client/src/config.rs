//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use hunter_core::AgentConfig;
use runtime::RuntimeConfig;
use thiserror::Error;

pub const USAGE: &str = "Usage: hunter <host> <port> [<name>] [<password>]";

/// Where the agent would connect, from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectTarget {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub password: Option<String>,
}

impl ConnectTarget {
    pub const DEFAULT_NAME: &'static str = "hunter";

    /// Parses the arguments after the program name.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, UsageError> {
        if !(2..=4).contains(&args.len()) {
            return Err(UsageError::ArgumentCount(args.len()));
        }
        let arg = |i: usize| args.get(i).map(|s| s.as_ref().to_string());

        let port = args[1]
            .as_ref()
            .parse()
            .map_err(|_| UsageError::InvalidPort(args[1].as_ref().to_string()))?;

        Ok(Self {
            host: args[0].as_ref().to_string(),
            port,
            name: arg(2).unwrap_or_else(|| Self::DEFAULT_NAME.to_string()),
            password: arg(3),
        })
    }
}

/// Bad command line. Printed with [`USAGE`] and exit code 1.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("expected 2 to 4 arguments, got {0}")]
    ArgumentCount(usize),

    #[error("invalid port: {0}")]
    InvalidPort(String),
}

/// Settings read from the process environment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientConfig {
    /// TOML file with [`AgentConfig`] overrides.
    pub config_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub tick_interval: Option<Duration>,
    pub deposit_interval: Option<Duration>,
    pub restock_interval: Option<Duration>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `HUNTER_CONFIG` - Agent config TOML (default: built-in defaults)
    /// - `HUNTER_DATA_DIR` - Guard anchor storage (default: platform-specific)
    /// - `HUNTER_LOG_DIR` - Log directory (default: platform-specific)
    /// - `HUNTER_TICK_MS` - Decision tick period (default: 50)
    /// - `HUNTER_DEPOSIT_SECS` - Auto-deposit period, 0 disables (default: 500)
    /// - `HUNTER_RESTOCK_SECS` - Auto-restock period, 0 disables (default: 60)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| read_env::<u64>(&lookup, key);

        Self {
            config_path: lookup("HUNTER_CONFIG").map(PathBuf::from),
            data_dir: lookup("HUNTER_DATA_DIR").map(PathBuf::from),
            log_dir: lookup("HUNTER_LOG_DIR").map(PathBuf::from),
            tick_interval: parsed("HUNTER_TICK_MS").map(|ms| Duration::from_millis(ms.max(1))),
            deposit_interval: parsed("HUNTER_DEPOSIT_SECS").map(Duration::from_secs),
            restock_interval: parsed("HUNTER_RESTOCK_SECS").map(Duration::from_secs),
        }
    }

    /// Runtime configuration with the environment overrides applied.
    ///
    /// A zero scheduler period disables that scheduler.
    pub fn runtime_config(&self, agent: AgentConfig) -> RuntimeConfig {
        let defaults = RuntimeConfig::default();
        let enabled = |period: Duration| (!period.is_zero()).then_some(period);

        RuntimeConfig {
            agent,
            tick_interval: self.tick_interval.or(defaults.tick_interval),
            deposit_interval: match self.deposit_interval {
                Some(period) => enabled(period),
                None => defaults.deposit_interval,
            },
            restock_interval: match self.restock_interval {
                Some(period) => enabled(period),
                None => defaults.restock_interval,
            },
            ..defaults
        }
    }
}

fn read_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let value = lookup(key)?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(key, value, "Ignoring unparsable environment value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn name_and_password_are_optional() {
        let target = ConnectTarget::from_args(&["localhost", "25565"]).unwrap();
        assert_eq!(target.name, "hunter");
        assert_eq!(target.password, None);

        let target =
            ConnectTarget::from_args(&["mc.example.org", "25566", "Guard01", "secret"]).unwrap();
        assert_eq!(target.port, 25566);
        assert_eq!(target.name, "Guard01");
        assert_eq!(target.password.as_deref(), Some("secret"));
    }

    #[test]
    fn wrong_argument_count_is_a_usage_error() {
        assert_eq!(
            ConnectTarget::from_args(&["localhost"]),
            Err(UsageError::ArgumentCount(1))
        );
        assert_eq!(
            ConnectTarget::from_args(&["a", "1", "b", "c", "d"]),
            Err(UsageError::ArgumentCount(5))
        );
        assert!(matches!(
            ConnectTarget::from_args(&["localhost", "port"]),
            Err(UsageError::InvalidPort(_))
        ));
    }

    #[test]
    fn usage_errors_describe_the_problem() {
        assert_eq!(
            UsageError::ArgumentCount(1).to_string(),
            "expected 2 to 4 arguments, got 1"
        );
        let error = ConnectTarget::from_args(&["localhost", "http"]).unwrap_err();
        assert_eq!(error.to_string(), "invalid port: http");
    }

    #[test]
    fn environment_overrides_schedules() {
        let vars: HashMap<&str, &str> = [
            ("HUNTER_TICK_MS", "100"),
            ("HUNTER_DEPOSIT_SECS", "0"),
            ("HUNTER_RESTOCK_SECS", "not a number"),
            ("HUNTER_DATA_DIR", "/var/lib/hunter"),
        ]
        .into_iter()
        .collect();
        let config = ClientConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/hunter")));
        assert_eq!(config.restock_interval, None);

        let runtime = config.runtime_config(AgentConfig::default());
        assert_eq!(runtime.tick_interval, Some(Duration::from_millis(100)));
        assert_eq!(runtime.deposit_interval, None);
        assert_eq!(
            runtime.restock_interval,
            Some(RuntimeConfig::DEFAULT_RESTOCK_INTERVAL)
        );
    }
}
