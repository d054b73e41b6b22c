use std::{fmt, path::PathBuf, str::FromStr};

use docseq_domain::{OverflowPolicy, DEFAULT_SEQUENCE_WIDTH};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const DEFAULT_MAX_ATTEMPTS: u32 = 20;
const DEFAULT_BACKOFF_MS: u64 = 100;
const MAX_SEQUENCE_WIDTH: usize = 9;

/// Which allocation mechanism guards number uniqueness.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    OptimisticRetry,
    AtomicCounter,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::OptimisticRetry => f.write_str("optimistic_retry"),
            StrategyKind::AtomicCounter => f.write_str("atomic_counter"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "optimistic_retry" | "optimistic" => Ok(StrategyKind::OptimisticRetry),
            "atomic_counter" | "counter" => Ok(StrategyKind::AtomicCounter),
            other => Err(ConfigError::Invalid(format!("unknown strategy `{other}`"))),
        }
    }
}

/// Stores allocator settings and the location of the document store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "Config::default_backoff_ms")]
    pub backoff_ms: u64,
    #[serde(default = "Config::default_sequence_width")]
    pub sequence_width: usize,
    #[serde(default)]
    pub overflow: OverflowPolicy,
    #[serde(default)]
    pub strategy: StrategyKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom document store file. Defaults to `<home>/documents.json`.
    pub store_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_attempts: Self::default_max_attempts(),
            backoff_ms: Self::default_backoff_ms(),
            sequence_width: Self::default_sequence_width(),
            overflow: OverflowPolicy::default(),
            strategy: StrategyKind::default(),
            store_file: None,
        }
    }
}

impl Config {
    fn default_max_attempts() -> u32 {
        DEFAULT_MAX_ATTEMPTS
    }

    fn default_backoff_ms() -> u64 {
        DEFAULT_BACKOFF_MS
    }

    fn default_sequence_width() -> usize {
        DEFAULT_SEQUENCE_WIDTH
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid("max_attempts must be at least 1".into()));
        }
        if self.sequence_width == 0 || self.sequence_width > MAX_SEQUENCE_WIDTH {
            return Err(ConfigError::Invalid(format!(
                "sequence_width must be between 1 and {MAX_SEQUENCE_WIDTH}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{ "strategy": "atomic_counter" }"#).unwrap();
        assert_eq!(config.strategy, StrategyKind::AtomicCounter);
        assert_eq!(config.max_attempts, 20);
        assert_eq!(config.backoff_ms, 100);
        assert_eq!(config.sequence_width, 3);
        assert_eq!(config.overflow, OverflowPolicy::Widen);
    }

    #[test]
    fn strategy_names_parse_loosely() {
        assert_eq!("Atomic-Counter".parse::<StrategyKind>().unwrap(), StrategyKind::AtomicCounter);
        assert_eq!("optimistic".parse::<StrategyKind>().unwrap(), StrategyKind::OptimisticRetry);
        assert!("pessimistic".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn validation_rejects_unusable_values() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        config.max_attempts = 0;
        assert!(config.validate().is_err());
        config.max_attempts = 5;
        config.sequence_width = 10;
        assert!(config.validate().is_err());
    }
}
