//! Configuration file management.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpreadConfig {
    /// Storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Distribution defaults.
    #[serde(default)]
    pub distribution: DistributionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory. Empty = platform default.
    #[serde(default)]
    pub data_dir: String,
    /// Database file name inside the data directory.
    #[serde(default = "default_db_file")]
    pub db_file: String,
    /// Keep the ledger in memory only; nothing survives a restart.
    #[serde(default)]
    pub in_memory: bool,
}

/// Distribution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionConfig {
    /// Reject a distribution whose percentage field is blank.
    #[serde(default = "default_true")]
    pub require_percentage: bool,
    /// Percentage used for a blank field when `require_percentage` is off.
    #[serde(
        default = "default_favored_pct",
        with = "rust_decimal::serde::float"
    )]
    pub default_favored_pct: Decimal,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "spread_ledger=debug".
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path. Empty = stderr.
    #[serde(default)]
    pub log_file: String,
}

// Default value functions

fn default_db_file() -> String {
    "spread.db".to_string()
}

fn default_true() -> bool {
    true
}

fn default_favored_pct() -> Decimal {
    Decimal::from(50)
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: String::new(),
            db_file: default_db_file(),
            in_memory: false,
        }
    }
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            require_percentage: true,
            default_favored_pct: default_favored_pct(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_file: String::new(),
        }
    }
}

impl SpreadConfig {
    /// Load configuration from the default config file location.
    ///
    /// Falls back to defaults if file does not exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults if absent.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: SpreadConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Get the data directory path.
    pub fn data_dir(&self) -> PathBuf {
        if self.storage.data_dir.is_empty() {
            Self::default_data_dir()
        } else {
            PathBuf::from(&self.storage.data_dir)
        }
    }

    /// Get the database file path.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.db_file)
    }

    /// Get the config file path.
    fn config_path() -> PathBuf {
        Self::default_data_dir().join("config.toml")
    }

    /// Platform-specific default data directory.
    fn default_data_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("SPREAD_DATA_DIR") {
            return PathBuf::from(dir);
        }
        #[cfg(target_os = "macos")]
        {
            dirs_fallback("Library/Application Support/Spread")
        }
        #[cfg(target_os = "windows")]
        {
            dirs_fallback("Spread")
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs_fallback(".spread")
        }
    }
}

/// Fallback home directory resolution.
fn dirs_fallback(subpath: &str) -> PathBuf {
    std::env::var("HOME")
        .map(|h| PathBuf::from(h).join(subpath))
        .unwrap_or_else(|_| PathBuf::from("/tmp/spread"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SpreadConfig::default();
        assert_eq!(config.storage.db_file, "spread.db");
        assert!(!config.storage.in_memory);
        assert!(config.distribution.require_percentage);
        assert_eq!(config.distribution.default_favored_pct, Decimal::from(50));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_serialization() {
        let config = SpreadConfig::default();
        let toml_str = toml::to_string(&config).expect("serialize");
        let _parsed: SpreadConfig = toml::from_str(&toml_str).expect("parse");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: SpreadConfig = toml::from_str(
            r#"
            [storage]
            data_dir = "/var/lib/spread"

            [distribution]
            require_percentage = false
            default_favored_pct = 30
            "#,
        )
        .expect("parse");
        assert_eq!(config.db_path(), PathBuf::from("/var/lib/spread/spread.db"));
        assert!(!config.distribution.require_percentage);
        assert_eq!(config.distribution.default_favored_pct, Decimal::from(30));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = SpreadConfig::load_from(&dir.path().join("config.toml")).expect("load");
        assert_eq!(config.storage.db_file, "spread.db");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").expect("write");
        let config = SpreadConfig::load_from(&path).expect("load");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage\n").expect("write");
        assert!(SpreadConfig::load_from(&path).is_err());
    }
}
