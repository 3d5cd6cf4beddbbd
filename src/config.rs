use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DiagResetConfig {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_diagreset_dir()
            .join("diagnostics.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

/// Returns `~/.diagreset/`, or `./.diagreset` when no home directory is known.
pub fn default_diagreset_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".diagreset")
}

/// Returns the default config file path: `~/.diagreset/config.toml`
pub fn default_config_path() -> PathBuf {
    default_diagreset_dir().join("config.toml")
}

impl DiagResetConfig {
    /// Load config from the default TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            DiagResetConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (DIAGRESET_DB, DIAGRESET_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("DIAGRESET_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("DIAGRESET_LOG_LEVEL") {
            self.logging.log_level = val;
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DiagResetConfig::default();
        assert_eq!(config.logging.log_level, "info");
        assert!(config.storage.db_path.ends_with("diagnostics.db"));
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[storage]
db_path = "/tmp/lenovo.db"
"#;
        let config: DiagResetConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.storage.db_path, "/tmp/lenovo.db");
        // defaults still apply for unset sections
        assert_eq!(config.logging.log_level, "info");
    }

    #[test]
    fn parse_logging_section() {
        let toml_str = r#"
[logging]
log_level = "diagreset=debug"
"#;
        let config: DiagResetConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.log_level, "diagreset=debug");
        assert!(config.storage.db_path.ends_with("diagnostics.db"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("absent.toml");
        assert!(DiagResetConfig::load_from(&path).is_ok());
        assert!(!path.exists());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[storage\ndb_path = 1").unwrap();
        assert!(DiagResetConfig::load_from(&path).is_err());
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = DiagResetConfig::default();
        std::env::set_var("DIAGRESET_DB", "/tmp/override.db");
        std::env::set_var("DIAGRESET_LOG_LEVEL", "trace");

        config.apply_env_overrides();

        assert_eq!(config.storage.db_path, "/tmp/override.db");
        assert_eq!(config.logging.log_level, "trace");

        // Clean up
        std::env::remove_var("DIAGRESET_DB");
        std::env::remove_var("DIAGRESET_LOG_LEVEL");
    }

    #[test]
    fn tilde_expands_to_home() {
        let expanded = expand_tilde("~/diag.db");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("diag.db"));
        }
        assert_eq!(expand_tilde("/abs/diag.db"), PathBuf::from("/abs/diag.db"));
    }
}
