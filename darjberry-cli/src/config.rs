//! `darjberry.toml` loading.
//!
//! Every section and key is optional; anything missing takes its default.
//!
//! ```toml
//! [database]
//! backend = "sqlite"
//! connection_string = "sqlite:darjberry.db?mode=rwc"
//!
//! [calculator]
//! default_price_per_kg = "800"
//! max_acres = "100"
//!
//! [logging]
//! level = "info"
//! file = "darjberry.log"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use darjberry_core::calculations::DEFAULT_PRICE_PER_KG;
use darjberry_core::db::DbConfig;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "darjberry.toml";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("database backend must not be empty")]
    EmptyBackend,

    #[error("default_price_per_kg must be positive, got {0}")]
    NonPositivePrice(Decimal),

    #[error("max_acres must be positive, got {0}")]
    NonPositiveMaxAcres(Decimal),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub backend: String,
    pub connection_string: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "sqlite:darjberry.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CalculatorSection {
    pub default_price_per_kg: Decimal,
    /// Largest plot the `calculate` and `compare` commands accept.
    pub max_acres: Decimal,
}

impl Default for CalculatorSection {
    fn default() -> Self {
        Self {
            default_price_per_kg: DEFAULT_PRICE_PER_KG,
            max_acres: Decimal::ONE_HUNDRED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// EnvFilter directive; `RUST_LOG` and `--log-level` take precedence.
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub calculator: CalculatorSection,
    pub logging: LoggingSection,
}

impl AppConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, or [`DEFAULT_CONFIG_FILE`] when `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !explicit && !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file '{}'", path.display()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.backend.trim().is_empty() {
            return Err(ConfigError::EmptyBackend);
        }
        if self.calculator.default_price_per_kg <= Decimal::ZERO {
            return Err(ConfigError::NonPositivePrice(self.calculator.default_price_per_kg));
        }
        if self.calculator.max_acres <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveMaxAcres(self.calculator.max_acres));
        }
        Ok(())
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            backend: self.database.backend.clone(),
            connection_string: self.database.connection_string.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn defaults() {
        let config = AppConfig::default();

        assert_eq!(config.database.backend, "sqlite");
        assert_eq!(config.calculator.default_price_per_kg, dec!(800));
        assert_eq!(config.calculator.max_acres, dec!(100));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, None);
    }

    #[test]
    fn full_file_parses() {
        let config = AppConfig::from_toml_str(
            r#"
            [database]
            backend = "sqlite"
            connection_string = ":memory:"

            [calculator]
            default_price_per_kg = "950"
            max_acres = "40"

            [logging]
            level = "debug"
            file = "farm.log"
            "#,
        )
        .unwrap();

        assert_eq!(config.db_config(), DbConfig::default());
        assert_eq!(config.calculator.default_price_per_kg, dec!(950));
        assert_eq!(config.calculator.max_acres, dec!(40));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("farm.log")));
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = AppConfig::from_toml_str("[calculator]\nmax_acres = \"10\"\n").unwrap();

        assert_eq!(config.calculator.max_acres, dec!(10));
        assert_eq!(config.calculator.default_price_per_kg, dec!(800));
        assert_eq!(config.database, DatabaseSection::default());
    }

    #[test]
    fn rejects_non_positive_price() {
        let err = AppConfig::from_toml_str("[calculator]\ndefault_price_per_kg = \"0\"\n")
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::NonPositivePrice(dec!(0)))
        );
    }

    #[test]
    fn rejects_empty_backend() {
        let err = AppConfig::from_toml_str("[database]\nbackend = \" \"\n").unwrap_err();

        assert_eq!(err.downcast_ref::<ConfigError>(), Some(&ConfigError::EmptyBackend));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(AppConfig::from_toml_str("[database\nbackend = 1").is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/darjberry.toml"))).unwrap_err();

        assert!(err.to_string().contains("Failed to read config file"));
    }
}
