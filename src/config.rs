//! TOML-based service configuration.

use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};

/// Top-level service configuration parsed from TOML.
///
/// All fields have defaults. Load from TOML with
/// [`ServiceConfig::from_toml_file`] or use [`ServiceConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Input bounds applied before simulating.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Reference data source.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Allow cross-origin requests from any origin.
    pub permissive_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            permissive_cors: true,
        }
    }
}

/// Input bounds applied before simulating.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Largest monthly consumption accepted from callers (kWh).
    pub max_consumption_kwh: Decimal,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_consumption_kwh: Decimal::from(1_000_000_000_u64),
        }
    }
}

/// Reference data source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// TOML catalog file; the built-in catalog is used when unset.
    pub path: Option<PathBuf>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"server.port"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ServiceConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.server.host.parse::<IpAddr>().is_err() {
            errors.push(ConfigError {
                field: "server.host".into(),
                message: format!("must be an IP address, got \"{}\"", self.server.host),
            });
        }

        if self.simulation.max_consumption_kwh <= Decimal::ZERO {
            errors.push(ConfigError {
                field: "simulation.max_consumption_kwh".into(),
                message: "must be > 0".into(),
            });
        }

        if let Some(path) = &self.catalog.path {
            if path.as_os_str().is_empty() {
                errors.push(ConfigError {
                    field: "catalog.path".into(),
                    message: "must not be empty when set".into(),
                });
            }
        }

        errors
    }

    /// Loads the configured catalog, falling back to the built-in one.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the configured file cannot be loaded.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog.path {
            Some(path) => Catalog::from_toml_file(path),
            None => Ok(Catalog::builtin()),
        }
    }
}
