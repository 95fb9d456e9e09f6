use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::ApisConfig, ConfigError};
use crate::collector::CollectorConfig;

/// Path of the optional service config file.
pub const APIS_CONFIG_ENV: &str = "REPORT_APIS_CONFIG";
/// Prefix for nested service overrides, e.g. `REPORT_APIS_GATE__TOGGLE_INTERVAL_MS`.
pub const APIS_ENV_PREFIX: &str = "REPORT_APIS_";
/// Listening port of the service.
pub const PORT_ENV: &str = "PORT";

/// Path of the optional collector config file.
pub const COLLECTOR_CONFIG_ENV: &str = "REPORT_COLLECTOR_CONFIG";
/// Prefix for collector overrides, e.g. `REPORT_COLLECTOR_OFFSET`.
pub const COLLECTOR_ENV_PREFIX: &str = "REPORT_COLLECTOR_";
/// Base URL of the report service the collector talks to.
pub const API_URL_ENV: &str = "REPORT_API_URL";

/// Load the service configuration.
///
/// Defaults, then the TOML file at `path` (if given), then `PORT`, then
/// `REPORT_APIS_*` overrides.
pub fn load_apis_config(path: Option<&Path>) -> Result<ApisConfig, ConfigError> {
    let mut figment = with_optional_file(
        Figment::from(Serialized::defaults(ApisConfig::default())),
        path,
    )?;

    if let Some(port) = non_empty_env(PORT_ENV) {
        let port: u16 = port.trim().parse().map_err(|_| {
            ConfigError::ParseError(format!("{} must be a port number: {:?}", PORT_ENV, port))
        })?;
        figment = figment.merge(Serialized::default("server.port", port));
    }

    figment
        .merge(Env::prefixed(APIS_ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load the collector configuration.
///
/// Defaults, then the TOML file at `path` (if given), then `REPORT_API_URL`,
/// then `REPORT_COLLECTOR_*` overrides.
pub fn load_collector_config(path: Option<&Path>) -> Result<CollectorConfig, ConfigError> {
    let mut figment = with_optional_file(
        Figment::from(Serialized::defaults(CollectorConfig::default())),
        path,
    )?;

    if let Some(api_url) = non_empty_env(API_URL_ENV) {
        figment = figment.merge(Serialized::default("api_url", api_url));
    }

    figment
        .merge(Env::prefixed(COLLECTOR_ENV_PREFIX))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load service configuration from TOML string (useful for testing)
pub fn load_apis_config_from_str(toml_str: &str) -> Result<ApisConfig, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load collector configuration from TOML string (useful for testing)
pub fn load_collector_config_from_str(toml_str: &str) -> Result<CollectorConfig, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn with_optional_file(figment: Figment, path: Option<&Path>) -> Result<Figment, ConfigError> {
    match path {
        Some(path) if !path.exists() => Err(ConfigError::FileNotFound(path.display().to_string())),
        Some(path) => Ok(figment.merge(Toml::file(path))),
        None => Ok(figment),
    }
}

/// Unset and blank variables are treated the same.
fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
