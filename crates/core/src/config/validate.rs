use reqwest::Url;

use super::{types::ApisConfig, ConfigError};
use crate::collector::CollectorConfig;

/// Validate service configuration
/// Currently validates:
/// - Server port is not 0
/// - Toggle interval is positive when the toggle is enabled
/// - Reports have at least one row
pub fn validate_apis_config(config: &ApisConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.gate.enabled && config.gate.toggle_interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "gate.toggle_interval_ms must be greater than 0".to_string(),
        ));
    }

    if config.report.rows == 0 {
        return Err(ConfigError::ValidationError(
            "report.rows must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate collector configuration
/// Currently validates:
/// - api_url is an absolute http(s) URL
/// - retry interval, deadline and request timeout are positive
pub fn validate_collector_config(config: &CollectorConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.api_url).map_err(|e| {
        ConfigError::ValidationError(format!(
            "api_url {:?} is not a valid URL: {}",
            config.api_url, e
        ))
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::ValidationError(format!(
            "api_url must use http or https, got {:?}",
            url.scheme()
        )));
    }

    for (name, value) in [
        ("retry_interval_ms", config.retry_interval_ms),
        ("deadline_ms", config.deadline_ms),
        ("request_timeout_ms", config.request_timeout_ms),
    ] {
        if value == 0 {
            return Err(ConfigError::ValidationError(format!(
                "{} must be greater than 0",
                name
            )));
        }
    }

    Ok(())
}
