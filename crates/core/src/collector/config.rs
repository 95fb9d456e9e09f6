//! Collector configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for a collection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Base URL of the report service (e.g., "http://localhost:8080").
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Offset to request the report from.
    #[serde(default)]
    pub offset: u64,

    /// Delay between polls while the report is not ready (milliseconds).
    #[serde(default = "default_retry_interval")]
    pub retry_interval_ms: u64,

    /// Deadline for the whole submit-and-poll run (milliseconds).
    #[serde(default = "default_deadline")]
    pub deadline_ms: u64,

    /// Timeout for a single HTTP request (milliseconds).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Directory the report is saved into. When unset the report is only logged.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_retry_interval() -> u64 {
    10_000 // 10 seconds
}

fn default_deadline() -> u64 {
    600_000 // 10 minutes
}

fn default_request_timeout() -> u64 {
    10_000 // 10 seconds
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            offset: 0,
            retry_interval_ms: default_retry_interval(),
            deadline_ms: default_deadline(),
            request_timeout_ms: default_request_timeout(),
            output_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CollectorConfig::default();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.offset, 0);
        assert_eq!(config.retry_interval_ms, 10_000);
        assert_eq!(config.deadline_ms, 600_000);
        assert_eq!(config.request_timeout_ms, 10_000);
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_deserialize_partial() {
        let toml = r#"
            api_url = "http://reports:9000"
            offset = 10000
            output_dir = "/tmp/reports"
        "#;
        let config: CollectorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.api_url, "http://reports:9000");
        assert_eq!(config.offset, 10000);
        assert_eq!(config.retry_interval_ms, 10_000);
        assert_eq!(
            config.output_dir.as_deref(),
            Some(std::path::Path::new("/tmp/reports"))
        );
    }
}
